//! Async client for the Sora 2 video generation API.
//!
//! The crate has three layers:
//!
//! - [`client`] — the HTTP surface: list models, submit a generation,
//!   fetch, cancel, and page through jobs. One exchange per call, no
//!   retries, no polling loops.
//! - [`wire`] — the schema adapter between the remote JSON shapes and the
//!   crate's domain types, including the default cascades for model and
//!   job normalization.
//! - [`tracker`] — an immutable local view of known jobs and their
//!   status/progress timelines, fed by whatever polling strategy the
//!   application chooses.
//!
//! # Quick start
//!
//! ```no_run
//! use sora2::{GenerationRequest, Sora2Client};
//!
//! #[tokio::main]
//! async fn main() -> sora2::Result<()> {
//!     let client = Sora2Client::new("sk-...")?;
//!
//!     let models = client.list_models().await?;
//!     let model = &models[0];
//!
//!     let request = GenerationRequest::new(&model.id, "A tram crossing a rainy city at dusk");
//!     let job = client.submit_generation(&request).await?;
//!     println!("submitted {} ({})", job.id, job.status);
//!
//!     let job = client.get_job(&job.id).await?;
//!     println!("progress: {}%", job.progress);
//!     Ok(())
//! }
//! ```
//!
//! # Transport injection
//!
//! Every operation goes through the [`transport::HttpTransport`] trait, so
//! tests and embedders can swap the bundled [`transport::ReqwestTransport`]
//! for their own implementation via
//! [`Sora2ClientBuilder::transport`](client::Sora2ClientBuilder::transport).

#![warn(missing_docs)]

mod error;

pub mod client;
pub mod tracker;
pub mod transport;
pub mod types;
pub mod wire;

pub use client::{ListJobsParams, Sora2Client, Sora2ClientBuilder};
pub use error::{Result, Sora2Error};
pub use tracker::{GenerationJobRecord, JobTimelineEvent, JobTrackerState};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
pub use types::{
    CameraMotion, GenerationJob, GenerationParameters, GenerationRequest, JobPage, JobStatus,
    ModelCapability, RequestMetadata, Resolution, StoryboardStep, VideoModel,
};
pub use wire::{build_generation_payload, normalize_generation_job, normalize_model};
