//! Internal domain model for video generation.
//!
//! These are the normalized types the rest of an application works with.
//! The external wire schema (and the defaulting that turns it into these
//! types) lives in [`crate::wire`].

use serde::{Deserialize, Serialize};

/// Default aspect ratio used whenever the service omits one.
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";
/// Default clip duration in seconds, capped by a model's maximum.
pub const DEFAULT_DURATION_SECONDS: u32 = 30;
/// Default maximum clip duration in seconds.
pub const DEFAULT_MAX_DURATION_SECONDS: u32 = 60;
/// Default guidance scale.
pub const DEFAULT_GUIDANCE_SCALE: f64 = 7.0;

/// Lifecycle status of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted by the service, not started yet.
    Queued,
    /// Actively rendering.
    Running,
    /// Finished successfully; a result URL should be available.
    Completed,
    /// Finished with an error.
    Failed,
    /// Stopped at the caller's request.
    Canceled,
}

impl JobStatus {
    /// Returns true for statuses that still expect further updates.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Queued | Self::Running)
    }

    /// Returns true once the job can no longer change status.
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns the lowercase token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output resolution of a generated clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// 1280x720.
    #[serde(rename = "720p")]
    R720p,
    /// 1920x1080.
    #[default]
    #[serde(rename = "1080p")]
    R1080p,
    /// 3840x2160.
    #[serde(rename = "4k")]
    R4k,
}

impl Resolution {
    /// Returns the wire token for this resolution.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::R720p => "720p",
            Self::R1080p => "1080p",
            Self::R4k => "4k",
        }
    }

    /// Parses a wire token. Unknown tokens return `None` so the caller's
    /// default cascade can take over.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "720p" => Some(Self::R720p),
            "1080p" => Some(Self::R1080p),
            "4k" => Some(Self::R4k),
            _ => None,
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Camera motion style applied during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraMotion {
    /// Fixed camera.
    Static,
    /// Gentle panning movement.
    SlowPan,
    /// Free camera movement.
    #[default]
    Dynamic,
}

impl CameraMotion {
    /// Returns the wire token for this motion style.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::SlowPan => "slow-pan",
            Self::Dynamic => "dynamic",
        }
    }

    /// Parses a wire token. Unknown tokens return `None` so the caller's
    /// default cascade can take over.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "static" => Some(Self::Static),
            "slow-pan" => Some(Self::SlowPan),
            "dynamic" => Some(Self::Dynamic),
            _ => None,
        }
    }
}

impl std::fmt::Display for CameraMotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable parameters for a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Clip duration in seconds. Must stay within the target model's
    /// `max_duration_seconds`; enforcing that is the caller's job.
    pub duration_seconds: u32,
    /// Aspect ratio token, e.g. `"16:9"`.
    pub aspect_ratio: String,
    /// Output resolution.
    pub resolution: Resolution,
    /// Prompt guidance scale.
    pub guidance_scale: f64,
    /// Camera motion style.
    pub camera_motion: CameraMotion,
    /// Fixed seed for reproducible output.
    pub seed: Option<i64>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            duration_seconds: DEFAULT_DURATION_SECONDS,
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            resolution: Resolution::default(),
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
            camera_motion: CameraMotion::default(),
            seed: None,
        }
    }
}

/// A single shot in a storyboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryboardStep {
    /// Identifier, unique within its storyboard.
    pub id: String,
    /// What happens in this shot.
    pub description: String,
    /// Per-step duration override in seconds.
    pub duration_seconds: Option<u32>,
}

impl StoryboardStep {
    /// Creates a step with the given id and description.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            duration_seconds: None,
        }
    }

    /// Sets the per-step duration in seconds.
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }
}

/// Free-form labels attached to a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestMetadata {
    /// Display title.
    pub title: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Internal notes.
    pub notes: Option<String>,
}

/// A request to generate a video. Immutable once constructed; the client
/// never modifies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Target model id.
    pub model_id: String,
    /// The text prompt describing the desired video.
    pub prompt: String,
    /// Things the video should avoid.
    pub negative_prompt: Option<String>,
    /// Ordered storyboard steps, when shot-level control is wanted.
    pub storyboard: Option<Vec<StoryboardStep>>,
    /// Generation parameters.
    pub parameters: GenerationParameters,
    /// Free-form labels.
    pub metadata: Option<RequestMetadata>,
    /// Whether the output should carry a watermark.
    pub watermark: Option<bool>,
}

impl GenerationRequest {
    /// Creates a request with default parameters.
    pub fn new(model_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            prompt: prompt.into(),
            negative_prompt: None,
            storyboard: None,
            parameters: GenerationParameters::default(),
            metadata: None,
            watermark: None,
        }
    }

    /// Sets the negative prompt.
    pub fn with_negative_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.negative_prompt = Some(prompt.into());
        self
    }

    /// Sets the storyboard steps.
    pub fn with_storyboard(mut self, steps: Vec<StoryboardStep>) -> Self {
        self.storyboard = Some(steps);
        self
    }

    /// Replaces the generation parameters.
    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Attaches free-form metadata.
    pub fn with_metadata(mut self, metadata: RequestMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the watermark flag.
    pub fn with_watermark(mut self, watermark: bool) -> Self {
        self.watermark = Some(watermark);
        self
    }
}

/// A generation job as known by the service, normalized.
///
/// Jobs are value objects: each fresh wire representation is normalized into
/// a new `GenerationJob` that replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationJob {
    /// Opaque id assigned by the service.
    pub id: String,
    /// Current lifecycle status.
    pub status: JobStatus,
    /// Id of the model rendering the job.
    pub model_id: String,
    /// ISO-8601 creation timestamp, as reported by the service.
    pub created_at: String,
    /// ISO-8601 timestamp of the latest update.
    pub updated_at: String,
    /// Completion percentage, 0-100. Derived from status: the wire schema
    /// carries no independent progress signal.
    pub progress: u8,
    /// Denormalized copy of the originating request.
    pub request: GenerationRequest,
    /// Download URL of the finished video.
    pub result_url: Option<String>,
    /// Preview thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Failure message for failed jobs.
    pub error_message: Option<String>,
}

/// A capability advertised by a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCapability {
    /// Capability id, e.g. `"motion"`.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Optional longer description.
    pub description: Option<String>,
}

/// A video generation model, normalized from the service catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoModel {
    /// Model id used when submitting requests.
    pub id: String,
    /// Display name; falls back to the id when the service provides none.
    pub name: String,
    /// Marketing description, possibly empty.
    pub description: String,
    /// Advertised capabilities.
    pub capabilities: Vec<ModelCapability>,
    /// Longest clip this model will render, in seconds.
    pub max_duration_seconds: u32,
    /// Aspect ratios this model accepts.
    pub aspect_ratios: Vec<String>,
    /// Parameter defaults suggested by the service.
    pub default_parameters: GenerationParameters,
    /// Catalog tags.
    pub tags: Vec<String>,
}

/// One page of the job listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPage {
    /// Jobs on this page, normalized.
    pub jobs: Vec<GenerationJob>,
    /// Token for the next page, absent on the last page.
    pub next_page_token: Option<String>,
}
