//! External wire schema and normalization.
//!
//! The service's JSON shapes are versioned and sparse: almost every field is
//! optional and nested under `metadata`/`output` sub-objects. The functions
//! here are total over well-formed input — every lookup falls back through an
//! explicit, ordered default cascade, so normalization never fails and the
//! default policy stays auditable field by field.

use serde::{Deserialize, Serialize};

use crate::types::{
    CameraMotion, GenerationJob, GenerationParameters, GenerationRequest, JobStatus,
    ModelCapability, RequestMetadata, Resolution, StoryboardStep, VideoModel,
    DEFAULT_ASPECT_RATIO, DEFAULT_DURATION_SECONDS, DEFAULT_GUIDANCE_SCALE,
    DEFAULT_MAX_DURATION_SECONDS,
};

// ── External model schema ───────────────────────────────────────────────────

/// A model entry as returned by the catalog endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiModel {
    /// Model id. The only field the service always sends.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Marketing description.
    #[serde(default)]
    pub description: Option<String>,
    /// Nested capability metadata.
    #[serde(default)]
    pub metadata: Option<ApiModelMetadata>,
}

/// The `metadata` sub-object of a catalog model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiModelMetadata {
    /// Catalog tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Advertised capabilities.
    #[serde(default)]
    pub capabilities: Option<Vec<ApiCapability>>,
    /// Video-specific limits and defaults.
    #[serde(default)]
    pub video: Option<ApiVideoMetadata>,
}

/// A capability entry on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCapability {
    /// Capability id.
    #[serde(default)]
    pub id: String,
    /// Human-readable label.
    #[serde(default)]
    pub label: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// The `metadata.video` sub-object of a catalog model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiVideoMetadata {
    /// Hard duration ceiling in seconds.
    #[serde(default)]
    pub max_duration_seconds: Option<u32>,
    /// Service-suggested duration in seconds.
    #[serde(default)]
    pub default_duration_seconds: Option<u32>,
    /// Aspect ratios the model accepts.
    #[serde(default)]
    pub supported_aspect_ratios: Option<Vec<String>>,
    /// Service-suggested aspect ratio.
    #[serde(default)]
    pub default_aspect_ratio: Option<String>,
    /// Service-suggested parameter defaults.
    #[serde(default)]
    pub default_parameters: Option<ApiParameters>,
}

/// Generation parameters on the wire, fully optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiParameters {
    /// Duration in seconds.
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// Aspect ratio token.
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    /// Resolution token.
    #[serde(default)]
    pub resolution: Option<String>,
    /// Guidance scale.
    #[serde(default)]
    pub guidance_scale: Option<f64>,
    /// Camera motion token.
    #[serde(default)]
    pub camera_motion: Option<String>,
    /// Fixed seed.
    #[serde(default)]
    pub seed: Option<i64>,
}

/// Envelope of the model listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelListEnvelope {
    /// Raw model entries.
    #[serde(default)]
    pub data: Vec<ApiModel>,
}

// ── External job schema ─────────────────────────────────────────────────────

/// Job status tokens as the service spells them. This set is closed; the
/// notable differences from [`JobStatus`] are `in_progress` and the
/// double-l `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiJobStatus {
    /// Waiting to start.
    Queued,
    /// Rendering.
    InProgress,
    /// Done.
    Completed,
    /// Errored.
    Failed,
    /// Stopped by the caller.
    Cancelled,
}

impl ApiJobStatus {
    /// Translates a wire status into the internal status plus its derived
    /// progress. The table is fixed: the wire schema has no independent
    /// progress field, so mid-run percentages are not representable.
    pub fn to_internal(self) -> (JobStatus, u8) {
        match self {
            Self::Queued => (JobStatus::Queued, 0),
            Self::InProgress => (JobStatus::Running, 50),
            Self::Completed => (JobStatus::Completed, 100),
            Self::Failed => (JobStatus::Failed, 100),
            Self::Cancelled => (JobStatus::Canceled, 0),
        }
    }
}

/// A generation job as returned by the videos endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiJob {
    /// Job id.
    #[serde(default)]
    pub id: String,
    /// Wire status token; missing is treated as queued.
    #[serde(default)]
    pub status: Option<ApiJobStatus>,
    /// Id of the model rendering the job.
    #[serde(default)]
    pub model: Option<String>,
    /// ISO-8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO-8601 update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Result artifacts.
    #[serde(default)]
    pub output: Option<ApiJobOutput>,
    /// Echo of the submitted request fields.
    #[serde(default)]
    pub metadata: Option<ApiJobMetadata>,
    /// Failure details.
    #[serde(default)]
    pub error: Option<ApiJobError>,
}

/// The `output` sub-object of a job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiJobOutput {
    /// The finished video.
    #[serde(default)]
    pub video: Option<ApiAsset>,
    /// Preview thumbnails, best first.
    #[serde(default)]
    pub thumbnails: Option<Vec<ApiAsset>>,
}

/// A downloadable artifact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiAsset {
    /// Download URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// The `metadata` sub-object of a job: the service echoes the submitted
/// request here, snake-cased and fully optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiJobMetadata {
    /// Prompt text.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Negative prompt.
    #[serde(default)]
    pub negative_prompt: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<u32>,
    /// Aspect ratio token.
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    /// Guidance scale.
    #[serde(default)]
    pub guidance_scale: Option<f64>,
    /// Camera motion token.
    #[serde(default)]
    pub camera_motion: Option<String>,
    /// Fixed seed.
    #[serde(default)]
    pub seed: Option<i64>,
    /// Resolution token.
    #[serde(default)]
    pub resolution: Option<String>,
    /// Storyboard steps.
    #[serde(default)]
    pub storyboard: Option<Vec<ApiStoryboardStep>>,
    /// Request title.
    #[serde(default)]
    pub title: Option<String>,
    /// Request description.
    #[serde(default)]
    pub description: Option<String>,
    /// Request notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Watermark flag.
    #[serde(default)]
    pub watermark: Option<bool>,
}

/// A storyboard step on the wire. Note the external key is `duration`, not
/// `duration_seconds`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiStoryboardStep {
    /// Step id.
    #[serde(default)]
    pub id: String,
    /// Step description.
    #[serde(default)]
    pub description: String,
    /// Per-step duration in seconds.
    #[serde(default)]
    pub duration: Option<u32>,
}

/// Failure details attached to a job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiJobError {
    /// Human-readable failure message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope of the job listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListEnvelope {
    /// Raw job entries.
    #[serde(default)]
    pub data: Vec<ApiJob>,
    /// Token for the next page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Error body shape the service uses for non-success responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Machine-readable code.
    #[serde(default)]
    pub code: Option<String>,
    /// Extra payload, passed through verbatim.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

// ── Outgoing payload schema ─────────────────────────────────────────────────

/// The submission payload, snake-cased per the service contract. Absent
/// optionals are omitted from the JSON, never serialized as null.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPayload {
    /// Target model id.
    pub model: String,
    /// Prompt text.
    pub prompt: String,
    /// Negative prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// Aspect ratio token.
    pub aspect_ratio: String,
    /// Duration in seconds.
    pub duration: u32,
    /// Guidance scale.
    pub guidance_scale: f64,
    /// Camera motion token.
    pub camera_motion: CameraMotion,
    /// Fixed seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Resolution token.
    pub resolution: Resolution,
    /// Storyboard steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storyboard: Option<Vec<PayloadStoryboardStep>>,
    /// Free-form request labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PayloadMetadata>,
    /// Watermark flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<bool>,
}

/// A storyboard step in the submission payload.
#[derive(Debug, Clone, Serialize)]
pub struct PayloadStoryboardStep {
    /// Step id.
    pub id: String,
    /// Step description.
    pub description: String,
    /// Per-step duration, external key `duration`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// Request labels in the submission payload.
#[derive(Debug, Clone, Serialize)]
pub struct PayloadMetadata {
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ── Normalization ───────────────────────────────────────────────────────────

/// Normalizes a catalog model, applying the default cascade for every field
/// the service omitted. Total: any sparse-but-well-formed entry produces a
/// usable [`VideoModel`].
pub fn normalize_model(model: ApiModel) -> VideoModel {
    let metadata = model.metadata.unwrap_or_default();
    let video = metadata.video.unwrap_or_default();
    let defaults = video.default_parameters.unwrap_or_default();

    // An explicitly-present but empty ratio list falls through the cascade.
    let aspect_ratios = video
        .supported_aspect_ratios
        .filter(|ratios| !ratios.is_empty())
        .or_else(|| {
            video
                .default_aspect_ratio
                .clone()
                .map(|ratio| vec![ratio])
        })
        .unwrap_or_else(|| vec![DEFAULT_ASPECT_RATIO.to_string()]);

    let max_duration_seconds = video
        .max_duration_seconds
        .or(video.default_duration_seconds)
        .unwrap_or(DEFAULT_MAX_DURATION_SECONDS);

    let duration_seconds = defaults
        .duration_seconds
        .or(video.default_duration_seconds)
        .unwrap_or_else(|| DEFAULT_DURATION_SECONDS.min(max_duration_seconds));

    let aspect_ratio = defaults
        .aspect_ratio
        .or(video.default_aspect_ratio)
        .or_else(|| aspect_ratios.first().cloned())
        .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string());

    let capabilities = metadata
        .capabilities
        .unwrap_or_default()
        .into_iter()
        .map(|capability| ModelCapability {
            id: capability.id,
            label: capability.label,
            description: capability.description,
        })
        .collect();

    VideoModel {
        name: model.display_name.unwrap_or_else(|| model.id.clone()),
        id: model.id,
        description: model.description.unwrap_or_default(),
        capabilities,
        max_duration_seconds,
        aspect_ratios,
        default_parameters: GenerationParameters {
            duration_seconds,
            aspect_ratio,
            resolution: parse_resolution(defaults.resolution.as_deref()),
            guidance_scale: defaults.guidance_scale.unwrap_or(DEFAULT_GUIDANCE_SCALE),
            camera_motion: parse_camera_motion(defaults.camera_motion.as_deref()),
            seed: defaults.seed,
        },
        tags: metadata.tags.unwrap_or_default(),
    }
}

/// Projects an internal request into the snake-cased submission payload.
pub fn build_generation_payload(request: &GenerationRequest) -> GenerationPayload {
    let storyboard = request.storyboard.as_ref().map(|steps| {
        steps
            .iter()
            .map(|step| PayloadStoryboardStep {
                id: step.id.clone(),
                description: step.description.clone(),
                duration: step.duration_seconds,
            })
            .collect()
    });

    let metadata = request.metadata.as_ref().map(|meta| PayloadMetadata {
        title: meta.title.clone(),
        description: meta.description.clone(),
        notes: meta.notes.clone(),
    });

    GenerationPayload {
        model: request.model_id.clone(),
        prompt: request.prompt.clone(),
        negative_prompt: request.negative_prompt.clone(),
        aspect_ratio: request.parameters.aspect_ratio.clone(),
        duration: request.parameters.duration_seconds,
        guidance_scale: request.parameters.guidance_scale,
        camera_motion: request.parameters.camera_motion,
        seed: request.parameters.seed,
        resolution: request.parameters.resolution,
        storyboard,
        metadata,
        watermark: request.watermark,
    }
}

/// Normalizes a job from the wire. Status and progress come from the fixed
/// translation table; the originating request is reconstructed from the
/// metadata echo with the same default cascade as [`normalize_model`].
pub fn normalize_generation_job(job: ApiJob) -> GenerationJob {
    let (status, progress) = job
        .status
        .unwrap_or(ApiJobStatus::Queued)
        .to_internal();

    let metadata = job.metadata.unwrap_or_default();
    let output = job.output.unwrap_or_default();
    let model_id = job.model.unwrap_or_default();
    let created_at = job.created_at.unwrap_or_default();
    let updated_at = job.updated_at.unwrap_or_else(|| created_at.clone());

    let storyboard = metadata.storyboard.map(|steps| {
        steps
            .into_iter()
            .map(|step| StoryboardStep {
                id: step.id,
                description: step.description,
                duration_seconds: step.duration,
            })
            .collect()
    });

    let request_metadata =
        if metadata.title.is_some() || metadata.description.is_some() || metadata.notes.is_some() {
            Some(RequestMetadata {
                title: metadata.title,
                description: metadata.description,
                notes: metadata.notes,
            })
        } else {
            None
        };

    let result_url = output
        .video
        .and_then(|video| video.url)
        .filter(|url| !url.is_empty());
    let thumbnail_url = output
        .thumbnails
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|thumbnail| thumbnail.url)
        .filter(|url| !url.is_empty());

    GenerationJob {
        id: job.id,
        status,
        model_id: model_id.clone(),
        created_at,
        updated_at,
        progress,
        request: GenerationRequest {
            model_id,
            prompt: metadata.prompt.unwrap_or_default(),
            negative_prompt: metadata.negative_prompt,
            storyboard,
            parameters: GenerationParameters {
                duration_seconds: metadata.duration.unwrap_or(DEFAULT_DURATION_SECONDS),
                aspect_ratio: metadata
                    .aspect_ratio
                    .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string()),
                resolution: parse_resolution(metadata.resolution.as_deref()),
                guidance_scale: metadata.guidance_scale.unwrap_or(DEFAULT_GUIDANCE_SCALE),
                camera_motion: parse_camera_motion(metadata.camera_motion.as_deref()),
                seed: metadata.seed,
            },
            metadata: request_metadata,
            watermark: metadata.watermark,
        },
        result_url,
        thumbnail_url,
        error_message: job.error.and_then(|error| error.message),
    }
}

/// Resolution cascade: wire token when known, else the 1080p default.
fn parse_resolution(token: Option<&str>) -> Resolution {
    token.and_then(Resolution::from_token).unwrap_or_default()
}

/// Camera motion cascade: wire token when known, else the dynamic default.
fn parse_camera_motion(token: Option<&str>) -> CameraMotion {
    token.and_then(CameraMotion::from_token).unwrap_or_default()
}
