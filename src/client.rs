//! The Sora 2 API client.
//!
//! One HTTP exchange per operation, standard headers on every request, and
//! uniform error surfacing. Retry policy, polling cadence, and cancellation
//! of in-flight calls all belong to the caller.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::{Result, Sora2Error};
use crate::transport::{HttpRequest, HttpTransport, Method, ReqwestTransport};
use crate::types::{GenerationJob, GenerationRequest, JobPage, VideoModel};
use crate::wire::{
    build_generation_payload, normalize_generation_job, normalize_model, ApiErrorBody, ApiJob,
    JobListEnvelope, ModelListEnvelope,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODELS_PATH: &str = "/v1/models?type=video";
const DEFAULT_VIDEOS_PATH: &str = "/v1/videos";
const DEFAULT_BETA_HEADER: &str = "video-generation=2024-12-17";

/// Pagination controls for [`Sora2Client::list_jobs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListJobsParams {
    /// Opaque continuation token from a previous page.
    pub page_token: Option<String>,
    /// Requested page size. Zero is treated as unset.
    pub page_size: Option<u32>,
}

/// Builder for [`Sora2Client`].
#[derive(Clone)]
pub struct Sora2ClientBuilder {
    api_key: Option<String>,
    base_url: String,
    models_path: String,
    videos_path: String,
    beta_header: String,
    headers: Vec<(String, String)>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl Default for Sora2ClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            models_path: DEFAULT_MODELS_PATH.to_string(),
            videos_path: DEFAULT_VIDEOS_PATH.to_string(),
            beta_header: DEFAULT_BETA_HEADER.to_string(),
            headers: Vec::new(),
            transport: None,
        }
    }
}

impl Sora2ClientBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Required; `build` rejects empty keys.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the base URL requests are resolved against.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model listing endpoint. May be a relative path or an
    /// absolute URL; empty values fall back to the default.
    pub fn models_path(mut self, path: impl Into<String>) -> Self {
        self.models_path = path.into();
        self
    }

    /// Overrides the videos endpoint. Same resolution rules as
    /// [`models_path`](Self::models_path).
    pub fn videos_path(mut self, path: impl Into<String>) -> Self {
        self.videos_path = path.into();
        self
    }

    /// Overrides the `OpenAI-Beta` feature opt-in value.
    pub fn beta_header(mut self, value: impl Into<String>) -> Self {
        self.beta_header = value.into();
        self
    }

    /// Adds a header to every request. Merging is last-wins, so a standard
    /// header can be overridden except for those the contract fixes.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Injects a custom transport. Defaults to [`ReqwestTransport`].
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client, validating the configuration.
    pub fn build(self) -> Result<Sora2Client> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Sora2Error::InvalidConfiguration("a non-empty API key is required".into())
            })?;

        Ok(Sora2Client {
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(ReqwestTransport::new())),
            api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            models_path: normalize_endpoint_path(&self.models_path, DEFAULT_MODELS_PATH),
            videos_path: normalize_endpoint_path(&self.videos_path, DEFAULT_VIDEOS_PATH),
            beta_header: self.beta_header,
            extra_headers: self.headers,
        })
    }
}

/// Client for a Sora-style video generation service.
#[derive(Clone)]
pub struct Sora2Client {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    base_url: String,
    models_path: String,
    videos_path: String,
    beta_header: String,
    extra_headers: Vec<(String, String)>,
}

impl Sora2Client {
    /// Creates a new [`Sora2ClientBuilder`].
    pub fn builder() -> Sora2ClientBuilder {
        Sora2ClientBuilder::new()
    }

    /// Creates a client with default endpoints and transport.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Lists the video models the service offers, normalized.
    pub async fn list_models(&self) -> Result<Vec<VideoModel>> {
        let envelope: ModelListEnvelope =
            self.request(Method::Get, &self.models_path, None).await?;
        Ok(envelope.data.into_iter().map(normalize_model).collect())
    }

    /// Submits a generation request and returns the freshly created job.
    pub async fn submit_generation(&self, request: &GenerationRequest) -> Result<GenerationJob> {
        let payload = build_generation_payload(request);
        let body = serde_json::to_string(&payload)?;
        let job: ApiJob = self
            .request(Method::Post, &self.videos_path, Some(body))
            .await?;
        Ok(normalize_generation_job(job))
    }

    /// Fetches one job by id.
    pub async fn get_job(&self, job_id: &str) -> Result<GenerationJob> {
        require_job_id(job_id)?;
        let path = format!("{}/{}", self.videos_path, job_id);
        let job: ApiJob = self.request(Method::Get, &path, None).await?;
        Ok(normalize_generation_job(job))
    }

    /// Asks the service to cancel one job by id. Returns the job in its
    /// post-cancellation state.
    pub async fn cancel_job(&self, job_id: &str) -> Result<GenerationJob> {
        require_job_id(job_id)?;
        let path = format!("{}/{}/cancel", self.videos_path, job_id);
        let job: ApiJob = self.request(Method::Post, &path, None).await?;
        Ok(normalize_generation_job(job))
    }

    /// Lists jobs, newest first per the service, with optional pagination.
    pub async fn list_jobs(&self, params: &ListJobsParams) -> Result<JobPage> {
        // The page token is opaque; percent-encoding keeps any content intact.
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(token) = params.page_token.as_deref().filter(|t| !t.is_empty()) {
            query.append_pair("page_token", token);
        }
        if let Some(size) = params.page_size.filter(|s| *s > 0) {
            query.append_pair("page_size", &size.to_string());
        }
        let query = query.finish();
        let path = if query.is_empty() {
            self.videos_path.clone()
        } else {
            format!("{}?{}", self.videos_path, query)
        };

        let envelope: JobListEnvelope = self.request(Method::Get, &path, None).await?;
        Ok(JobPage {
            jobs: envelope
                .data
                .into_iter()
                .map(normalize_generation_job)
                .collect(),
            next_page_token: envelope.next_page_token,
        })
    }

    /// Performs one exchange: resolves the URL, attaches standard headers,
    /// and converts non-success statuses into [`Sora2Error::RemoteRequestFailed`].
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path_or_url: &str,
        body: Option<String>,
    ) -> Result<T> {
        let url = self.resolve_url(path_or_url);
        let mut headers: Vec<(String, String)> = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.api_key),
            ),
            ("OpenAI-Beta".to_string(), self.beta_header.clone()),
        ];
        for (name, value) in &self.extra_headers {
            merge_header(&mut headers, name, value);
        }

        let response = self
            .transport
            .execute(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;

        tracing::debug!(
            method = method.as_str(),
            path = %path_or_url,
            status = response.status,
            "sora2 request completed"
        );

        if !response.is_success() {
            // Best-effort parse of the error body; never masks the failure.
            let error_body: ApiErrorBody =
                serde_json::from_str(&response.body).unwrap_or_default();
            let message = error_body.message.unwrap_or_else(|| {
                format!(
                    "Request to {} failed with status {}",
                    path_or_url, response.status
                )
            });
            return Err(Sora2Error::RemoteRequestFailed {
                status: response.status,
                message,
                code: error_body.code,
                details: error_body.details,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Absolute URLs pass through (one trailing slash trimmed); relative
    /// paths append to the base URL.
    fn resolve_url(&self, path_or_url: &str) -> String {
        if is_absolute_url(path_or_url) {
            path_or_url
                .strip_suffix('/')
                .unwrap_or(path_or_url)
                .to_string()
        } else {
            format!("{}{}", self.base_url, path_or_url)
        }
    }
}

fn require_job_id(job_id: &str) -> Result<()> {
    if job_id.is_empty() {
        return Err(Sora2Error::InvalidArgument(
            "job id must not be empty".into(),
        ));
    }
    Ok(())
}

fn is_absolute_url(target: &str) -> bool {
    let prefix: String = target
        .chars()
        .take("https:".len())
        .flat_map(char::to_lowercase)
        .collect();
    prefix.starts_with("http:") || prefix == "https:"
}

/// Normalizes a configured endpoint: trims whitespace, gives relative paths
/// a leading slash, strips one trailing slash, and falls back to the default
/// when empty.
fn normalize_endpoint_path(path: &str, fallback: &str) -> String {
    let target = path.trim();
    if target.is_empty() {
        return fallback.to_string();
    }
    if is_absolute_url(target) {
        return target.strip_suffix('/').unwrap_or(target).to_string();
    }
    let with_slash = if target.starts_with('/') {
        target.to_string()
    } else {
        format!("/{target}")
    };
    with_slash
        .strip_suffix('/')
        .map(str::to_string)
        .unwrap_or(with_slash)
}

/// Last-wins merge, case-insensitive on the header name.
fn merge_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    if let Some(entry) = headers
        .iter_mut()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
    {
        entry.1 = value.to_string();
    } else {
        headers.push((name.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpResponse;
    use crate::types::JobStatus;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Transport double: records every request and replays canned responses.
    struct MockTransport {
        requests: Mutex<Vec<HttpRequest>>,
        responses: Mutex<VecDeque<HttpResponse>>,
    }

    impl MockTransport {
        fn replying(responses: Vec<(u16, serde_json::Value)>) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|(status, body)| HttpResponse {
                            status,
                            body: body.to_string(),
                        })
                        .collect(),
                ),
            })
        }

        fn replying_raw(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(VecDeque::from([HttpResponse {
                    status,
                    body: body.to_string(),
                }])),
            })
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
            request
                .headers
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected request: no canned response left"))
        }
    }

    fn client_with(transport: Arc<MockTransport>) -> Sora2Client {
        Sora2Client::builder()
            .api_key("key-123")
            .base_url("https://example.com")
            .models_path("/models?type=video")
            .videos_path("/videos")
            .transport(transport)
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_api_key_rejected_at_build() {
        let result = Sora2Client::builder().api_key("").build();
        assert!(matches!(
            result,
            Err(Sora2Error::InvalidConfiguration(_))
        ));

        let result = Sora2Client::builder().build();
        assert!(matches!(
            result,
            Err(Sora2Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_endpoint_path_normalization() {
        assert_eq!(normalize_endpoint_path("videos", "/v1/videos"), "/videos");
        assert_eq!(normalize_endpoint_path("/videos/", "/v1/videos"), "/videos");
        assert_eq!(normalize_endpoint_path("  ", "/v1/videos"), "/v1/videos");
        assert_eq!(
            normalize_endpoint_path("https://alt.example.com/videos/", "/v1/videos"),
            "https://alt.example.com/videos"
        );
    }

    #[test]
    fn test_absolute_url_detection_is_case_insensitive() {
        assert!(is_absolute_url("https://example.com"));
        assert!(is_absolute_url("HTTP://example.com"));
        assert!(!is_absolute_url("/v1/videos"));
        assert!(!is_absolute_url("httpx://example.com"));
    }

    #[tokio::test]
    async fn test_list_models_attaches_standard_headers() {
        let transport = MockTransport::replying(vec![(
            200,
            json!({
                "data": [{
                    "id": "sora-1.1",
                    "display_name": "Sora 1.1",
                    "metadata": { "video": { "max_duration_seconds": 60 } }
                }]
            }),
        )]);
        let client = client_with(transport.clone());

        let models = client.list_models().await.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "sora-1.1");
        assert_eq!(models[0].name, "Sora 1.1");
        assert_eq!(models[0].max_duration_seconds, 60);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, "https://example.com/models?type=video");
        assert_eq!(
            MockTransport::header(&requests[0], "Authorization"),
            Some("Bearer key-123")
        );
        assert_eq!(
            MockTransport::header(&requests[0], "OpenAI-Beta"),
            Some("video-generation=2024-12-17")
        );
        assert_eq!(
            MockTransport::header(&requests[0], "Accept"),
            Some("application/json")
        );
        assert_eq!(
            MockTransport::header(&requests[0], "Content-Type"),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_list_models_tolerates_missing_data() {
        let transport = MockTransport::replying(vec![(200, json!({}))]);
        let client = client_with(transport);
        let models = client.list_models().await.unwrap();
        assert!(models.is_empty());
    }

    #[tokio::test]
    async fn test_submit_generation_posts_payload_and_normalizes() {
        let transport = MockTransport::replying(vec![(
            200,
            json!({
                "id": "job-1",
                "status": "in_progress",
                "model": "demo",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "output": {
                    "video": { "url": "https://example.com/video.mp4" },
                    "thumbnails": [{ "url": "https://example.com/thumb.jpg" }]
                }
            }),
        )]);
        let client = client_with(transport.clone());

        let request = GenerationRequest::new("demo", "Test prompt")
            .with_negative_prompt("No text")
            .with_watermark(false);
        let job = client.submit_generation(&request).await.unwrap();

        assert_eq!(job.id, "job-1");
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.progress, 50);
        assert_eq!(job.result_url.as_deref(), Some("https://example.com/video.mp4"));
        assert_eq!(
            job.thumbnail_url.as_deref(),
            Some("https://example.com/thumb.jpg")
        );

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "https://example.com/videos");
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body["model"], "demo");
        assert_eq!(body["prompt"], "Test prompt");
        assert_eq!(body["negative_prompt"], "No text");
        assert_eq!(body["aspect_ratio"], "16:9");
        assert_eq!(body["duration"], 30);
        assert_eq!(body["watermark"], false);
    }

    #[tokio::test]
    async fn test_get_job_hits_job_path() {
        let transport = MockTransport::replying(vec![(
            200,
            json!({ "id": "job-9", "status": "completed" }),
        )]);
        let client = client_with(transport.clone());

        let job = client.get_job("job-9").await.unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
        assert_eq!(
            transport.requests()[0].url,
            "https://example.com/videos/job-9"
        );
    }

    #[tokio::test]
    async fn test_cancel_job_posts_to_cancel_path() {
        let transport = MockTransport::replying(vec![(
            200,
            json!({ "id": "job-9", "status": "cancelled" }),
        )]);
        let client = client_with(transport.clone());

        let job = client.cancel_job("job-9").await.unwrap();
        assert_eq!(job.status, JobStatus::Canceled);
        assert_eq!(job.progress, 0);

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "https://example.com/videos/job-9/cancel");
    }

    #[tokio::test]
    async fn test_empty_job_id_fails_before_any_request() {
        let transport = MockTransport::replying(vec![]);
        let client = client_with(transport.clone());

        let get = client.get_job("").await;
        assert!(matches!(get, Err(Sora2Error::InvalidArgument(_))));
        let cancel = client.cancel_job("").await;
        assert!(matches!(cancel, Err(Sora2Error::InvalidArgument(_))));

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_jobs_serializes_pagination() {
        let page = json!({
            "data": [{
                "id": "job-42",
                "status": "completed",
                "model": "demo",
                "created_at": "2024-02-01T00:00:00Z",
                "updated_at": "2024-02-01T00:05:00Z",
                "output": { "video": { "url": "https://example.com/output.mp4" } },
                "metadata": { "prompt": "Ocean waves at sunrise", "resolution": "4k" }
            }],
            "next_page_token": "next"
        });
        let transport = MockTransport::replying(vec![
            (200, page.clone()),
            (200, page.clone()),
            (200, page),
        ]);
        let client = client_with(transport.clone());

        // No params: bare path.
        let result = client.list_jobs(&ListJobsParams::default()).await.unwrap();
        assert_eq!(result.jobs.len(), 1);
        assert_eq!(result.jobs[0].status, JobStatus::Completed);
        assert_eq!(
            result.jobs[0].request.parameters.resolution,
            crate::types::Resolution::R4k
        );
        assert_eq!(result.next_page_token.as_deref(), Some("next"));

        // Both params present.
        client
            .list_jobs(&ListJobsParams {
                page_token: Some("abc".into()),
                page_size: Some(25),
            })
            .await
            .unwrap();

        // Empty token and zero size are omitted entirely.
        client
            .list_jobs(&ListJobsParams {
                page_token: Some(String::new()),
                page_size: Some(0),
            })
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://example.com/videos");
        assert_eq!(
            requests[1].url,
            "https://example.com/videos?page_token=abc&page_size=25"
        );
        assert_eq!(requests[2].url, "https://example.com/videos");
    }

    #[tokio::test]
    async fn test_page_token_reserved_characters_are_encoded() {
        let transport = MockTransport::replying(vec![(200, json!({ "data": [] }))]);
        let client = client_with(transport.clone());

        // An opaque token must survive verbatim, never split the query.
        client
            .list_jobs(&ListJobsParams {
                page_token: Some("tok&page_size=999".into()),
                page_size: Some(10),
            })
            .await
            .unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "https://example.com/videos?page_token=tok%26page_size%3D999&page_size=10"
        );
    }

    #[tokio::test]
    async fn test_non_success_surfaces_remote_request_failed() {
        let transport = MockTransport::replying(vec![(
            401,
            json!({ "message": "Unauthorized", "code": "unauthorized" }),
        )]);
        let client = client_with(transport);

        let error = client.list_models().await.unwrap_err();
        match error {
            Sora2Error::RemoteRequestFailed {
                status,
                message,
                code,
                ..
            } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
                assert_eq!(code.as_deref(), Some("unauthorized"));
            }
            other => panic!("expected RemoteRequestFailed, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparsable_error_body_falls_back_to_generic_message() {
        let transport = MockTransport::replying_raw(503, "<html>Service Unavailable</html>");
        let client = client_with(transport);

        let error = client.get_job("job-1").await.unwrap_err();
        match error {
            Sora2Error::RemoteRequestFailed {
                status,
                message,
                code,
                details,
            } => {
                assert_eq!(status, 503);
                assert_eq!(
                    message,
                    "Request to /videos/job-1 failed with status 503"
                );
                assert!(code.is_none());
                assert!(details.is_none());
            }
            other => panic!("expected RemoteRequestFailed, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_body_details_pass_through() {
        let transport = MockTransport::replying(vec![(
            429,
            json!({
                "message": "Too many requests",
                "code": "rate_limited",
                "details": { "retry_after": 30 }
            }),
        )]);
        let client = client_with(transport);

        let error = client.list_models().await.unwrap_err();
        match error {
            Sora2Error::RemoteRequestFailed { details, .. } => {
                assert_eq!(details.unwrap()["retry_after"], 30);
            }
            other => panic!("expected RemoteRequestFailed, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_absolute_endpoint_used_verbatim() {
        let transport = MockTransport::replying(vec![(200, json!({ "data": [] }))]);
        let client = Sora2Client::builder()
            .api_key("key-123")
            .base_url("https://example.com")
            .models_path("https://alt.example.com/catalog/models/")
            .transport(transport.clone())
            .build()
            .unwrap();

        client.list_models().await.unwrap();
        assert_eq!(
            transport.requests()[0].url,
            "https://alt.example.com/catalog/models"
        );
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_trimmed() {
        let transport = MockTransport::replying(vec![(200, json!({ "data": [] }))]);
        let client = Sora2Client::builder()
            .api_key("key-123")
            .base_url("https://example.com/")
            .videos_path("/videos")
            .transport(transport.clone())
            .build()
            .unwrap();

        client.list_jobs(&ListJobsParams::default()).await.unwrap();
        assert_eq!(transport.requests()[0].url, "https://example.com/videos");
    }

    #[tokio::test]
    async fn test_builder_headers_override_standard_ones() {
        let transport = MockTransport::replying(vec![(200, json!({ "data": [] }))]);
        let client = Sora2Client::builder()
            .api_key("key-123")
            .base_url("https://example.com")
            .header("accept", "application/vnd.api+json")
            .header("X-Request-Id", "req-7")
            .transport(transport.clone())
            .build()
            .unwrap();

        client.list_models().await.unwrap();
        let request = &transport.requests()[0];
        assert_eq!(
            MockTransport::header(request, "Accept"),
            Some("application/vnd.api+json")
        );
        assert_eq!(MockTransport::header(request, "X-Request-Id"), Some("req-7"));
        // Fixed headers stay attached.
        assert_eq!(
            MockTransport::header(request, "Authorization"),
            Some("Bearer key-123")
        );
    }

    #[test]
    fn test_header_merge_is_last_wins() {
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        merge_header(&mut headers, "accept", "text/event-stream");
        merge_header(&mut headers, "X-Request-Id", "abc");

        assert_eq!(headers.len(), 3);
        assert_eq!(headers[0].1, "text/event-stream");
        assert_eq!(headers[2], ("X-Request-Id".to_string(), "abc".to_string()));
    }
}
