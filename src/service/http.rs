//! HTTP client for the plan service.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::NavigatorConfig;
use crate::error::{ConfigError, ServiceError};
use crate::plan::{AdaptationRequest, AdaptationResult, GenerationResult};
use crate::session::UserProfile;

use super::{CareerService, HealthStatus, ResumeTextResponse, RolesResponse};

/// Fallback shown when a rejected upload carries no usable `detail`.
const UPLOAD_FAILED: &str = "Upload failed";

/// Plan service reached over JSON/HTTP.
pub struct HttpCareerService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCareerService {
    /// Build a client with the configured base URL and request timeout.
    pub fn new(config: &NavigatorConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self::with_client(&config.api_url, client))
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let resp = self.client.get(self.url(path)).send().await?;
        decode(path, resp).await
    }
}

/// Turn a response into `T`, treating any non-2xx status as a failure.
///
/// The body of a failed response is not assumed to be parseable.
async fn decode<T: DeserializeOwned>(
    path: &str,
    resp: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = resp.status();
    if !status.is_success() {
        warn!(path, status = status.as_u16(), "Plan service returned an error status");
        return Err(ServiceError::Status {
            status: status.as_u16(),
        });
    }
    resp.json::<T>().await.map_err(|e| {
        warn!(path, error = %e, "Plan service returned an undecodable body");
        ServiceError::Network {
            reason: format!("invalid response from {path}: {e}"),
        }
    })
}

/// Pull the server's `detail` message out of a rejected upload.
fn upload_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail")?.as_str().map(str::to_string))
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| UPLOAD_FAILED.to_string())
}

#[async_trait]
impl CareerService for HttpCareerService {
    async fn fetch_role_options(&self) -> Result<Vec<String>, ServiceError> {
        let body: RolesResponse = self.get_json("/roles").await?;
        Ok(body.roles)
    }

    async fn fetch_sample_profile(&self) -> Result<String, ServiceError> {
        let body: ResumeTextResponse = self.get_json("/sample-resume").await?;
        Ok(body.resume_text)
    }

    async fn upload_resume_file(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<String, ServiceError> {
        let size = bytes.len();
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        let resp = self
            .client
            .post(self.url("/upload-resume"))
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let detail = upload_detail(&body);
            warn!(filename, status = status.as_u16(), %detail, "Resume upload rejected");
            return Err(ServiceError::Upload { detail });
        }

        let body: ResumeTextResponse = decode("/upload-resume", resp).await?;
        info!(filename, bytes = size, chars = body.resume_text.len(), "Resume text extracted");
        Ok(body.resume_text)
    }

    async fn generate(&self, profile: &UserProfile) -> Result<GenerationResult, ServiceError> {
        info!(dream_role = %profile.dream_role, github = profile.github_username.is_some(), "Requesting plan generation");
        let resp = self
            .client
            .post(self.url("/generate-roadmap"))
            .json(profile)
            .send()
            .await?;
        decode("/generate-roadmap", resp).await
    }

    async fn adapt(&self, request: &AdaptationRequest) -> Result<AdaptationResult, ServiceError> {
        info!(
            days_completed = request.days_completed,
            days_missed = request.days_missed,
            confidence = request.confidence,
            "Requesting plan adaptation"
        );
        let resp = self
            .client
            .post(self.url("/adapt-roadmap"))
            .json(request)
            .send()
            .await?;
        decode("/adapt-roadmap", resp).await
    }

    async fn health_check(&self) -> Result<HealthStatus, ServiceError> {
        self.get_json("/health").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let service = HttpCareerService::with_client("http://localhost:8000/", reqwest::Client::new());
        assert_eq!(service.base_url(), "http://localhost:8000");
        assert_eq!(service.url("/roles"), "http://localhost:8000/roles");
    }

    #[test]
    fn upload_detail_from_error_body() {
        assert_eq!(
            upload_detail(r#"{"detail": "Only PDF files are accepted."}"#),
            "Only PDF files are accepted."
        );
    }

    #[test]
    fn upload_detail_falls_back_when_unusable() {
        assert_eq!(upload_detail("Internal Server Error"), UPLOAD_FAILED);
        assert_eq!(upload_detail(r#"{"detail": ""}"#), UPLOAD_FAILED);
        // Validation errors come back as a list of objects
        assert_eq!(
            upload_detail(r#"{"detail": [{"loc": ["body", "file"], "msg": "field required"}]}"#),
            UPLOAD_FAILED
        );
    }

    #[test]
    fn new_uses_configured_url() {
        let config = NavigatorConfig {
            api_url: "http://127.0.0.1:9999".into(),
            ..Default::default()
        };
        let service = HttpCareerService::new(&config).unwrap();
        assert_eq!(service.base_url(), "http://127.0.0.1:9999");
    }
}
