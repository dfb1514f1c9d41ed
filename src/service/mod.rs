//! Remote plan service: the request/response calls the navigator depends on.
//!
//! The service itself (skill extraction, gap analysis, roadmap and project
//! generation, PDF text extraction) is opaque; only its contract lives here.
//! None of the calls retry: the user decides whether to resubmit.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::plan::{AdaptationRequest, AdaptationResult, GenerationResult};
use crate::session::UserProfile;

pub use http::HttpCareerService;

/// Operations offered by the plan service.
#[async_trait]
pub trait CareerService: Send + Sync {
    /// Roles for the selector. Callers fall back to a fixed list on failure.
    async fn fetch_role_options(&self) -> Result<Vec<String>, ServiceError>;

    /// Sample resume text for pre-filling the input.
    async fn fetch_sample_profile(&self) -> Result<String, ServiceError>;

    /// Extract text from an uploaded document.
    ///
    /// A rejected upload is a [`ServiceError::Upload`] carrying the server's
    /// message, which must be shown to the user verbatim.
    async fn upload_resume_file(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<String, ServiceError>;

    /// Generate a full plan for a profile.
    async fn generate(&self, profile: &UserProfile) -> Result<GenerationResult, ServiceError>;

    /// Revise the last generated plan after a progress deviation.
    async fn adapt(&self, request: &AdaptationRequest) -> Result<AdaptationResult, ServiceError>;

    /// Liveness probe.
    async fn health_check(&self) -> Result<HealthStatus, ServiceError>;
}

/// Body of `GET /roles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolesResponse {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Body of `GET /sample-resume` and a successful `POST /upload-resume`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeTextResponse {
    #[serde(default)]
    pub resume_text: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub agent: String,
    #[serde(default)]
    pub version: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
