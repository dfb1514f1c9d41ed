//! Coordinates the session stage, the profile draft, and the two
//! remote operations that move a session forward (generate, adapt).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{DEFAULT_ROLES, NavigatorConfig, SAMPLE_PLACEHOLDER};
use crate::error::{self, NavigatorError, ServiceError};
use crate::plan::{AdaptationRequest, AdaptationResult, GenerationResult};
use crate::service::{CareerService, HealthStatus, HttpCareerService};

use super::profile::{ProfileDraft, UploadStatus};
use super::stage::{Stage, StageTransition};

/// Transitions kept per session.
const MAX_HISTORY: usize = 64;

/// How a generate or adapt request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The response was applied and the grace delay elapsed.
    Completed(Stage),
    /// The remote call failed; the stage was rolled back and the error surfaced.
    RolledBack { stage: Stage, error: ServiceError },
    /// The session was reset while the request was in flight; its result was dropped.
    Discarded,
}

/// Read-only copy of the session, for rendering.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub session_id: Uuid,
    pub stage: Stage,
    pub draft: ProfileDraft,
    pub roles: Vec<String>,
    pub plan: Option<GenerationResult>,
    pub adaptation: Option<AdaptationResult>,
    /// The request that produced `adaptation`.
    pub adaptation_request: Option<AdaptationRequest>,
    pub error: Option<String>,
}

impl Snapshot {
    /// Adapting is offered once per session, from the results stage.
    pub fn adaptation_offered(&self) -> bool {
        self.stage == Stage::DisplayingResults && self.adaptation.is_none()
    }
}

#[derive(Debug)]
struct Session {
    id: Uuid,
    stage: Stage,
    draft: ProfileDraft,
    roles: Vec<String>,
    plan: Option<GenerationResult>,
    adaptation: Option<AdaptationResult>,
    adaptation_request: Option<AdaptationRequest>,
    error: Option<String>,
    /// Bumped on reset; in-flight work started under an older epoch is stale.
    epoch: u64,
    /// Cancels the pending grace delay, if one is running.
    grace: Option<CancellationToken>,
    history: Vec<StageTransition>,
}

impl Session {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: Stage::CollectingInput,
            draft: ProfileDraft::default(),
            roles: DEFAULT_ROLES.iter().map(|r| r.to_string()).collect(),
            plan: None,
            adaptation: None,
            adaptation_request: None,
            error: None,
            epoch: 0,
            grace: None,
            history: Vec::new(),
        }
    }

    fn record(&mut self, from: Stage, to: Stage, reason: &str) {
        info!(session_id = %self.id, %from, %to, reason, "Stage transition");
        self.history.push(StageTransition::new(from, to, reason));
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
    }

    /// Move to `to`, clearing any surfaced error.
    fn transition(&mut self, to: Stage, reason: &str) -> Result<(), NavigatorError> {
        if !self.stage.can_transition_to(to) {
            return Err(NavigatorError::InvalidTransition {
                stage: self.stage,
                action: "change stage",
            });
        }
        let from = self.stage;
        self.stage = to;
        self.error = None;
        self.record(from, to, reason);
        Ok(())
    }

    fn require(&self, stage: Stage, action: &'static str) -> Result<(), NavigatorError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(NavigatorError::InvalidTransition {
                stage: self.stage,
                action,
            })
        }
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    fn upload_pending(&self) -> bool {
        matches!(self.draft.upload, Some(UploadStatus::Extracting { .. }))
    }
}

/// Owns one planning session and drives it through its stages.
///
/// Cheap to clone; clones share the same session. At most one generate or
/// adapt request is in flight at a time, enforced by the stage checks.
#[derive(Clone)]
pub struct Navigator {
    service: Arc<dyn CareerService>,
    grace_delay: Duration,
    session: Arc<RwLock<Session>>,
}

impl Navigator {
    pub fn new(service: Arc<dyn CareerService>, grace_delay: Duration) -> Self {
        Self {
            service,
            grace_delay,
            session: Arc::new(RwLock::new(Session::new())),
        }
    }

    /// Navigator over the HTTP plan service described by `config`.
    pub fn connect(config: &NavigatorConfig) -> error::Result<Self> {
        let service = HttpCareerService::new(config)?;
        Ok(Self::new(Arc::new(service), config.grace_delay))
    }

    pub async fn health(&self) -> Result<HealthStatus, ServiceError> {
        self.service.health_check().await
    }

    /// Load the role list. Falls back to [`DEFAULT_ROLES`] if the service is unavailable.
    pub async fn bootstrap(&self) -> Vec<String> {
        let roles = match self.service.fetch_role_options().await {
            Ok(roles) if !roles.is_empty() => roles,
            Ok(_) => {
                warn!("Plan service offered no roles, using defaults");
                default_roles()
            }
            Err(e) => {
                warn!(error = %e, "Could not load roles, using defaults");
                default_roles()
            }
        };
        let mut session = self.session.write().await;
        session.roles = roles.clone();
        roles
    }

    pub async fn snapshot(&self) -> Snapshot {
        let s = self.session.read().await;
        Snapshot {
            session_id: s.id,
            stage: s.stage,
            draft: s.draft.clone(),
            roles: s.roles.clone(),
            plan: s.plan.clone(),
            adaptation: s.adaptation.clone(),
            adaptation_request: s.adaptation_request.clone(),
            error: s.error.clone(),
        }
    }

    pub async fn stage(&self) -> Stage {
        self.session.read().await.stage
    }

    pub async fn error(&self) -> Option<String> {
        self.session.read().await.error.clone()
    }

    pub async fn history(&self) -> Vec<StageTransition> {
        self.session.read().await.history.clone()
    }

    pub async fn dismiss_error(&self) {
        self.session.write().await.error = None;
    }

    /// Edit the profile draft. Only offered while collecting input.
    pub async fn edit_draft<R>(
        &self,
        edit: impl FnOnce(&mut ProfileDraft) -> R,
    ) -> Result<R, NavigatorError> {
        let mut s = self.session.write().await;
        s.require(Stage::CollectingInput, "edit the profile")?;
        Ok(edit(&mut s.draft))
    }

    /// Pre-fill the resume text with the service's sample, or a placeholder.
    pub async fn load_sample(&self) -> Result<(), NavigatorError> {
        let epoch = {
            let s = self.session.read().await;
            s.require(Stage::CollectingInput, "load the sample resume")?;
            s.epoch
        };

        let text = match self.service.fetch_sample_profile().await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Sample resume unavailable, using placeholder");
                SAMPLE_PLACEHOLDER.to_string()
            }
        };

        let mut s = self.session.write().await;
        if s.is_current(epoch) && s.stage == Stage::CollectingInput {
            s.draft.resume_text = text;
        }
        Ok(())
    }

    /// Upload a document and use its extracted text as the resume.
    ///
    /// A rejected upload is reported through the returned status; the resume
    /// text is left as it was.
    pub async fn upload_resume(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<UploadStatus, NavigatorError> {
        let epoch = {
            let mut s = self.session.write().await;
            s.require(Stage::CollectingInput, "upload a resume")?;
            if s.upload_pending() {
                return Err(NavigatorError::UploadInProgress);
            }
            s.draft.upload = Some(UploadStatus::Extracting {
                filename: filename.to_string(),
            });
            s.epoch
        };

        let result = self.service.upload_resume_file(bytes, filename).await;

        let mut s = self.session.write().await;
        // Only the upload still shown as extracting, in the same session and
        // stage, may touch the draft.
        let applies =
            s.is_current(epoch) && s.stage == Stage::CollectingInput && s.upload_pending();
        let status = match result {
            Ok(text) => {
                if applies {
                    s.draft.resume_text = text;
                }
                UploadStatus::Loaded {
                    filename: filename.to_string(),
                }
            }
            Err(e) => UploadStatus::Failed {
                detail: e.to_string(),
            },
        };
        if applies {
            s.draft.upload = Some(status.clone());
        }
        Ok(status)
    }

    /// Validate the draft and request a plan.
    ///
    /// Validation failures are surfaced and returned without any network call.
    /// Remote failures roll back to input with the draft untouched.
    pub async fn submit(&self) -> Result<Outcome, NavigatorError> {
        let (profile, epoch) = {
            let mut s = self.session.write().await;
            s.require(Stage::CollectingInput, "submit a profile")?;
            if s.upload_pending() {
                return Err(NavigatorError::UploadInProgress);
            }
            let profile = match s.draft.to_profile() {
                Ok(profile) => profile,
                Err(e) => {
                    debug!(error = %e, "Profile rejected");
                    s.error = Some(e.to_string());
                    return Err(e.into());
                }
            };
            s.transition(Stage::AwaitingGeneration, "profile submitted")?;
            (profile, s.epoch)
        };

        let result = self.service.generate(&profile).await;

        let token = {
            let mut s = self.session.write().await;
            if !s.is_current(epoch) {
                debug!(session_id = %s.id, "Discarding stale generate response");
                return Ok(Outcome::Discarded);
            }
            match result {
                Ok(plan) => {
                    info!(
                        session_id = %s.id,
                        days = plan.roadmap.days.len(),
                        critical_gaps = plan.gap_analysis.critical.len(),
                        "Plan received"
                    );
                    s.plan = Some(plan);
                    s.draft = ProfileDraft::default();
                    let token = CancellationToken::new();
                    s.grace = Some(token.clone());
                    token
                }
                Err(error) => {
                    warn!(session_id = %s.id, %error, "Plan generation failed");
                    s.transition(Stage::CollectingInput, "generation failed")?;
                    s.error = Some(error.to_string());
                    return Ok(Outcome::RolledBack {
                        stage: Stage::CollectingInput,
                        error,
                    });
                }
            }
        };

        self.settle(epoch, token, "plan generated").await
    }

    /// Request a revised plan. Offered once, from the results stage.
    ///
    /// Remote failures fall back to the original results, never to input.
    pub async fn request_adaptation(
        &self,
        request: AdaptationRequest,
    ) -> Result<Outcome, NavigatorError> {
        let epoch = {
            let mut s = self.session.write().await;
            s.require(Stage::DisplayingResults, "request an adaptation")?;
            if s.adaptation.is_some() {
                return Err(NavigatorError::InvalidTransition {
                    stage: s.stage,
                    action: "adapt an already adapted plan",
                });
            }
            if let Err(e) = request.validate() {
                s.error = Some(e.to_string());
                return Err(e.into());
            }
            s.transition(Stage::AwaitingAdaptation, "adaptation requested")?;
            s.epoch
        };

        let result = self.service.adapt(&request).await;

        let token = {
            let mut s = self.session.write().await;
            if !s.is_current(epoch) {
                debug!(session_id = %s.id, "Discarding stale adapt response");
                return Ok(Outcome::Discarded);
            }
            match result {
                Ok(adaptation) => {
                    info!(
                        session_id = %s.id,
                        days = adaptation.adapted_roadmap.days.len(),
                        "Adapted plan received"
                    );
                    s.adaptation = Some(adaptation);
                    s.adaptation_request = Some(request);
                    let token = CancellationToken::new();
                    s.grace = Some(token.clone());
                    token
                }
                Err(error) => {
                    warn!(session_id = %s.id, %error, "Plan adaptation failed");
                    s.transition(Stage::DisplayingResults, "adaptation failed")?;
                    s.error = Some(error.to_string());
                    return Ok(Outcome::RolledBack {
                        stage: Stage::DisplayingResults,
                        error,
                    });
                }
            }
        };

        self.settle(epoch, token, "plan adapted").await
    }

    /// Wait out the grace delay, then show the results. Reset cancels the wait.
    async fn settle(
        &self,
        epoch: u64,
        token: CancellationToken,
        reason: &str,
    ) -> Result<Outcome, NavigatorError> {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Grace delay cancelled by reset");
                return Ok(Outcome::Discarded);
            }
            _ = tokio::time::sleep(self.grace_delay) => {}
        }

        let mut s = self.session.write().await;
        if !s.is_current(epoch) {
            return Ok(Outcome::Discarded);
        }
        s.grace = None;
        s.transition(Stage::DisplayingResults, reason)?;
        Ok(Outcome::Completed(Stage::DisplayingResults))
    }

    /// Clear the plan, the adaptation, and the draft, and return to input.
    ///
    /// Safe from any stage, including while a request is in flight.
    pub async fn reset(&self) {
        let mut s = self.session.write().await;
        if let Some(token) = s.grace.take() {
            token.cancel();
        }
        s.epoch += 1;
        s.plan = None;
        s.adaptation = None;
        s.adaptation_request = None;
        s.draft = ProfileDraft::default();
        s.error = None;
        let from = s.stage;
        s.stage = Stage::CollectingInput;
        s.record(from, Stage::CollectingInput, "reset");
    }
}

fn default_roles() -> Vec<String> {
    DEFAULT_ROLES.iter().map(|r| r.to_string()).collect()
}
