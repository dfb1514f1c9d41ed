//! Profile input collected before a plan is generated.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The user's pick from the role selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoleChoice {
    /// Nothing selected yet.
    #[default]
    Unselected,
    /// One of the offered roles.
    Listed(String),
    /// The "custom" entry, with whatever the user typed for it.
    Custom(String),
}

impl RoleChoice {
    /// The role that would be submitted, trimmed. Empty when there is none.
    pub fn effective(&self) -> &str {
        match self {
            Self::Unselected => "",
            Self::Listed(role) | Self::Custom(role) => role.trim(),
        }
    }
}

/// Progress of the last resume upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Extracting { filename: String },
    Loaded { filename: String },
    Failed { detail: String },
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extracting { .. } => write!(f, "Extracting text..."),
            Self::Loaded { filename } => write!(f, "PDF loaded ({filename})"),
            Self::Failed { detail } => write!(f, "{detail}"),
        }
    }
}

/// Input being typed in the collecting stage. Never cleared by a failed submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub resume_text: String,
    pub github_username: String,
    pub role: RoleChoice,
    pub upload: Option<UploadStatus>,
}

impl ProfileDraft {
    /// Pick a listed role. Any previously typed custom role is dropped.
    pub fn select_role(&mut self, role: impl Into<String>) {
        self.role = RoleChoice::Listed(role.into());
    }

    /// Switch to (or keep editing) the custom role entry.
    pub fn set_custom_role(&mut self, text: impl Into<String>) {
        self.role = RoleChoice::Custom(text.into());
    }

    /// Validate and turn the draft into a submittable profile.
    pub fn to_profile(&self) -> Result<UserProfile, ValidationError> {
        if self.resume_text.trim().is_empty() {
            return Err(ValidationError::MissingResume);
        }
        let dream_role = self.role.effective();
        if dream_role.is_empty() {
            return Err(ValidationError::MissingRole);
        }
        let github = self.github_username.trim();
        Ok(UserProfile {
            resume_text: self.resume_text.clone(),
            dream_role: dream_role.to_string(),
            github_username: (!github.is_empty()).then(|| github.to_string()),
        })
    }
}

/// A validated profile, as sent to the generate endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub resume_text: String,
    pub dream_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
}
