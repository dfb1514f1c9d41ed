//! Stage state machine: which screen of the workflow is active.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The stages of a planning session.
///
/// CollectingInput → AwaitingGeneration → DisplayingResults
/// [→ AwaitingAdaptation → DisplayingResults], with reset back to the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    CollectingInput,
    AwaitingGeneration,
    DisplayingResults,
    AwaitingAdaptation,
}

impl Stage {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Reset to `CollectingInput` is allowed from every stage and is not
    /// listed here.
    pub fn can_transition_to(&self, target: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (CollectingInput, AwaitingGeneration)
                | (AwaitingGeneration, DisplayingResults)
                | (AwaitingGeneration, CollectingInput)
                | (DisplayingResults, AwaitingAdaptation)
                | (AwaitingAdaptation, DisplayingResults)
        )
    }

    /// Whether a network operation is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::AwaitingGeneration | Self::AwaitingAdaptation)
    }

    /// The kind of pending work, if any.
    pub fn pending_kind(&self) -> Option<PendingKind> {
        match self {
            Self::AwaitingGeneration => Some(PendingKind::Generate),
            Self::AwaitingAdaptation => Some(PendingKind::Adapt),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CollectingInput => "collecting_input",
            Self::AwaitingGeneration => "awaiting_generation",
            Self::DisplayingResults => "displaying_results",
            Self::AwaitingAdaptation => "awaiting_adaptation",
        };
        write!(f, "{s}")
    }
}

/// Which remote operation a pending stage is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    Generate,
    Adapt,
}

impl PendingKind {
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Generate => "Career Brain is analyzing...",
            Self::Adapt => "Career Brain is re-planning...",
        }
    }

    /// Progress steps revealed one at a time while waiting.
    pub fn steps(&self) -> &'static [&'static str] {
        match self {
            Self::Generate => &[
                "Parsing resume and extracting skills...",
                "Analyzing dream role requirements...",
                "Computing skill gap analysis...",
                "Designing 30-day adaptive roadmap...",
                "Building flagship project plan...",
                "Finalizing personalized recommendations...",
            ],
            Self::Adapt => &[
                "Analyzing progress vs. original plan...",
                "Identifying missed critical content...",
                "Compressing remaining curriculum...",
                "Adjusting flagship project scope...",
                "Generating motivation and new milestones...",
            ],
        }
    }
}

/// A recorded stage change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTransition {
    pub from: Stage,
    pub to: Stage,
    pub timestamp: DateTime<Utc>,
    /// Why the stage changed, e.g. "submitted", "generate failed".
    pub reason: String,
}

impl StageTransition {
    pub fn new(from: Stage, to: Stage, reason: impl Into<String>) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
            reason: reason.into(),
        }
    }
}
