//! Re-planning after a progress deviation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::model::{WeeklyFeature, lenient};
use super::roadmap::Roadmap;

/// Number of days in a generated roadmap.
pub const ROADMAP_DAYS: u32 = 30;

/// Lowest and highest self-reported confidence.
pub const CONFIDENCE_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A simulated progress deviation sent to the adapt endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptationRequest {
    pub days_completed: u32,
    pub days_missed: u32,
    pub reason: String,
    /// 1 (lost) to 5 (on top of it).
    pub confidence: u8,
}

impl AdaptationRequest {
    /// Build a request, rejecting values the service would not accept.
    pub fn new(
        days_completed: u32,
        days_missed: u32,
        reason: impl Into<String>,
        confidence: u8,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            days_completed,
            days_missed,
            reason: reason.into(),
            confidence,
        };
        request.validate()?;
        Ok(request)
    }

    /// Completed the first week, then lost the second one to exams.
    pub fn missed_week() -> Self {
        Self {
            days_completed: 7,
            days_missed: 7,
            reason: "Fell behind due to exams and personal commitments".to_string(),
            confidence: 4,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.days_completed > ROADMAP_DAYS {
            return Err(ValidationError::InvalidAdaptation {
                field: "days_completed",
                reason: format!("must be at most {ROADMAP_DAYS}"),
            });
        }
        if self.days_missed > ROADMAP_DAYS {
            return Err(ValidationError::InvalidAdaptation {
                field: "days_missed",
                reason: format!("must be at most {ROADMAP_DAYS}"),
            });
        }
        if !CONFIDENCE_RANGE.contains(&self.confidence) {
            return Err(ValidationError::InvalidAdaptation {
                field: "confidence",
                reason: format!(
                    "must be between {} and {}",
                    CONFIDENCE_RANGE.start(),
                    CONFIDENCE_RANGE.end()
                ),
            });
        }
        Ok(())
    }
}

impl Default for AdaptationRequest {
    fn default() -> Self {
        Self::missed_week()
    }
}

/// Project schedule changes that go with an adapted roadmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdaptedProject {
    #[serde(default, deserialize_with = "lenient")]
    pub weekly_features: Vec<WeeklyFeature>,
    /// Summary of how the scope changed.
    #[serde(default)]
    pub changes: String,
}

/// Output of a successful adapt call. Overlays the original plan, never merged into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdaptationResult {
    #[serde(default)]
    pub adaptation_reasoning: String,
    #[serde(default, deserialize_with = "lenient")]
    pub adapted_roadmap: Roadmap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapted_project: Option<AdaptedProject>,
    #[serde(default)]
    pub motivation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missed_week_is_valid() {
        let req = AdaptationRequest::missed_week();
        assert_eq!(req.days_completed, 7);
        assert_eq!(req.days_missed, 7);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            AdaptationRequest::new(31, 0, "", 3),
            Err(ValidationError::InvalidAdaptation { field: "days_completed", .. })
        ));
        assert!(matches!(
            AdaptationRequest::new(0, 40, "", 3),
            Err(ValidationError::InvalidAdaptation { field: "days_missed", .. })
        ));
        assert!(matches!(
            AdaptationRequest::new(3, 3, "", 0),
            Err(ValidationError::InvalidAdaptation { field: "confidence", .. })
        ));
        assert!(AdaptationRequest::new(3, 3, "", 6).is_err());
        assert!(AdaptationRequest::new(30, 0, "done early", 5).is_ok());
    }

    #[test]
    fn request_wire_shape() {
        let json = serde_json::to_value(AdaptationRequest::missed_week()).unwrap();
        assert_eq!(json["days_completed"], 7);
        assert_eq!(json["days_missed"], 7);
        assert_eq!(json["confidence"], 4);
        assert!(json["reason"].as_str().unwrap().contains("exams"));
    }

    #[test]
    fn adapted_project_is_optional() {
        let result: AdaptationResult = serde_json::from_str(
            r#"{"adaptation_reasoning": "compressed", "adapted_roadmap": null, "motivation": "Go"}"#,
        )
        .unwrap();
        assert!(result.adapted_project.is_none());
        assert!(result.adapted_roadmap.days.is_empty());

        let result: AdaptationResult = serde_json::from_str(
            r#"{"adapted_project": {"changes": "Dropped week 4 polish", "weekly_features": null}}"#,
        )
        .unwrap();
        let project = result.adapted_project.unwrap();
        assert_eq!(project.changes, "Dropped week 4 polish");
        assert!(project.weekly_features.is_empty());
    }
}
