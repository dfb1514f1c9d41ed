//! Plan data model: what the plan service returns for a generate or adapt call.
//!
//! These types carry no behavior beyond tolerant deserialization and the
//! day-to-milestone grouping used when displaying a roadmap.

pub mod adaptation;
pub mod model;
pub mod roadmap;

pub use adaptation::{AdaptationRequest, AdaptationResult, AdaptedProject};
pub use model::{
    FlagshipProject, GapAnalysis, GapItem, GapSeverity, GenerationResult, RequirementCategory,
    RoleRequirements, Skill, SkillLevel, SkillMap, WeeklyFeature,
};
pub use roadmap::{DayPlan, Roadmap, WeekBlock, WeeklyMilestone, week_of_day};
