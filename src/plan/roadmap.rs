//! Day-by-day roadmap and its grouping into weekly milestones.

use serde::{Deserialize, Serialize};

use super::model::lenient;

/// Length of a roadmap week in days.
pub const DAYS_PER_WEEK: u32 = 7;

fn default_hours() -> f64 {
    2.0
}

/// One day of the learning plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub task: String,
    /// Expected artifact at the end of the day.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output: String,
    #[serde(default = "default_hours")]
    pub hours: f64,
}

impl DayPlan {
    /// Week this day falls in: `ceil(day / 7)`.
    pub fn week(&self) -> u32 {
        week_of_day(self.day)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMilestone {
    #[serde(default)]
    pub week: u32,
    #[serde(default)]
    pub milestone: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub skills_gained: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default, deserialize_with = "lenient")]
    pub weekly_milestones: Vec<WeeklyMilestone>,
    #[serde(default, deserialize_with = "lenient")]
    pub days: Vec<DayPlan>,
}

/// A milestone together with the days shown under it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBlock<'a> {
    pub milestone: &'a WeeklyMilestone,
    pub days: Vec<&'a DayPlan>,
}

pub fn week_of_day(day: u32) -> u32 {
    day.div_ceil(DAYS_PER_WEEK)
}

impl Roadmap {
    /// Group days under their milestones, in milestone order.
    ///
    /// A day belongs to the milestone whose week is `ceil(day / 7)`. When no
    /// day matches a milestone carrying the first milestone's week, every day
    /// is listed under it instead; other unmatched milestones get no days.
    pub fn weeks(&self) -> Vec<WeekBlock<'_>> {
        let first_week = self.weekly_milestones.first().map(|m| m.week);

        self.weekly_milestones
            .iter()
            .map(|milestone| {
                let mut days: Vec<&DayPlan> = self
                    .days
                    .iter()
                    .filter(|d| d.week() == milestone.week)
                    .collect();
                if days.is_empty() && Some(milestone.week) == first_week {
                    days = self.days.iter().collect();
                }
                WeekBlock { milestone, days }
            })
            .collect()
    }

    /// Days that no milestone claims by week number.
    ///
    /// These are hidden by [`Roadmap::weeks`] unless the first-milestone
    /// fallback kicks in, so callers can warn about a mismatched plan.
    pub fn unplaced_days(&self) -> Vec<&DayPlan> {
        self.days
            .iter()
            .filter(|d| !self.weekly_milestones.iter().any(|m| m.week == d.week()))
            .collect()
    }

    pub fn total_hours(&self) -> f64 {
        self.days.iter().map(|d| d.hours).sum()
    }
}
