//! Result presentation selector.
//!
//! A pure mapping from (plan, optional adaptation, view) to what a front end
//! should show. When an adaptation exists, the roadmap and project schedule
//! come from it wholesale; the original values are never mixed in.

use std::str::FromStr;

use crate::plan::{
    AdaptationResult, GapItem, GapSeverity, GenerationResult, RequirementCategory, Skill,
    WeekBlock, WeeklyFeature,
};

/// Fallback motivation line for an adaptation that left it empty.
const DEFAULT_MOTIVATION: &str = "Keep going!";

/// The four result views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Skills,
    Gaps,
    Roadmap,
    Project,
}

impl View {
    pub const ALL: [View; 4] = [Self::Skills, Self::Gaps, Self::Roadmap, Self::Project];
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Skills => "skills",
            Self::Gaps => "gaps",
            Self::Roadmap => "roadmap",
            Self::Project => "project",
        };
        write!(f, "{s}")
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skills" => Ok(Self::Skills),
            "gaps" => Ok(Self::Gaps),
            "roadmap" => Ok(Self::Roadmap),
            "project" => Ok(Self::Project),
            other => Err(format!(
                "unknown view {other:?} (expected skills, gaps, roadmap, or project)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsView<'a> {
    pub skills: &'a [Skill],
    pub strengths: &'a [String],
    pub weaknesses: &'a [String],
    pub requirements: &'a [RequirementCategory],
}

#[derive(Debug, Clone, PartialEq)]
pub struct GapSection<'a> {
    pub severity: GapSeverity,
    pub items: &'a [GapItem],
}

#[derive(Debug, Clone, PartialEq)]
pub struct GapsView<'a> {
    /// Always critical, important, nice-to-have, in that order.
    pub sections: Vec<GapSection<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapView<'a> {
    /// True when the weeks come from an adaptation.
    pub adapted: bool,
    pub weeks: Vec<WeekBlock<'a>>,
}

impl RoadmapView<'_> {
    pub fn title(&self) -> &'static str {
        if self.adapted {
            "Adapted Roadmap"
        } else {
            "30-Day Learning Roadmap"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView<'a> {
    pub title: &'a str,
    pub problem_statement: &'a str,
    pub tech_stack: &'a [String],
    pub weekly_features: &'a [WeeklyFeature],
    pub portfolio_quality: Option<&'a str>,
    /// How the adaptation changed the project scope.
    pub scope_change: Option<&'a str>,
}

/// Renderable fields for one view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel<'a> {
    Skills(SkillsView<'a>),
    Gaps(GapsView<'a>),
    Roadmap(RoadmapView<'a>),
    Project(ProjectView<'a>),
}

/// Pick the fields to display for `view`.
pub fn select<'a>(
    plan: &'a GenerationResult,
    adaptation: Option<&'a AdaptationResult>,
    view: View,
) -> ViewModel<'a> {
    match view {
        View::Skills => ViewModel::Skills(SkillsView {
            skills: &plan.skill_map.skills,
            strengths: &plan.skill_map.strengths,
            weaknesses: &plan.skill_map.weaknesses,
            requirements: plan.role_requirements.categories(),
        }),
        View::Gaps => ViewModel::Gaps(GapsView {
            sections: GapSeverity::ALL
                .into_iter()
                .map(|severity| GapSection {
                    severity,
                    items: plan.gap_analysis.items(severity),
                })
                .collect(),
        }),
        View::Roadmap => {
            let roadmap = match adaptation {
                Some(a) => &a.adapted_roadmap,
                None => &plan.roadmap,
            };
            ViewModel::Roadmap(RoadmapView {
                adapted: adaptation.is_some(),
                weeks: roadmap.weeks(),
            })
        }
        View::Project => {
            let project = &plan.flagship_project;
            let (weekly_features, scope_change) = match adaptation {
                Some(a) => match &a.adapted_project {
                    Some(p) => (p.weekly_features.as_slice(), Some(p.changes.as_str())),
                    None => (&[][..], None),
                },
                None => (project.weekly_features.as_slice(), None),
            };
            ViewModel::Project(ProjectView {
                title: &project.title,
                problem_statement: &project.problem_statement,
                tech_stack: &project.tech_stack,
                weekly_features,
                portfolio_quality: project
                    .portfolio_quality
                    .as_deref()
                    .filter(|q| !q.trim().is_empty()),
                scope_change,
            })
        }
    }
}

/// Reasoning shown above every view, and the motivation line after an adaptation.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner<'a> {
    pub reasoning: &'a str,
    pub adapted: bool,
    pub motivation: Option<&'a str>,
}

pub fn banner<'a>(plan: &'a GenerationResult, adaptation: Option<&'a AdaptationResult>) -> Banner<'a> {
    match adaptation {
        Some(a) => Banner {
            reasoning: &a.adaptation_reasoning,
            adapted: true,
            motivation: Some(if a.motivation.trim().is_empty() {
                DEFAULT_MOTIVATION
            } else {
                a.motivation.as_str()
            }),
        },
        None => Banner {
            reasoning: &plan.reasoning,
            adapted: false,
            motivation: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{
        AdaptedProject, DayPlan, FlagshipProject, GapAnalysis, Roadmap, WeeklyMilestone,
    };

    fn day(n: u32, objective: &str) -> DayPlan {
        DayPlan {
            day: n,
            objective: objective.into(),
            resource: "docs".into(),
            task: "practice".into(),
            output: String::new(),
            hours: 2.0,
        }
    }

    fn milestone(week: u32, text: &str) -> WeeklyMilestone {
        WeeklyMilestone {
            week,
            milestone: text.into(),
            skills_gained: Vec::new(),
        }
    }

    fn feature(week: u32, name: &str) -> WeeklyFeature {
        WeeklyFeature {
            week,
            feature: name.into(),
            description: format!("{name} details"),
        }
    }

    fn plan() -> GenerationResult {
        GenerationResult {
            reasoning: "original reasoning".into(),
            gap_analysis: GapAnalysis {
                critical: vec![GapItem {
                    skill: "TypeScript".into(),
                    reason: "...".into(),
                }],
                ..Default::default()
            },
            roadmap: Roadmap {
                weekly_milestones: vec![milestone(1, "Original week 1"), milestone(2, "Original week 2")],
                days: vec![day(1, "Original day 1"), day(8, "Original day 8")],
            },
            flagship_project: FlagshipProject {
                title: "Portfolio Tracker".into(),
                problem_statement: "Track job applications".into(),
                tech_stack: vec!["React".into(), "TypeScript".into()],
                weekly_features: vec![feature(1, "Original setup"), feature(2, "Original API")],
                portfolio_quality: Some("Shows end-to-end ownership".into()),
            },
            ..Default::default()
        }
    }

    fn adaptation() -> AdaptationResult {
        AdaptationResult {
            adaptation_reasoning: "compressed weeks 2-4".into(),
            adapted_roadmap: Roadmap {
                weekly_milestones: vec![milestone(3, "Catch-up week")],
                days: vec![day(15, "Adapted day 15")],
            },
            adapted_project: Some(AdaptedProject {
                weekly_features: vec![feature(3, "Adapted MVP")],
                changes: "Dropped the polish week".into(),
            }),
            motivation: String::new(),
        }
    }

    #[test]
    fn view_parses_and_displays() {
        for view in View::ALL {
            assert_eq!(view.to_string().parse::<View>().unwrap(), view);
        }
        assert_eq!(" Roadmap ".parse::<View>().unwrap(), View::Roadmap);
        assert!("timeline".parse::<View>().is_err());
    }

    #[test]
    fn gaps_view_lists_fixed_sections() {
        let plan = plan();
        let ViewModel::Gaps(gaps) = select(&plan, None, View::Gaps) else {
            panic!("expected gaps view");
        };
        let severities: Vec<GapSeverity> = gaps.sections.iter().map(|s| s.severity).collect();
        assert_eq!(severities, GapSeverity::ALL.to_vec());
        assert_eq!(gaps.sections[0].items.len(), 1);
        assert_eq!(gaps.sections[0].items[0].skill, "TypeScript");
        assert!(gaps.sections[1].items.is_empty());
        assert!(gaps.sections[2].items.is_empty());
    }

    #[test]
    fn roadmap_uses_original_without_adaptation() {
        let plan = plan();
        let ViewModel::Roadmap(view) = select(&plan, None, View::Roadmap) else {
            panic!("expected roadmap view");
        };
        assert!(!view.adapted);
        assert_eq!(view.title(), "30-Day Learning Roadmap");
        assert_eq!(view.weeks.len(), 2);
        assert_eq!(view.weeks[1].days[0].objective, "Original day 8");
    }

    #[test]
    fn adapted_roadmap_replaces_original_entirely() {
        let plan = plan();
        let adaptation = adaptation();
        let ViewModel::Roadmap(view) = select(&plan, Some(&adaptation), View::Roadmap) else {
            panic!("expected roadmap view");
        };
        assert!(view.adapted);
        assert_eq!(view.title(), "Adapted Roadmap");
        assert_eq!(view.weeks.len(), 1);
        assert_eq!(view.weeks[0].milestone.milestone, "Catch-up week");

        let shown: Vec<&str> = view
            .weeks
            .iter()
            .flat_map(|w| {
                std::iter::once(w.milestone.milestone.as_str())
                    .chain(w.days.iter().map(|d| d.objective.as_str()))
            })
            .collect();
        assert!(shown.iter().all(|s| !s.starts_with("Original")), "{shown:?}");
    }

    #[test]
    fn empty_adapted_roadmap_still_wins() {
        let plan = plan();
        let adaptation = AdaptationResult::default();
        let ViewModel::Roadmap(view) = select(&plan, Some(&adaptation), View::Roadmap) else {
            panic!("expected roadmap view");
        };
        assert!(view.adapted);
        assert!(view.weeks.is_empty());
    }

    #[test]
    fn project_schedule_comes_from_adaptation() {
        let plan = plan();
        let adaptation = adaptation();
        let ViewModel::Project(view) = select(&plan, Some(&adaptation), View::Project) else {
            panic!("expected project view");
        };
        assert_eq!(view.title, "Portfolio Tracker");
        assert_eq!(view.weekly_features.len(), 1);
        assert_eq!(view.weekly_features[0].feature, "Adapted MVP");
        assert_eq!(view.scope_change, Some("Dropped the polish week"));

        // An adaptation without a project shows no schedule rather than the original one.
        let bare = AdaptationResult::default();
        let ViewModel::Project(view) = select(&plan, Some(&bare), View::Project) else {
            panic!("expected project view");
        };
        assert!(view.weekly_features.is_empty());
        assert!(view.scope_change.is_none());
    }

    #[test]
    fn project_without_adaptation() {
        let plan = plan();
        let ViewModel::Project(view) = select(&plan, None, View::Project) else {
            panic!("expected project view");
        };
        assert_eq!(view.weekly_features.len(), 2);
        assert_eq!(view.portfolio_quality, Some("Shows end-to-end ownership"));
        assert!(view.scope_change.is_none());
    }

    #[test]
    fn empty_plan_renders_every_view() {
        let plan = GenerationResult::default();
        for view in View::ALL {
            match select(&plan, None, view) {
                ViewModel::Skills(v) => {
                    assert!(v.skills.is_empty() && v.requirements.is_empty())
                }
                ViewModel::Gaps(v) => assert!(v.sections.iter().all(|s| s.items.is_empty())),
                ViewModel::Roadmap(v) => assert!(v.weeks.is_empty()),
                ViewModel::Project(v) => {
                    assert!(v.title.is_empty());
                    assert!(v.portfolio_quality.is_none());
                }
            }
        }
    }

    #[test]
    fn banner_prefers_adaptation() {
        let plan = plan();
        let b = banner(&plan, None);
        assert_eq!(b.reasoning, "original reasoning");
        assert!(b.motivation.is_none());

        let adaptation = adaptation();
        let b = banner(&plan, Some(&adaptation));
        assert_eq!(b.reasoning, "compressed weeks 2-4");
        assert_eq!(b.motivation, Some("Keep going!"));
    }
}
