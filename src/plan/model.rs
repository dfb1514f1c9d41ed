//! Generated plan data models.
//!
//! Every container is tolerant of the plan service leaving it out or sending
//! `null`: such fields deserialize to empty values instead of failing.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::roadmap::Roadmap;

/// Deserialize `null` the same way as an absent field.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// How well the user already knows a skill.
///
/// Unknown level strings are read as `Beginner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Star rating shown next to the skill name.
    pub fn stars(&self) -> &'static str {
        match self {
            Self::Beginner => "★",
            Self::Intermediate => "★★",
            Self::Advanced => "★★★",
        }
    }
}

impl From<String> for SkillLevel {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "advanced" => Self::Advanced,
            "intermediate" => Self::Intermediate,
            _ => Self::Beginner,
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
    /// e.g. "technical", "tool", "soft".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
}

/// Skills extracted from the resume, plus the service's read on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMap {
    #[serde(default, deserialize_with = "lenient")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "lenient")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub weaknesses: Vec<String>,
}

/// One category of skills the dream role requires.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementCategory {
    /// Raw category key, e.g. `core_technical`.
    pub name: String,
    pub skills: Vec<String>,
}

impl RequirementCategory {
    /// Category name for display, underscores turned into spaces.
    pub fn label(&self) -> String {
        self.name.replace('_', " ")
    }
}

/// Category name to required skills, in the order the service sent them.
///
/// On the wire this is a JSON object; it is kept as a list so the service's
/// category order survives deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleRequirements(pub Vec<RequirementCategory>);

impl RoleRequirements {
    pub fn categories(&self) -> &[RequirementCategory] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.skills.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RoleRequirements {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in &self.0 {
            map.serialize_entry(&category.name, &category.skills)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RoleRequirements {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = RoleRequirements;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to required skills")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(RoleRequirements::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, skills)) =
                    access.next_entry::<String, Option<Vec<String>>>()?
                {
                    categories.push(RequirementCategory {
                        name,
                        skills: skills.unwrap_or_default(),
                    });
                }
                Ok(RoleRequirements(categories))
            }
        }

        deserializer.deserialize_any(CategoriesVisitor)
    }
}

/// A missing skill and why it matters for the role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapItem {
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub reason: String,
}

/// The three fixed gap buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapSeverity {
    Critical,
    Important,
    NiceToHave,
}

impl GapSeverity {
    /// All buckets in display order.
    pub const ALL: [GapSeverity; 3] = [Self::Critical, Self::Important, Self::NiceToHave];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Important => "Important",
            Self::NiceToHave => "Nice to Have",
        }
    }
}

impl fmt::Display for GapSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Critical => "critical",
            Self::Important => "important",
            Self::NiceToHave => "nice_to_have",
        };
        write!(f, "{s}")
    }
}

/// Missing skills grouped by severity. Absent buckets are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    #[serde(default, deserialize_with = "lenient")]
    pub critical: Vec<GapItem>,
    #[serde(default, deserialize_with = "lenient")]
    pub important: Vec<GapItem>,
    #[serde(default, deserialize_with = "lenient")]
    pub nice_to_have: Vec<GapItem>,
}

impl GapAnalysis {
    pub fn items(&self, severity: GapSeverity) -> &[GapItem] {
        match severity {
            GapSeverity::Critical => &self.critical,
            GapSeverity::Important => &self.important,
            GapSeverity::NiceToHave => &self.nice_to_have,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyFeature {
    #[serde(default)]
    pub week: u32,
    #[serde(default)]
    pub feature: String,
    #[serde(default)]
    pub description: String,
}

/// Portfolio project built alongside the roadmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagshipProject {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub problem_statement: String,
    #[serde(default, deserialize_with = "lenient")]
    pub tech_stack: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub weekly_features: Vec<WeeklyFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_quality: Option<String>,
}

/// The complete output of one successful generate call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default)]
    pub reasoning: String,
    #[serde(default, deserialize_with = "lenient")]
    pub skill_map: SkillMap,
    #[serde(default)]
    pub role_requirements: RoleRequirements,
    #[serde(default, deserialize_with = "lenient")]
    pub gap_analysis: GapAnalysis,
    #[serde(default, deserialize_with = "lenient")]
    pub roadmap: Roadmap,
    #[serde(default, deserialize_with = "lenient")]
    pub flagship_project: FlagshipProject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_deserializes_to_empty_plan() {
        let plan: GenerationResult = serde_json::from_str("{}").unwrap();
        assert_eq!(plan, GenerationResult::default());
        assert!(plan.gap_analysis.critical.is_empty());
        assert!(plan.role_requirements.is_empty());
        assert!(plan.roadmap.days.is_empty());
    }

    #[test]
    fn null_containers_are_treated_as_empty() {
        let plan: GenerationResult = serde_json::from_str(
            r#"{
                "reasoning": "ok",
                "skill_map": {"skills": null, "strengths": ["Python"]},
                "role_requirements": null,
                "gap_analysis": {"critical": null},
                "roadmap": null,
                "flagship_project": {"title": "Tracker", "tech_stack": null}
            }"#,
        )
        .unwrap();
        assert!(plan.skill_map.skills.is_empty());
        assert_eq!(plan.skill_map.strengths, vec!["Python"]);
        assert!(plan.role_requirements.is_empty());
        assert!(plan.gap_analysis.critical.is_empty());
        assert!(plan.roadmap.weekly_milestones.is_empty());
        assert_eq!(plan.flagship_project.title, "Tracker");
        assert!(plan.flagship_project.tech_stack.is_empty());
        assert!(plan.flagship_project.portfolio_quality.is_none());
    }

    #[test]
    fn missing_gap_buckets_are_empty() {
        let gaps: GapAnalysis = serde_json::from_str(
            r#"{"important": [{"skill": "Docker", "reason": "deploys"}]}"#,
        )
        .unwrap();
        assert!(gaps.items(GapSeverity::Critical).is_empty());
        assert_eq!(gaps.items(GapSeverity::Important)[0].skill, "Docker");
        assert!(gaps.items(GapSeverity::NiceToHave).is_empty());
    }

    #[test]
    fn skill_levels_parse_and_tolerate_unknowns() {
        let map: SkillMap = serde_json::from_str(
            r#"{"skills": [
                {"name": "Rust", "level": "advanced", "category": "technical"},
                {"name": "Git", "level": "Intermediate"},
                {"name": "Juggling", "level": "expert"},
                {"name": "SQL"}
            ]}"#,
        )
        .unwrap();
        let levels: Vec<SkillLevel> = map.skills.iter().map(|s| s.level).collect();
        assert_eq!(
            levels,
            vec![
                SkillLevel::Advanced,
                SkillLevel::Intermediate,
                SkillLevel::Beginner,
                SkillLevel::Beginner,
            ]
        );
        assert_eq!(map.skills[0].category, "technical");
        assert_eq!(SkillLevel::Advanced.stars(), "★★★");
    }

    #[test]
    fn skill_level_serializes_lowercase() {
        let json = serde_json::to_string(&SkillLevel::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");
    }

    #[test]
    fn role_requirements_keep_service_order() {
        let reqs: RoleRequirements = serde_json::from_str(
            r#"{"theory_math": ["Linear algebra"], "core_technical": ["Python", "PyTorch"], "tools": null}"#,
        )
        .unwrap();
        let names: Vec<&str> = reqs.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["theory_math", "core_technical", "tools"]);
        assert_eq!(reqs.categories()[0].label(), "theory math");
        assert_eq!(reqs.get("core_technical").unwrap().len(), 2);
        assert!(reqs.get("tools").unwrap().is_empty());

        let json = serde_json::to_value(&reqs).unwrap();
        assert_eq!(json["core_technical"][1], "PyTorch");
    }
}
