//! Plain-text rendering of view models for the terminal.

use std::fmt;

use super::view::{Banner, GapsView, ProjectView, RoadmapView, SkillsView, ViewModel};

impl fmt::Display for ViewModel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skills(v) => fmt::Display::fmt(v, f),
            Self::Gaps(v) => fmt::Display::fmt(v, f),
            Self::Roadmap(v) => fmt::Display::fmt(v, f),
            Self::Project(v) => fmt::Display::fmt(v, f),
        }
    }
}

fn bullets(f: &mut fmt::Formatter<'_>, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return writeln!(f, "  (none)");
    }
    for item in items {
        writeln!(f, "  - {item}")?;
    }
    Ok(())
}

impl fmt::Display for SkillsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Extracted Skills")?;
        if self.skills.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for skill in self.skills {
            writeln!(f, "  {} {}", skill.name, skill.level.stars())?;
        }

        writeln!(f, "\nStrengths")?;
        bullets(f, self.strengths)?;

        writeln!(f, "\nWeaknesses")?;
        bullets(f, self.weaknesses)?;

        writeln!(f, "\nRole Requirements")?;
        if self.requirements.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for category in self.requirements {
            writeln!(f, "  {}: {}", category.label(), category.skills.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for GapsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{} ({})", section.severity.label(), section.items.len())?;
            for gap in section.items {
                writeln!(f, "  - {}: {}", gap.skill, gap.reason)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for RoadmapView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        if self.weeks.is_empty() {
            writeln!(f, "  (no milestones)")?;
        }
        for block in &self.weeks {
            writeln!(
                f,
                "\nWeek {}: {}",
                block.milestone.week, block.milestone.milestone
            )?;
            for day in &block.days {
                writeln!(f, "  D{:<3} {}", day.day, day.objective)?;
                writeln!(
                    f,
                    "       resource: {} | task: {} | {}h",
                    day.resource, day.task, day.hours
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ProjectView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(changes) = self.scope_change {
            writeln!(f, "Project Scope Adjusted: {changes}\n")?;
        }
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.problem_statement)?;
        writeln!(f, "\nTech Stack: {}", self.tech_stack.join(", "))?;
        writeln!(f, "\nWeekly Feature Plan")?;
        for feature in self.weekly_features {
            writeln!(f, "  Week {}: {}", feature.week, feature.feature)?;
            if !feature.description.is_empty() {
                writeln!(f, "    {}", feature.description)?;
            }
        }
        if let Some(quality) = self.portfolio_quality {
            writeln!(f, "\nPortfolio Quality: {quality}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Banner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Agent Reasoning: {}", self.reasoning)?;
        if let Some(motivation) = self.motivation {
            write!(f, "\n{motivation}")?;
        }
        Ok(())
    }
}
