//! Result presentation: pure selection of what to show, plus text rendering.

mod text;
pub mod view;

pub use view::{
    Banner, GapSection, GapsView, ProjectView, RoadmapView, SkillsView, View, ViewModel, banner,
    select,
};
