//! Career Navigator: turns a resume and a dream role into a skill gap
//! analysis, a 30-day roadmap and a flagship project plan, and adapts the
//! plan once when the learner falls behind.

pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod present;
pub mod service;
pub mod session;
