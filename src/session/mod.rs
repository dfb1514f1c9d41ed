//! Planning session: the stage state machine and the input it collects.
//!
//! A session moves from collecting a profile, through a pending generate
//! call, to displaying results; from there it can be adapted once. Reset
//! returns to the start from anywhere and drops everything collected.

pub mod navigator;
pub mod profile;
pub mod stage;

pub use navigator::{Navigator, Outcome, Snapshot};
pub use profile::{ProfileDraft, RoleChoice, UploadStatus, UserProfile};
pub use stage::{PendingKind, Stage, StageTransition};
