//! Data models for projtrack.
//!
//! - Project (plus insert values, info view, and updatable fields)
//! - Skill / Status reference rows and their seeded defaults

pub mod project;
pub mod reference;

pub use project::{NewProject, Project, ProjectField, ProjectInfo, ProjectUpdate};
pub use reference::{DefaultSkill, DefaultStatus, Skill, Status};
