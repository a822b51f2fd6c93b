//! Fixed reference data: skills and statuses.
//!
//! Both sets are seeded once at schema setup and never change afterwards.

use serde::{Deserialize, Serialize};

/// A row of the `skills` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: i64,
    pub skill_name: String,
}

/// A row of the `status` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub status_id: i64,
    pub status_name: String,
}

/// Skills seeded on first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSkill {
    Python,
    Sql,
    Api,
    Discord,
}

impl DefaultSkill {
    pub const ALL: [Self; 4] = [Self::Python, Self::Sql, Self::Api, Self::Discord];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Sql => "SQL",
            Self::Api => "API",
            Self::Discord => "Discord",
        }
    }
}

/// Statuses seeded on first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultStatus {
    Prototyping,
    InDevelopment,
    Completed,
    Updated,
    Abandoned,
}

impl DefaultStatus {
    pub const ALL: [Self; 5] = [
        Self::Prototyping,
        Self::InDevelopment,
        Self::Completed,
        Self::Updated,
        Self::Abandoned,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prototyping => "Prototyping",
            Self::InDevelopment => "In Development",
            Self::Completed => "Completed",
            Self::Updated => "Updated",
            Self::Abandoned => "Abandoned/Not supported",
        }
    }
}
