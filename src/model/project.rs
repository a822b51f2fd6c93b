//! Project model for projtrack.
//!
//! A project belongs to exactly one user and carries a name, an optional
//! description and link, and a reference to one of the seeded statuses.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored project row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Generated row id
    pub project_id: i64,

    /// Owner (chat author id)
    pub user_id: i64,

    /// Display name, unique per owner by convention
    pub project_name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Optional link to the project
    pub url: Option<String>,

    /// Reference into the `status` table
    pub status_id: Option<i64>,
}

/// Values for a project insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub user_id: i64,
    pub project_name: String,
    pub url: Option<String>,
    pub status_id: i64,
    pub description: Option<String>,
}

impl NewProject {
    /// Create insert values for a project.
    pub fn new(user_id: i64, project_name: impl Into<String>, url: Option<String>, status_id: i64) -> Self {
        Self {
            user_id,
            project_name: project_name.into(),
            url,
            status_id,
            description: None,
        }
    }

    /// Set the description written with the insert.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// Descriptive view of a project joined with its status name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status_name: Option<String>,
}

/// Columns of `projects` that may be updated.
///
/// This is the only way a column name reaches SQL text, so nothing outside
/// this list can be interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Name,
    Description,
    Url,
    Status,
}

impl ProjectField {
    /// All updatable fields, in prompt order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Description, Self::Url, Self::Status];

    /// Column name in the `projects` table.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Name => "project_name",
            Self::Description => "description",
            Self::Url => "url",
            Self::Status => "status_id",
        }
    }

    /// Label shown to chat users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Project name",
            Self::Description => "Description",
            Self::Url => "Link",
            Self::Status => "Status",
        }
    }

    /// Parse a column name, label, or short alias (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` for anything outside the allow-list.
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "project_name" | "name" => Ok(Self::Name),
            "description" | "desc" => Ok(Self::Description),
            "url" | "link" => Ok(Self::Url),
            "status_id" | "status" => Ok(Self::Status),
            _ => Err(Error::InvalidField {
                field: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A single-field update with its typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectUpdate {
    Name(String),
    Description(String),
    Url(String),
    Status(i64),
}

impl ProjectUpdate {
    /// The field this update writes.
    #[must_use]
    pub const fn field(&self) -> ProjectField {
        match self {
            Self::Name(_) => ProjectField::Name,
            Self::Description(_) => ProjectField::Description,
            Self::Url(_) => ProjectField::Url,
            Self::Status(_) => ProjectField::Status,
        }
    }

    /// Build a text update for `field`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for `ProjectField::Status`, which takes an id
    /// and must be resolved through the status table first.
    pub fn text(field: ProjectField, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        match field {
            ProjectField::Name => {
                if value.trim().is_empty() {
                    return Err(Error::InvalidArgument(
                        "project name cannot be empty".to_string(),
                    ));
                }
                Ok(Self::Name(value))
            }
            ProjectField::Description => Ok(Self::Description(value)),
            ProjectField::Url => Ok(Self::Url(value)),
            ProjectField::Status => Err(Error::InvalidArgument(
                "status updates take a status id".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_columns_and_labels() {
        assert_eq!(ProjectField::parse("project_name").unwrap(), ProjectField::Name);
        assert_eq!(ProjectField::parse("Project name").unwrap(), ProjectField::Name);
        assert_eq!(ProjectField::parse("Link").unwrap(), ProjectField::Url);
        assert_eq!(ProjectField::parse("status_id").unwrap(), ProjectField::Status);
        assert_eq!(ProjectField::parse(" DESCRIPTION ").unwrap(), ProjectField::Description);
    }

    #[test]
    fn test_parse_rejects_other_columns() {
        for input in ["user_id", "project_id", "url = 'x'; --", ""] {
            let err = ProjectField::parse(input).unwrap_err();
            assert!(matches!(err, Error::InvalidField { .. }), "accepted {input:?}");
        }
    }

    #[test]
    fn test_labels_round_trip_through_parse() {
        for field in ProjectField::ALL {
            assert_eq!(ProjectField::parse(field.label()).unwrap(), field);
            assert_eq!(ProjectField::parse(field.column()).unwrap(), field);
        }
    }

    #[test]
    fn test_text_update_rejects_status() {
        assert!(ProjectUpdate::text(ProjectField::Status, "2").is_err());
        assert!(ProjectUpdate::text(ProjectField::Name, "  ").is_err());
        assert_eq!(
            ProjectUpdate::text(ProjectField::Url, "https://x").unwrap().field(),
            ProjectField::Url
        );
    }
}
