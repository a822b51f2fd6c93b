//! Error types for projtrack.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=db, 3=not_found, 4=validation, etc.)
//! - Retryability flags for callers that can re-prompt
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for projtrack operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    NotInitialized,
    DatabaseError,

    // Not Found (exit 3)
    ProjectNotFound,
    SkillNotFound,
    StatusNotFound,

    // Validation (exit 4)
    InvalidField,
    InvalidChoice,
    InvalidArgument,
    ProjectExists,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::SkillNotFound => "SKILL_NOT_FOUND",
            Self::StatusNotFound => "STATUS_NOT_FOUND",
            Self::InvalidField => "INVALID_FIELD",
            Self::InvalidChoice => "INVALID_CHOICE",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::ProjectExists => "PROJECT_EXISTS",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::NotInitialized | Self::DatabaseError => 2,
            Self::ProjectNotFound | Self::SkillNotFound | Self::StatusNotFound => 3,
            Self::InvalidField
            | Self::InvalidChoice
            | Self::InvalidArgument
            | Self::ProjectExists => 4,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether the caller should retry with corrected input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidField
                | Self::InvalidChoice
                | Self::InvalidArgument
                | Self::ProjectExists
                | Self::DatabaseError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in projtrack operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not initialized: run `projtrack init` first")]
    NotInitialized,

    #[error("Project not found: {name}")]
    ProjectNotFound { name: String },

    #[error("Skill not found: {name}")]
    SkillNotFound { name: String },

    #[error("Status not found: {name}")]
    StatusNotFound { name: String },

    #[error("Project already exists: {name}")]
    ProjectExists { name: String },

    #[error("Field cannot be updated: {field}")]
    InvalidField { field: String },

    #[error("Invalid {kind}: {value}")]
    InvalidChoice {
        kind: &'static str,
        value: String,
        /// Accepted values, for hint display.
        valid: Vec<String>,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database file could not be created at {path}: {source}")]
    CreateDatabase {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized => ErrorCode::NotInitialized,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::ProjectNotFound { .. } => ErrorCode::ProjectNotFound,
            Self::SkillNotFound { .. } => ErrorCode::SkillNotFound,
            Self::StatusNotFound { .. } => ErrorCode::StatusNotFound,
            Self::InvalidField { .. } => ErrorCode::InvalidField,
            Self::InvalidChoice { .. } => ErrorCode::InvalidChoice,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::CreateDatabase { .. } | Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::ProjectExists { .. } => ErrorCode::ProjectExists,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInitialized => {
                Some("Run `projtrack init` to create the database".to_string())
            }

            Self::ProjectNotFound { name } => Some(format!(
                "No project named '{name}'. Use `projtrack project list` to see your projects."
            )),

            Self::SkillNotFound { .. } => {
                Some("Use `projtrack skill list` to see available skills.".to_string())
            }

            Self::StatusNotFound { .. } => {
                Some("Use `projtrack status list` to see available statuses.".to_string())
            }

            Self::ProjectExists { name } => Some(format!(
                "You already have a project named '{name}'. Pick another name."
            )),

            Self::InvalidField { .. } => Some(
                "Updatable fields: project_name, description, url, status".to_string(),
            ),

            Self::InvalidChoice { valid, .. } if !valid.is_empty() => {
                Some(format!("Valid values: {}", valid.join(", ")))
            }

            Self::Config(msg) if msg.contains("user") => Some(
                "Pass --user <ID> or set PROJTRACK_USER to choose whose projects to use."
                    .to_string(),
            ),

            _ => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_exit_code() {
        let err = Error::ProjectNotFound { name: "bot".to_string() };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.error_code().as_str(), "PROJECT_NOT_FOUND");
        assert!(!err.error_code().is_retryable());
    }

    #[test]
    fn test_project_exists_is_validation() {
        let err = Error::ProjectExists { name: "bot".to_string() };
        assert_eq!(err.exit_code(), 4);
        assert_eq!(err.error_code().as_str(), "PROJECT_EXISTS");
        assert!(err.hint().unwrap().contains("'bot'"));
    }

    #[test]
    fn test_structured_json_includes_hint() {
        let err = Error::InvalidChoice {
            kind: "status",
            value: "Paused".to_string(),
            valid: vec!["Prototyping".to_string(), "Completed".to_string()],
        };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "INVALID_CHOICE");
        assert_eq!(json["error"]["retryable"], true);
        assert_eq!(json["error"]["exit_code"], 4);
        assert_eq!(json["error"]["hint"], "Valid values: Prototyping, Completed");
    }

    #[test]
    fn test_no_hint_for_bad_argument() {
        let err = Error::InvalidArgument("boom".to_string());
        assert!(err.hint().is_none());
        assert!(err.to_structured_json()["error"].get("hint").is_none());
    }
}
