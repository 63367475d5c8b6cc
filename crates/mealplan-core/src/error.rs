//! Error types for the meal planning library.

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::models::Weekday;

/// Comprehensive error type for all meal planning operations.
#[derive(Error, Debug)]
pub enum MealPlanError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid request input (the only client-side failure)
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// CSV reading/writing errors
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
    /// Missing or invalid credentials, detected before or by the model call
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// The generative capability refused access to the configured model
    #[error(
        "Access denied for model '{model}': the configured project does not have access to \
         this model. Check the model entitlement for your API key or choose another model."
    )]
    AccessDenied { model: String },
    /// Any other failure talking to the generative capability
    #[error("Model transport error: {message}")]
    Transport { message: String },
    /// Model output could not be turned into plan candidates
    #[error("{reason}")]
    Parse { reason: String, raw: String },
    /// Well-formed model output that breaks the plan invariants
    #[error("Plan validation failed: {0}")]
    Validation(#[from] PlanViolation),
}

/// Ways a candidate plan can violate the five-weekday schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanViolation {
    #[error("invalid day entry encountered: '{value}'")]
    InvalidDay { value: String },
    #[error("empty value detected for '{field}' on {day}")]
    EmptyField { field: &'static str, day: Weekday },
    #[error("duplicate day detected: {day}")]
    DuplicateDay { day: Weekday },
    #[error("plan must contain exactly five weekday entries (found {found})")]
    WrongEntryCount { found: usize },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> MealPlanError {
        MealPlanError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> MealPlanError {
        MealPlanError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl MealPlanError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a parse error carrying the raw model output.
    pub fn parse(reason: impl Into<String>, raw: &str) -> Self {
        Self::Parse {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }

    /// True when the failure was caused by the caller's request rather than
    /// by the model, the store, or the configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// The raw model output attached to a parse failure, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| MealPlanError::database(message).with_source(e))
    }
}

/// Extension trait attaching a path to I/O failures.
pub trait IoResultExt<T> {
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| MealPlanError::FileSystem {
            path: path.into(),
            source,
        })
    }
}

/// Pipeline stage in which a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preprocess,
    Prompt,
    Generate,
    Validate,
    Export,
    Persist,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Preprocess => "preprocess",
            Stage::Prompt => "prompt",
            Stage::Generate => "generate",
            Stage::Validate => "validate",
            Stage::Export => "export",
            Stage::Persist => "persist",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First failure of a pipeline run, tagged with its originating stage.
#[derive(Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: MealPlanError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: MealPlanError) -> Self {
        Self { stage, source }
    }

    /// See [`MealPlanError::is_client_error`].
    pub fn is_client_error(&self) -> bool {
        self.source.is_client_error()
    }
}

/// Extension trait tagging a core result with the stage that produced it.
pub trait StageResultExt<T> {
    fn at_stage(self, stage: Stage) -> std::result::Result<T, PipelineError>;
}

impl<T> StageResultExt<T> for Result<T> {
    fn at_stage(self, stage: Stage) -> std::result::Result<T, PipelineError> {
        self.map_err(|e| PipelineError::new(stage, e))
    }
}

/// Result type alias for meal planning operations
pub type Result<T> = std::result::Result<T, MealPlanError>;
