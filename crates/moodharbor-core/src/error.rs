//! Core error types for moodharbor-core.
//!
//! This module defines the error hierarchy using thiserror
//! for better error handling and reporting across the library.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for moodharbor-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Dataset loading/validation errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Progress slot errors
    #[error("Progress store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Dataset-specific errors.
///
/// Every variant here is fatal at startup: the quiz cannot run against a
/// dataset that fails validation.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Failed to read the dataset file
    #[error("Failed to read dataset at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset JSON did not match the expected shape
    #[error("Failed to parse dataset: {0}")]
    ParseFailed(#[from] serde_json::Error),

    /// Dataset contains no questions
    #[error("Dataset contains no questions")]
    NoQuestions,

    /// A question has an empty option list
    #[error("Question {index} has no options")]
    NoOptions { index: usize },

    /// The emotion tag set contains a duplicate
    #[error("Duplicate emotion tag '{0}'")]
    DuplicateEmotion(String),

    /// An emotion tag outside the declared closed set was referenced
    #[error("Unknown emotion tag '{tag}' in {context}")]
    UnknownEmotion { tag: String, context: String },

    /// An emotion has no result text
    #[error("No result text for emotion '{0}'")]
    MissingResultText(String),

    /// An emotion has no encouragement messages
    #[error("Empty message pool for emotion '{0}'")]
    EmptyMessagePool(String),

    /// The neutral fallback emotion is missing from the tag set
    #[error("Neutral emotion '{0}' missing from emotion set")]
    MissingNeutral(String),
}

/// Progress-slot errors.
///
/// Note that corrupt slot *content* is deliberately not an error: the store
/// reports it as "no saved progress" instead (see `ProgressStore::load`).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the slot file
    #[error("Failed to read progress slot at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the slot file
    #[error("Failed to write progress slot at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove the slot file
    #[error("Failed to clear progress slot at {path}: {source}")]
    ClearFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize progress
    #[error("Failed to serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value could not be parsed for the key's type
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
