//! Single-slot persistence for in-progress quiz answers.
//!
//! One JSON file holds the resumable part of a session. `save` overwrites
//! the slot unconditionally; there is no merging and no versioning. A slot
//! that fails to parse is reported as "no saved progress" (with a warning
//! on stderr), never as an error to the caller.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

const SLOT_FILE: &str = "progress.json";

/// The persisted subset of a session. Field names match the original
/// localStorage payload, so the slot JSON reads
/// `{"answers": ..., "additionalText": ..., "currentQuestionPointer": ...,
/// "selectedQuestionIndices": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProgress {
    pub answers: Vec<Option<usize>>,
    pub additional_text: String,
    pub current_question_pointer: usize,
    pub selected_question_indices: Vec<usize>,
}

/// The well-known progress slot.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    /// The default slot in the app data directory.
    pub fn open() -> std::io::Result<Self> {
        Ok(Self {
            path: super::data_dir()?.join(SLOT_FILE),
        })
    }

    /// A slot at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Overwrite the slot.
    pub fn save(&self, progress: &SavedProgress) -> Result<(), StoreError> {
        let json = serde_json::to_string(progress)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the slot. `Ok(None)` when the slot is absent or its content
    /// cannot be parsed; only real IO failures surface as errors.
    pub fn load(&self) -> Result<Option<SavedProgress>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        match serde_json::from_str(&content) {
            Ok(progress) => Ok(Some(progress)),
            Err(e) => {
                eprintln!(
                    "warning: ignoring corrupt quiz progress at {}: {e}",
                    self.path.display()
                );
                Ok(None)
            }
        }
    }

    /// Remove the slot. Idempotent: a missing slot is not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::ClearFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
