//! # Moodharbor Core Library
//!
//! This library provides the core logic for Moodharbor, an emotion
//! self-check quiz. It implements a CLI-first philosophy where the full
//! quiz flow is available via a standalone CLI binary, with any GUI being
//! a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Dataset**: Questions, the closed emotion tag set, keyword table,
//!   result texts and message pools, validated once at load
//! - **Selector**: Uniform Fisher-Yates subset of questions per session
//! - **Scorer**: Pure reduction of answers + free text into per-emotion
//!   counts and a primary emotion
//! - **Session**: State machine over an explicit session value, driving
//!   the questionnaire/result flow
//! - **Storage**: Single-slot JSON progress persistence and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: Core session state machine
//! - [`Dataset`]: Validated quiz content
//! - [`ProgressStore`]: Resumable-progress persistence
//! - [`Config`]: Application configuration management

pub mod dataset;
pub mod error;
pub mod events;
pub mod scorer;
pub mod selector;
pub mod session;
pub mod storage;

pub use dataset::{Choice, Dataset, EmotionId, Question, NEUTRAL_EMOTION};
pub use error::{ConfigError, CoreError, DatasetError, StoreError};
pub use events::{EmotionShare, Event, QuestionView, QuizOutcome};
pub use scorer::{score, EmotionAnalysis};
pub use selector::{select_questions, session_rng, MAX_QUESTIONS};
pub use session::{Session, SessionEngine, View};
pub use storage::{data_dir, Config, ProgressStore, SavedProgress};
