use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::View;

/// Every session transition produces an Event. The CLI prints them as JSON;
/// a GUI layer would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A fresh session began with a newly selected question subset.
    SessionStarted {
        question_count: usize,
        at: DateTime<Utc>,
    },
    /// A saved session was restored from the progress slot.
    ProgressRestored {
        question_count: usize,
        answered: usize,
        pointer: usize,
        at: DateTime<Utc>,
    },
    AnswerRecorded {
        position: usize,
        option_index: usize,
        /// True when the double-activation variant moved the pointer forward.
        auto_advanced: bool,
        at: DateTime<Utc>,
    },
    Advanced {
        pointer: usize,
        at: DateTime<Utc>,
    },
    Retreated {
        pointer: usize,
        at: DateTime<Utc>,
    },
    TextUpdated {
        chars: usize,
        at: DateTime<Utc>,
    },
    QuizSubmitted {
        outcome: QuizOutcome,
        at: DateTime<Utc>,
    },
    SessionReset {
        question_count: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        view: View,
        pointer: usize,
        question_count: usize,
        answered: usize,
        /// True when this session was restored from saved progress.
        resumed: bool,
        question: Option<QuestionView>,
        at: DateTime<Utc>,
    },
}

/// Rendering-ready view of the current question for the snapshot event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub text: String,
    pub options: Vec<String>,
    /// Chosen option index for this position, if already answered.
    pub selected: Option<usize>,
    pub is_last: bool,
}

/// One emotion's share of the submitted analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionShare {
    pub emotion: String,
    pub count: u32,
    pub percentage: f64,
}

/// Everything the result view renders: the analysis breakdown, the result
/// paragraph for the primary emotion and one randomly picked encouragement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub primary: String,
    pub shares: Vec<EmotionShare>,
    pub total_answered: usize,
    pub result_text: String,
    pub message: String,
}
