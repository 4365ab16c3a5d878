//! Session engine implementation.
//!
//! The engine is a plain state machine over an explicit [`Session`] value;
//! there is no hidden global state. Commands with unmet guards are silent
//! no-ops returning `None` -- a front end is expected to disable the
//! corresponding control rather than handle an error path.
//!
//! ## View Transitions
//!
//! ```text
//! Questionnaire -> Result   (submit, last question answered)
//! Result -> Questionnaire   (reset)
//! ```

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Question};
use crate::events::{EmotionShare, Event, QuestionView, QuizOutcome};
use crate::scorer::score;
use crate::selector::select_questions;
use crate::storage::SavedProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Questionnaire,
    Result,
}

/// The full mutable state of one quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Question ids in presentation order. Fixed for the session's lifetime,
    /// replaced only by reset.
    pub selected: Vec<usize>,
    /// Current position, always in `0..selected.len()`.
    pub pointer: usize,
    /// Chosen option index per position; `None` until answered.
    pub answers: Vec<Option<usize>>,
    /// Free-form text captured on the final question.
    pub additional_text: String,
    pub view: View,
}

/// Core session engine.
///
/// Owns the [`Session`] and enforces its transition guards. Randomness is
/// supplied by the caller so sessions can be reproduced under a fixed seed.
#[derive(Debug)]
pub struct SessionEngine<'a> {
    dataset: &'a Dataset,
    session: Session,
    outcome: Option<QuizOutcome>,
    resumed: bool,
    auto_advance: bool,
}

impl<'a> SessionEngine<'a> {
    /// Start a fresh session with a newly selected question subset.
    pub fn new<R: Rng + ?Sized>(dataset: &'a Dataset, rng: &mut R) -> Self {
        let selected = select_questions(rng, dataset.questions().len());
        let answers = vec![None; selected.len()];
        Self {
            dataset,
            session: Session {
                selected,
                pointer: 0,
                answers,
                additional_text: String::new(),
                view: View::Questionnaire,
            },
            outcome: None,
            resumed: false,
            auto_advance: false,
        }
    }

    /// Restore a session from saved progress.
    ///
    /// Returns `None` when the saved data does not fit the dataset (stale
    /// indices, wrong lengths, out-of-range pointer); the caller falls back
    /// to a fresh session, exactly as it would for a corrupt slot.
    pub fn restore(dataset: &'a Dataset, saved: SavedProgress) -> Option<Self> {
        let SavedProgress {
            answers,
            additional_text,
            current_question_pointer: pointer,
            selected_question_indices: selected,
        } = saved;

        let total = dataset.questions().len();
        if selected.is_empty() || selected.len() > total {
            return None;
        }
        let mut seen = std::collections::HashSet::new();
        for &index in &selected {
            if index >= total || !seen.insert(index) {
                return None;
            }
        }
        if answers.len() != selected.len() || pointer >= selected.len() {
            return None;
        }
        for (position, answer) in answers.iter().enumerate() {
            if let Some(option_index) = answer {
                let question = dataset.question(selected[position])?;
                if *option_index >= question.options.len() {
                    return None;
                }
            }
        }

        Some(Self {
            dataset,
            session: Session {
                selected,
                pointer,
                answers,
                additional_text,
                view: View::Questionnaire,
            },
            outcome: None,
            resumed: true,
            auto_advance: false,
        })
    }

    /// Enable the double-activation variant: answering auto-advances the
    /// pointer when not on the last question.
    pub fn set_auto_advance(&mut self, on: bool) {
        self.auto_advance = on;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> View {
        self.session.view
    }

    pub fn pointer(&self) -> usize {
        self.session.pointer
    }

    pub fn question_count(&self) -> usize {
        self.session.selected.len()
    }

    pub fn answered_count(&self) -> usize {
        self.session.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_last(&self) -> bool {
        self.session.pointer + 1 == self.session.selected.len()
    }

    /// True when this session was restored from saved progress.
    pub fn resumed(&self) -> bool {
        self.resumed
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.dataset.question(self.session.selected[self.session.pointer])
    }

    /// The submitted result, present only in the Result view.
    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }

    /// The persistable subset of the session for the progress slot.
    pub fn saved_progress(&self) -> SavedProgress {
        SavedProgress {
            answers: self.session.answers.clone(),
            additional_text: self.session.additional_text.clone(),
            current_question_pointer: self.session.pointer,
            selected_question_indices: self.session.selected.clone(),
        }
    }

    /// The start event matching how this session came to be.
    pub fn started_event(&self) -> Event {
        if self.resumed {
            Event::ProgressRestored {
                question_count: self.question_count(),
                answered: self.answered_count(),
                pointer: self.session.pointer,
                at: Utc::now(),
            }
        } else {
            Event::SessionStarted {
                question_count: self.question_count(),
                at: Utc::now(),
            }
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let question = match self.session.view {
            View::Questionnaire => self.current_question().map(|q| QuestionView {
                text: q.text.clone(),
                options: q.options.iter().map(|o| o.text.clone()).collect(),
                selected: self.session.answers[self.session.pointer],
                is_last: self.is_last(),
            }),
            View::Result => None,
        };
        Event::StateSnapshot {
            view: self.session.view,
            pointer: self.session.pointer,
            question_count: self.question_count(),
            answered: self.answered_count(),
            resumed: self.resumed,
            question,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record an answer for the current question.
    ///
    /// Only valid in the Questionnaire view with an option index that
    /// exists on the current question.
    pub fn select_answer(&mut self, option_index: usize) -> Option<Event> {
        if self.session.view != View::Questionnaire {
            return None;
        }
        let options = self.current_question()?.options.len();
        if option_index >= options {
            return None;
        }
        let position = self.session.pointer;
        self.session.answers[position] = Some(option_index);

        let auto_advanced = self.auto_advance && !self.is_last();
        if auto_advanced {
            self.session.pointer += 1;
        }
        Some(Event::AnswerRecorded {
            position,
            option_index,
            auto_advanced,
            at: Utc::now(),
        })
    }

    /// Move to the next question. Blocked while the current one is
    /// unanswered, and at the final question.
    pub fn advance(&mut self) -> Option<Event> {
        if self.session.view != View::Questionnaire
            || self.session.answers[self.session.pointer].is_none()
            || self.is_last()
        {
            return None;
        }
        self.session.pointer += 1;
        Some(Event::Advanced {
            pointer: self.session.pointer,
            at: Utc::now(),
        })
    }

    /// Move back one question. Blocked at the first question.
    pub fn retreat(&mut self) -> Option<Event> {
        if self.session.view != View::Questionnaire || self.session.pointer == 0 {
            return None;
        }
        self.session.pointer -= 1;
        Some(Event::Retreated {
            pointer: self.session.pointer,
            at: Utc::now(),
        })
    }

    /// Replace the free-form description.
    pub fn set_additional_text(&mut self, text: &str) -> Option<Event> {
        if self.session.view != View::Questionnaire {
            return None;
        }
        self.session.additional_text = text.to_string();
        Some(Event::TextUpdated {
            chars: self.session.additional_text.chars().count(),
            at: Utc::now(),
        })
    }

    /// Score the session and move to the Result view.
    ///
    /// Only valid on the last question with it answered. Picks one
    /// encouragement uniformly from the primary emotion's pool.
    pub fn submit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Event> {
        if self.session.view != View::Questionnaire
            || !self.is_last()
            || self.session.answers[self.session.pointer].is_none()
        {
            return None;
        }

        let analysis = score(
            self.dataset,
            &self.session.selected,
            &self.session.answers,
            &self.session.additional_text,
        );
        let shares = analysis
            .counts
            .iter()
            .map(|&(id, count)| EmotionShare {
                emotion: self.dataset.tag(id).to_string(),
                count,
                percentage: analysis.percentage(id),
            })
            .collect();
        let pool = self.dataset.messages(analysis.primary);
        let message = pool[rng.gen_range(0..pool.len())].clone();

        let outcome = QuizOutcome {
            primary: self.dataset.tag(analysis.primary).to_string(),
            shares,
            total_answered: analysis.total_answered,
            result_text: self.dataset.result_text(analysis.primary).to_string(),
            message,
        };
        self.session.view = View::Result;
        self.outcome = Some(outcome.clone());
        Some(Event::QuizSubmitted {
            outcome,
            at: Utc::now(),
        })
    }

    /// Discard everything and start over with a fresh question subset.
    /// Valid from either view.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Event> {
        let selected = select_questions(rng, self.dataset.questions().len());
        let answers = vec![None; selected.len()];
        self.session = Session {
            selected,
            pointer: 0,
            answers,
            additional_text: String::new(),
            view: View::Questionnaire,
        };
        self.outcome = None;
        self.resumed = false;
        Some(Event::SessionReset {
            question_count: self.question_count(),
            at: Utc::now(),
        })
    }
}
