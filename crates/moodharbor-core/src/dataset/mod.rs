//! Quiz dataset: questions, the closed emotion tag set, keyword table,
//! result texts and encouragement message pools.
//!
//! The wire format is the camelCase JSON shape of the original `data.json`:
//!
//! ```json
//! {
//!   "questions": [{"text": "...", "options": [{"text": "...", "emotion": "平静"}]}],
//!   "emotions": ["焦虑", "平静", ...],
//!   "emotionKeywords": {"焦虑": ["紧张", ...]},
//!   "results": {"焦虑": "..."},
//!   "messages": {"焦虑": ["...", "..."]}
//! }
//! ```
//!
//! Loading validates the whole file once: every emotion tag referenced by an
//! option, keyword key, result key or message key must be a member of
//! `emotions`, every emotion needs a result text and a non-empty message
//! pool, and the neutral fallback tag must be present. After validation,
//! emotion tags are handled as [`EmotionId`] indexes into the declared set,
//! so downstream code never carries unchecked string keys.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::DatasetError;

/// The neutral fallback emotion, reported when nothing scores.
pub const NEUTRAL_EMOTION: &str = "平静";

const BUILTIN_JSON: &str = include_str!("builtin.json");

/// Index into the dataset's declared emotion set.
///
/// Only obtainable from a validated [`Dataset`], which makes it safe to use
/// as a key without re-checking the tag string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionId(usize);

/// One selectable answer, tagged with the emotion it counts toward.
#[derive(Debug, Clone)]
pub struct Choice {
    pub text: String,
    pub emotion: EmotionId,
}

/// A quiz question with its ordered options.
#[derive(Debug, Clone)]
pub struct Question {
    pub text: String,
    pub options: Vec<Choice>,
}

/// Validated, immutable quiz dataset. Loaded once at startup.
#[derive(Debug, Clone)]
pub struct Dataset {
    emotions: Vec<String>,
    questions: Vec<Question>,
    /// Per-emotion keyword lists, lower-cased at load. Indexed by EmotionId.
    keywords: Vec<Vec<String>>,
    /// Per-emotion result paragraph. Indexed by EmotionId.
    results: Vec<String>,
    /// Per-emotion encouragement pool, non-empty. Indexed by EmotionId.
    messages: Vec<Vec<String>>,
    neutral: EmotionId,
}

// Wire-format mirror types. Field names follow the original data.json.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataset {
    questions: Vec<RawQuestion>,
    emotions: Vec<String>,
    emotion_keywords: HashMap<String, Vec<String>>,
    results: HashMap<String, String>,
    messages: HashMap<String, Vec<String>>,
}

#[derive(Deserialize)]
struct RawQuestion {
    text: String,
    options: Vec<RawOption>,
}

#[derive(Deserialize)]
struct RawOption {
    text: String,
    emotion: String,
}

impl Dataset {
    /// Parse and validate a dataset from its JSON wire format.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Load and validate a dataset file.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// The dataset embedded in the crate.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_JSON).expect("builtin dataset is valid")
    }

    fn from_raw(raw: RawDataset) -> Result<Self, DatasetError> {
        if raw.questions.is_empty() {
            return Err(DatasetError::NoQuestions);
        }

        let mut emotions: Vec<String> = Vec::with_capacity(raw.emotions.len());
        for tag in raw.emotions {
            if emotions.contains(&tag) {
                return Err(DatasetError::DuplicateEmotion(tag));
            }
            emotions.push(tag);
        }

        let lookup = |tag: &str| emotions.iter().position(|e| e == tag).map(EmotionId);

        let neutral = lookup(NEUTRAL_EMOTION)
            .ok_or_else(|| DatasetError::MissingNeutral(NEUTRAL_EMOTION.to_string()))?;

        let mut questions = Vec::with_capacity(raw.questions.len());
        for (index, q) in raw.questions.into_iter().enumerate() {
            if q.options.is_empty() {
                return Err(DatasetError::NoOptions { index });
            }
            let mut options = Vec::with_capacity(q.options.len());
            for opt in q.options {
                let emotion = lookup(&opt.emotion).ok_or_else(|| DatasetError::UnknownEmotion {
                    tag: opt.emotion.clone(),
                    context: format!("question {index}"),
                })?;
                options.push(Choice {
                    text: opt.text,
                    emotion,
                });
            }
            questions.push(Question {
                text: q.text,
                options,
            });
        }

        // Keyword lists are re-indexed by EmotionId; the scorer iterates them
        // in emotion declaration order.
        let mut keywords = vec![Vec::new(); emotions.len()];
        for (tag, words) in raw.emotion_keywords {
            let id = lookup(&tag).ok_or_else(|| DatasetError::UnknownEmotion {
                tag: tag.clone(),
                context: "emotionKeywords".to_string(),
            })?;
            keywords[id.0] = words.into_iter().map(|w| w.to_lowercase()).collect();
        }

        for tag in raw.results.keys() {
            if lookup(tag).is_none() {
                return Err(DatasetError::UnknownEmotion {
                    tag: tag.clone(),
                    context: "results".to_string(),
                });
            }
        }
        let mut results = Vec::with_capacity(emotions.len());
        for tag in &emotions {
            match raw.results.get(tag) {
                Some(text) => results.push(text.clone()),
                None => return Err(DatasetError::MissingResultText(tag.clone())),
            }
        }

        for tag in raw.messages.keys() {
            if lookup(tag).is_none() {
                return Err(DatasetError::UnknownEmotion {
                    tag: tag.clone(),
                    context: "messages".to_string(),
                });
            }
        }
        let mut messages = Vec::with_capacity(emotions.len());
        for tag in &emotions {
            match raw.messages.get(tag) {
                Some(pool) if !pool.is_empty() => messages.push(pool.clone()),
                _ => return Err(DatasetError::EmptyMessagePool(tag.clone())),
            }
        }

        Ok(Self {
            emotions,
            questions,
            keywords,
            results,
            messages,
            neutral,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn emotions(&self) -> &[String] {
        &self.emotions
    }

    /// Emotion ids in declaration order.
    pub fn emotion_ids(&self) -> impl Iterator<Item = EmotionId> {
        (0..self.emotions.len()).map(EmotionId)
    }

    pub fn tag(&self, id: EmotionId) -> &str {
        &self.emotions[id.0]
    }

    pub fn emotion_id(&self, tag: &str) -> Option<EmotionId> {
        self.emotions.iter().position(|e| e == tag).map(EmotionId)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn keywords(&self, id: EmotionId) -> &[String] {
        &self.keywords[id.0]
    }

    pub fn result_text(&self, id: EmotionId) -> &str {
        &self.results[id.0]
    }

    pub fn messages(&self, id: EmotionId) -> &[String] {
        &self.messages[id.0]
    }

    pub fn neutral(&self) -> EmotionId {
        self.neutral
    }
}
