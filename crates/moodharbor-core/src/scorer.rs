//! Emotion scoring: reduces answers plus free text to per-emotion counts
//! and a primary emotion.
//!
//! The scorer is a pure function of its inputs; derived results are never
//! cached, callers recompute on demand.

use crate::dataset::{Dataset, EmotionId};

/// Result of scoring one session. Counts are sparse (only emotions that
/// scored at least once) and kept in first-seen order, which is what the
/// tie-break below is defined over.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionAnalysis {
    /// Emotion with the strictly greatest count. On a tie the emotion seen
    /// first wins; with no counts at all this is the dataset's neutral tag.
    pub primary: EmotionId,
    /// (emotion, count) pairs in the order each emotion first scored.
    pub counts: Vec<(EmotionId, u32)>,
    /// Number of answered positions. Denominator for percentage displays.
    pub total_answered: usize,
}

impl EmotionAnalysis {
    pub fn count(&self, id: EmotionId) -> u32 {
        self.counts
            .iter()
            .find(|(e, _)| *e == id)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Share of `total_answered` for one emotion, in percent. Defined as
    /// 0.0 when nothing was answered. Keyword hits can push an emotion's
    /// count past the answered total, so values above 100 are possible.
    pub fn percentage(&self, id: EmotionId) -> f64 {
        if self.total_answered == 0 {
            return 0.0;
        }
        self.count(id) as f64 / self.total_answered as f64 * 100.0
    }
}

/// Score a session.
///
/// Each answered position contributes one count to its chosen option's
/// emotion. The free text is lower-cased once and matched against every
/// keyword as a plain substring: one count per matching keyword, so a
/// keyword and its superstring both count, and repeated occurrences of the
/// same keyword still count once. The keyword table is walked in emotion
/// declaration order.
pub fn score(
    dataset: &Dataset,
    selected: &[usize],
    answers: &[Option<usize>],
    additional_text: &str,
) -> EmotionAnalysis {
    let mut counts: Vec<(EmotionId, u32)> = Vec::new();
    let mut total_answered = 0;

    for (position, answer) in answers.iter().enumerate() {
        let option_index = match answer {
            Some(i) => *i,
            None => continue,
        };
        let choice = selected
            .get(position)
            .and_then(|&q| dataset.question(q))
            .and_then(|q| q.options.get(option_index));
        if let Some(choice) = choice {
            total_answered += 1;
            bump(&mut counts, choice.emotion);
        }
    }

    let text = additional_text.to_lowercase();
    for id in dataset.emotion_ids() {
        for keyword in dataset.keywords(id) {
            if text.contains(keyword.as_str()) {
                bump(&mut counts, id);
            }
        }
    }

    let mut primary = dataset.neutral();
    let mut max = 0u32;
    for &(id, count) in &counts {
        if count > max {
            max = count;
            primary = id;
        }
    }

    EmotionAnalysis {
        primary,
        counts,
        total_answered,
    }
}

fn bump(counts: &mut Vec<(EmotionId, u32)>, id: EmotionId) {
    for (e, n) in counts.iter_mut() {
        if *e == id {
            *n += 1;
            return;
        }
    }
    counts.push((id, 1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use proptest::prelude::*;

    /// Four questions where option 0 maps to 焦虑, option 1 to 平静,
    /// option 2 to 愤怒.
    fn fixture() -> Dataset {
        let question = r#"
                {"text": "q", "options": [
                  {"text": "a", "emotion": "焦虑"},
                  {"text": "b", "emotion": "平静"},
                  {"text": "c", "emotion": "愤怒"}
                ]}"#;
        let json = format!(
            indoc! {r#"
                {{
                  "questions": [{q}, {q}, {q}, {q}],
                  "emotions": ["焦虑", "平静", "愤怒"],
                  "emotionKeywords": {{
                    "愤怒": ["生气", "烦", "烦躁"]
                  }},
                  "results": {{"焦虑": "r", "平静": "r", "愤怒": "r"}},
                  "messages": {{"焦虑": ["m"], "平静": ["m"], "愤怒": ["m"]}}
                }}
            "#},
            q = question
        );
        Dataset::from_json(&json).unwrap()
    }

    #[test]
    fn tallies_answers_per_emotion() {
        let ds = fixture();
        let selected = [0, 1, 2, 3];
        let answers = [Some(0), Some(1), Some(0), Some(0)];
        let analysis = score(&ds, &selected, &answers, "");

        let anxious = ds.emotion_id("焦虑").unwrap();
        let calm = ds.emotion_id("平静").unwrap();
        assert_eq!(analysis.primary, anxious);
        assert_eq!(analysis.counts, vec![(anxious, 3), (calm, 1)]);
        assert_eq!(analysis.total_answered, 4);
    }

    #[test]
    fn keyword_hits_add_to_answer_counts() {
        let ds = fixture();
        // Three distinct single-count emotions from answers, then two
        // keyword hits push 愤怒 to 3.
        let selected = [0, 1, 2];
        let answers = [Some(0), Some(1), Some(2)];
        let analysis = score(&ds, &selected, &answers, "今天很生气，到处堵车真烦");

        let angry = ds.emotion_id("愤怒").unwrap();
        assert_eq!(analysis.count(angry), 3);
        assert_eq!(analysis.primary, angry);
        assert_eq!(analysis.total_answered, 3);
    }

    #[test]
    fn keyword_and_its_superstring_both_count() {
        let ds = fixture();
        // "烦躁" contains "烦": both keywords match the same span.
        let analysis = score(&ds, &[], &[], "有点烦躁");
        let angry = ds.emotion_id("愤怒").unwrap();
        assert_eq!(analysis.count(angry), 2);
    }

    #[test]
    fn repeated_keyword_occurrences_count_once() {
        let ds = fixture();
        let analysis = score(&ds, &[], &[], "生气生气生气");
        let angry = ds.emotion_id("愤怒").unwrap();
        assert_eq!(analysis.count(angry), 1);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let question = r#"{"text": "q", "options": [{"text": "a", "emotion": "平静"}]}"#;
        let json = format!(
            indoc! {r#"
                {{
                  "questions": [{q}],
                  "emotions": ["平静", "焦虑"],
                  "emotionKeywords": {{"焦虑": ["Anxious"]}},
                  "results": {{"平静": "r", "焦虑": "r"}},
                  "messages": {{"平静": ["m"], "焦虑": ["m"]}}
                }}
            "#},
            q = question
        );
        let ds = Dataset::from_json(&json).unwrap();
        let analysis = score(&ds, &[], &[], "Feeling ANXIOUS today");
        assert_eq!(analysis.count(ds.emotion_id("焦虑").unwrap()), 1);
    }

    #[test]
    fn empty_session_defaults_to_neutral() {
        let ds = fixture();
        let analysis = score(&ds, &[], &[], "");
        assert_eq!(analysis.primary, ds.neutral());
        assert_eq!(ds.tag(analysis.primary), "平静");
        assert_eq!(analysis.total_answered, 0);
        assert!(analysis.counts.is_empty());
        for id in ds.emotion_ids() {
            assert_eq!(analysis.percentage(id), 0.0);
        }
    }

    #[test]
    fn tie_breaks_to_first_seen_emotion() {
        let ds = fixture();
        // 平静 answered first, then 焦虑: equal counts, 平静 wins.
        let selected = [0, 1];
        let answers = [Some(1), Some(0)];
        let analysis = score(&ds, &selected, &answers, "");
        assert_eq!(analysis.primary, ds.emotion_id("平静").unwrap());

        // Reverse the answer order and the winner flips.
        let answers = [Some(0), Some(1)];
        let analysis = score(&ds, &selected, &answers, "");
        assert_eq!(analysis.primary, ds.emotion_id("焦虑").unwrap());
    }

    #[test]
    fn unanswered_positions_are_skipped() {
        let ds = fixture();
        let selected = [0, 1, 2, 3];
        let answers = [Some(0), None, None, Some(0)];
        let analysis = score(&ds, &selected, &answers, "");
        assert_eq!(analysis.total_answered, 2);
        assert_eq!(analysis.count(ds.emotion_id("焦虑").unwrap()), 2);
    }

    #[test]
    fn scoring_is_pure() {
        let ds = fixture();
        let selected = [2, 0, 3];
        let answers = [Some(2), Some(1), Some(0)];
        let a = score(&ds, &selected, &answers, "有点烦");
        let b = score(&ds, &selected, &answers, "有点烦");
        assert_eq!(a, b);
    }

    #[test]
    fn percentages_use_answered_total() {
        let ds = fixture();
        let selected = [0, 1, 2, 3];
        let answers = [Some(0), Some(0), Some(0), Some(1)];
        let analysis = score(&ds, &selected, &answers, "");
        let anxious = ds.emotion_id("焦虑").unwrap();
        assert!((analysis.percentage(anxious) - 75.0).abs() < f64::EPSILON);
    }

    proptest! {
        /// The scorer never panics and always reports a primary emotion
        /// from the closed tag set, whatever the free text looks like.
        #[test]
        fn primary_is_always_a_valid_tag(text in ".*") {
            let ds = fixture();
            let selected = [0, 1];
            let answers = [Some(0), None];
            let analysis = score(&ds, &selected, &answers, &text);
            prop_assert!(ds.emotion_ids().any(|id| id == analysis.primary));
        }
    }
}
