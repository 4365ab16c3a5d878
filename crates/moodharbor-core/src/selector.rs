//! Random question subset selection.
//!
//! A session presents at most [`MAX_QUESTIONS`] questions, drawn without
//! replacement from the full set by a uniform Fisher-Yates shuffle. The
//! shuffle order is the presentation order.

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

/// Maximum number of questions presented in one session.
pub const MAX_QUESTIONS: usize = 20;

/// Pick the question indices for a fresh session.
///
/// Produces an unbiased permutation of `0..total` (Fisher-Yates, swapping
/// from the last index down to 1, partner drawn uniformly from `[0, i]`)
/// and returns its first `min(MAX_QUESTIONS, total)` elements.
pub fn select_questions<R: Rng + ?Sized>(rng: &mut R, total: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..total).collect();
    for i in (1..indices.len()).rev() {
        let j = rng.gen_range(0..=i);
        indices.swap(i, j);
    }
    indices.truncate(MAX_QUESTIONS.min(total));
    indices
}

/// Build the session RNG. A fixed seed gives a reproducible question subset
/// and message pick.
pub fn session_rng(seed: Option<u64>) -> Mcg128Xsl64 {
    match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    }
}
