//! Scheduling policy: review-vs-generate and topic recommendation.
//!
//! Both decisions are pure given their inputs. Randomness enters only
//! through explicit draw parameters in [0, 1), so tests can pin outcomes
//! by injecting fixed draws; nothing here touches a global RNG.

use crate::mastery::{accuracy, MasteryTable, TopicStats};
use crate::model::Question;

/// Probability of replaying a stored question instead of generating.
pub const REVIEW_PROBABILITY: f64 = 0.10;

/// Review draws from at most this many of the most recent stored questions.
pub const REVIEW_CANDIDATE_LIMIT: usize = 50;

/// Map a draw in [0, 1) to an index in [0, len).
fn uniform_index(draw: f64, len: usize) -> usize {
    ((draw * len as f64) as usize).min(len.saturating_sub(1))
}

/// Decide whether to replay a stored question.
///
/// Returns a candidate when `draw` falls under `REVIEW_PROBABILITY` and at
/// least one candidate exists; `pick` selects uniformly among up to the 50
/// most recent. An empty candidate pool always falls through to generation,
/// regardless of the draw.
pub fn select_review<'a>(
    draw: f64,
    pick: f64,
    candidates: &'a [Question],
) -> Option<&'a Question> {
    if draw >= REVIEW_PROBABILITY || candidates.is_empty() {
        return None;
    }
    let pool = &candidates[..candidates.len().min(REVIEW_CANDIDATE_LIMIT)];
    Some(&pool[uniform_index(pick, pool.len())])
}

/// Recommend the weakest topic in the universe.
///
/// Unattempted topics score 0%, the worst possible, so coverage wins over
/// grinding. All topics tied at the minimum are collected and one is drawn
/// uniformly rather than always taking the first in syllabus order.
pub fn recommend_topic<'a>(
    universe: &'a [String],
    table: &MasteryTable,
    draw: f64,
) -> Option<&'a str> {
    if universe.is_empty() {
        return None;
    }

    let score = |topic: &str| -> f64 {
        accuracy(table.get(topic).copied().unwrap_or(TopicStats::default()))
    };

    let min_score = universe
        .iter()
        .map(|t| score(t))
        .fold(f64::INFINITY, f64::min);

    let tied: Vec<&str> = universe
        .iter()
        .map(String::as_str)
        .filter(|t| (score(t) - min_score).abs() < f64::EPSILON)
        .collect();

    Some(tied[uniform_index(draw, tied.len())])
}
