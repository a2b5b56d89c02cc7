//! Per-topic mastery model.
//!
//! Pure functions over copy-out counter tables. The question store is the
//! source of truth for the counters; everything here is derived on read.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Correct/total counters for one topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicStats {
    pub correct: u32,
    pub total: u32,
}

/// Mapping from topic title to accumulated counters.
pub type MasteryTable = HashMap<String, TopicStats>;

/// Qualitative mastery tiers, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryLevel {
    Unexplored,
    Beginner,
    Novice,
    Pro,
    Master,
}

impl MasteryLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            MasteryLevel::Unexplored => "unexplored",
            MasteryLevel::Beginner => "beginner",
            MasteryLevel::Novice => "novice",
            MasteryLevel::Pro => "pro",
            MasteryLevel::Master => "master",
        }
    }
}

/// Record one attempt against `topic`, returning the updated table.
///
/// Initializes an absent topic to zero counters first. Never fails and
/// never decrements. This is the reference model for the increment
/// semantics stores implement in `QuestionStore::bump_mastery`; their
/// counters must agree with it.
pub fn record_attempt(table: &MasteryTable, topic: &str, is_correct: bool) -> MasteryTable {
    let mut updated = table.clone();
    let stats = updated.entry(topic.to_string()).or_default();
    stats.total += 1;
    if is_correct {
        stats.correct += 1;
    }
    updated
}

/// Accuracy as a percentage in [0, 100]; 0 when nothing was attempted.
pub fn accuracy(stats: TopicStats) -> f64 {
    if stats.total == 0 {
        0.0
    } else {
        stats.correct as f64 / stats.total as f64 * 100.0
    }
}

/// Qualitative tier for a topic's counters.
///
/// Tiers combine absolute volume with accuracy and are checked high-to-low,
/// first match wins: a topic at 100% off three attempts is still Beginner.
pub fn level(stats: TopicStats) -> MasteryLevel {
    let rate = accuracy(stats);
    if stats.correct >= 50 && rate >= 90.0 {
        MasteryLevel::Master
    } else if stats.correct >= 20 && rate >= 80.0 {
        MasteryLevel::Pro
    } else if stats.correct >= 5 {
        MasteryLevel::Novice
    } else if stats.total > 0 {
        MasteryLevel::Beginner
    } else {
        MasteryLevel::Unexplored
    }
}

/// One-glyph accuracy summary for topic listings.
pub fn traffic_light(stats: TopicStats) -> &'static str {
    if stats.total == 0 {
        return "⚪";
    }
    let rate = accuracy(stats);
    if rate >= 70.0 {
        "🟢"
    } else if rate >= 40.0 {
        "🟡"
    } else {
        "🔴"
    }
}
