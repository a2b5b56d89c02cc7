//! Core data model types for drillforge.
//!
//! These are the records the tutoring engine passes between the scheduling
//! policy, the session orchestrator, and the question store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix marking a locally-minted question id that was never persisted.
///
/// Minted when the store rejects an insert; attempts against such questions
/// are not persisted either, since there is no stored row to reference.
pub const EPHEMERAL_ID_PREFIX: &str = "temp-";

/// A practice question, either freshly generated or replayed from the store.
///
/// Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Store-assigned id, or an `temp-` fallback when persistence failed.
    pub id: String,
    /// Syllabus topic this question is tagged with.
    pub topic: String,
    /// Course identifier (e.g. "IB", "SAT").
    pub course: String,
    /// Full question text. May contain inline LaTeX.
    pub question_text: String,
    /// Optional nudge that does not give the answer away.
    #[serde(default)]
    pub hint: Option<String>,
    /// The short final answer (e.g. "x = 5").
    pub correct_answer: String,
    /// Step-by-step worked solution.
    pub explanation: String,
}

impl Question {
    /// Returns `true` if this question only exists in memory.
    pub fn is_ephemeral(&self) -> bool {
        self.id.starts_with(EPHEMERAL_ID_PREFIX)
    }
}

/// A question that has been parsed but not yet assigned an id by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub topic: String,
    pub course: String,
    pub question_text: String,
    #[serde(default)]
    pub hint: Option<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl NewQuestion {
    /// Promote to a full `Question` with a locally-minted ephemeral id.
    pub fn into_ephemeral(self, now: DateTime<Utc>) -> Question {
        Question {
            id: format!("{}{}", EPHEMERAL_ID_PREFIX, now.timestamp_millis()),
            topic: self.topic,
            course: self.course,
            question_text: self.question_text,
            hint: self.hint,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
        }
    }
}

/// One graded or surrendered submission. Append-only, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: String,
    pub question_id: String,
    pub user_id: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

/// Accumulated mastery counters for one (user, topic, course) key.
///
/// Updated by accumulation only; counters never decrease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryRecord {
    pub user_id: String,
    pub topic: String,
    pub course: String,
    pub correct_count: u32,
    pub total_attempts: u32,
    pub last_practiced_at: DateTime<Utc>,
}

/// Outcome of grading one submission.
///
/// Transient: folded into `Attempt.is_correct` and the mastery counters,
/// never persisted as its own record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalStatus {
    Correct,
    Incorrect,
    Partial,
    Surrendered,
}

impl EvalStatus {
    /// Only a fully correct answer counts toward mastery.
    pub fn is_correct(self) -> bool {
        matches!(self, EvalStatus::Correct)
    }
}

impl fmt::Display for EvalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalStatus::Correct => write!(f, "correct"),
            EvalStatus::Incorrect => write!(f, "incorrect"),
            EvalStatus::Partial => write!(f, "partial"),
            EvalStatus::Surrendered => write!(f, "surrendered"),
        }
    }
}

impl FromStr for EvalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "correct" => Ok(EvalStatus::Correct),
            "incorrect" => Ok(EvalStatus::Incorrect),
            "partial" => Ok(EvalStatus::Partial),
            "surrendered" => Ok(EvalStatus::Surrendered),
            other => Err(format!("unknown evaluation status: {other}")),
        }
    }
}

/// A grading verdict plus the feedback text shown to the student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub status: EvalStatus,
    pub feedback: String,
}

/// Explicit per-session identity and course context.
///
/// Threaded through every orchestrator operation instead of ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: String,
    pub course: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, course: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            course: course.into(),
        }
    }
}
