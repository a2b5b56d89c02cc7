//! Collaborator traits for the text generator and the question store.
//!
//! These async traits are implemented by the `drillforge-providers` and
//! `drillforge-store` crates respectively; the session orchestrator only
//! ever talks to these interfaces.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mastery::MasteryTable;
use crate::model::{Attempt, MasteryRecord, NewQuestion, Question};

// ---------------------------------------------------------------------------
// Text generator trait
// ---------------------------------------------------------------------------

/// Trait for generative-text backends: prompt in, raw text out.
///
/// No structured response contract is guaranteed beyond the section-tag
/// convention the core imposes via its prompt templates.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable backend name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate raw text from a prompt.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;
}

/// Request to a text generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gemini-2.5-flash").
    pub model: String,
    /// The main prompt.
    pub prompt: String,
    /// Optional system prompt override.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Raw response from a text generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The raw response text.
    pub content: String,
    /// Model that actually produced the response.
    pub model: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

// ---------------------------------------------------------------------------
// Question store trait
// ---------------------------------------------------------------------------

/// Trait for the persistence collaborator.
///
/// The store is the single source of truth for questions, attempts, and
/// mastery counters; the core derives accuracy and levels on read.
/// `bump_mastery` carries increment semantics so concurrent submissions for
/// the same key cannot lose an update to a read-then-write race in the core.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Up to `limit` stored questions for a (topic, course), most recent first.
    async fn list_by_topic(
        &self,
        topic: &str,
        course: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<Question>>;

    /// Persist a freshly parsed question, assigning its id.
    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<Question>;

    /// The full mastery table for a (user, course).
    async fn mastery_table(&self, user_id: &str, course: &str) -> anyhow::Result<MasteryTable>;

    /// Atomically increment the counters for one (user, topic, course) key.
    ///
    /// Initializes the record on first attempt. `total_attempts` always
    /// grows by one; `correct_count` grows by one iff `is_correct`.
    async fn bump_mastery(
        &self,
        user_id: &str,
        topic: &str,
        course: &str,
        is_correct: bool,
        at: DateTime<Utc>,
    ) -> anyhow::Result<MasteryRecord>;

    /// Append one attempt record.
    async fn insert_attempt(&self, attempt: Attempt) -> anyhow::Result<()>;

    /// Up to `limit` attempts for a (user, course), newest first, joined
    /// with their question where it still exists.
    async fn list_attempts(
        &self,
        user_id: &str,
        course: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<(Attempt, Option<Question>)>>;
}
