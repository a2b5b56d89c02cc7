//! In-memory question store.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use drillforge_core::mastery::MasteryTable;
use drillforge_core::model::{Attempt, MasteryRecord, NewQuestion, Question};
use drillforge_core::traits::QuestionStore;

use crate::inner::Inner;

/// An in-memory store. State lives for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn list_by_topic(
        &self,
        topic: &str,
        course: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<Question>> {
        Ok(self.inner.lock().unwrap().list_by_topic(topic, course, limit))
    }

    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<Question> {
        Ok(self.inner.lock().unwrap().insert_question(question))
    }

    async fn mastery_table(&self, user_id: &str, course: &str) -> anyhow::Result<MasteryTable> {
        Ok(self.inner.lock().unwrap().mastery_table(user_id, course))
    }

    async fn bump_mastery(
        &self,
        user_id: &str,
        topic: &str,
        course: &str,
        is_correct: bool,
        at: DateTime<Utc>,
    ) -> anyhow::Result<MasteryRecord> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .bump_mastery(user_id, topic, course, is_correct, at))
    }

    async fn insert_attempt(&self, attempt: Attempt) -> anyhow::Result<()> {
        self.inner.lock().unwrap().insert_attempt(attempt);
        Ok(())
    }

    async fn list_attempts(
        &self,
        user_id: &str,
        course: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<(Attempt, Option<Question>)>> {
        Ok(self.inner.lock().unwrap().list_attempts(user_id, course, limit))
    }
}
