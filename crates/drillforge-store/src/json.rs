//! JSON snapshot store.
//!
//! Keeps the full state in memory and rewrites a single pretty-printed
//! JSON file after every mutation. Suits the single-user CLI workload;
//! there is no partial update or compaction.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use drillforge_core::mastery::MasteryTable;
use drillforge_core::model::{Attempt, MasteryRecord, NewQuestion, Question};
use drillforge_core::traits::QuestionStore;

use crate::inner::Inner;

/// A file-backed store persisting to one JSON snapshot.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl JsonStore {
    /// Open the store at `path`, loading the snapshot if it exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read store: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse store: {}", path.display()))?
        } else {
            Inner::default()
        };
        debug!(path = %path.display(), "opened question store");
        Ok(Self {
            path,
            inner: Mutex::new(inner),
        })
    }

    fn save(&self, inner: &Inner) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(inner).context("failed to serialize store")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write store: {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for JsonStore {
    async fn list_by_topic(
        &self,
        topic: &str,
        course: &str,
        limit: usize,
    ) -> Result<Vec<Question>> {
        Ok(self.inner.lock().unwrap().list_by_topic(topic, course, limit))
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question> {
        let inner = &mut *self.inner.lock().unwrap();
        let question = inner.insert_question(question);
        self.save(inner)?;
        Ok(question)
    }

    async fn mastery_table(&self, user_id: &str, course: &str) -> Result<MasteryTable> {
        Ok(self.inner.lock().unwrap().mastery_table(user_id, course))
    }

    async fn bump_mastery(
        &self,
        user_id: &str,
        topic: &str,
        course: &str,
        is_correct: bool,
        at: DateTime<Utc>,
    ) -> Result<MasteryRecord> {
        let inner = &mut *self.inner.lock().unwrap();
        let record = inner.bump_mastery(user_id, topic, course, is_correct, at);
        self.save(inner)?;
        Ok(record)
    }

    async fn insert_attempt(&self, attempt: Attempt) -> Result<()> {
        let inner = &mut *self.inner.lock().unwrap();
        inner.insert_attempt(attempt);
        self.save(inner)?;
        Ok(())
    }

    async fn list_attempts(
        &self,
        user_id: &str,
        course: &str,
        limit: usize,
    ) -> Result<Vec<(Attempt, Option<Question>)>> {
        Ok(self.inner.lock().unwrap().list_attempts(user_id, course, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question() -> NewQuestion {
        NewQuestion {
            topic: "Differentiation".into(),
            course: "IB".into(),
            question_text: "Differentiate $x^2$".into(),
            hint: Some("Power rule.".into()),
            correct_answer: "$2x$".into(),
            explanation: "Bring the exponent down.".into(),
        }
    }

    #[tokio::test]
    async fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let q_id;
        {
            let store = JsonStore::open(&path).unwrap();
            let q = store.insert_question(new_question()).await.unwrap();
            q_id = q.id.clone();
            store
                .bump_mastery("alex", "Differentiation", "IB", true, Utc::now())
                .await
                .unwrap();
            store
                .insert_attempt(Attempt {
                    id: "a1".into(),
                    question_id: q.id,
                    user_id: "alex".into(),
                    user_answer: "$2x$".into(),
                    is_correct: true,
                    feedback: "Correct.".into(),
                    created_at: Utc::now(),
                })
                .await
                .unwrap();
        }

        let reopened = JsonStore::open(&path).unwrap();
        let questions = reopened
            .list_by_topic("Differentiation", "IB", 10)
            .await
            .unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, q_id);

        let table = reopened.mastery_table("alex", "IB").await.unwrap();
        assert_eq!(table.get("Differentiation").unwrap().correct, 1);

        let attempts = reopened.list_attempts("alex", "IB", 10).await.unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].1.as_ref().unwrap().id, q_id);
    }

    #[tokio::test]
    async fn open_with_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("fresh.json")).unwrap();
        assert!(store
            .list_by_topic("Vectors", "IB", 10)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn open_rejects_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(JsonStore::open(&path).is_err());
    }

    #[tokio::test]
    async fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/store.json");
        let store = JsonStore::open(&path).unwrap();
        store.insert_question(new_question()).await.unwrap();
        assert!(path.exists());
    }
}
