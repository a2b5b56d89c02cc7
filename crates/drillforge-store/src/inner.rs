//! Shared synchronous state behind both store implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drillforge_core::mastery::{MasteryTable, TopicStats};
use drillforge_core::model::{Attempt, MasteryRecord, NewQuestion, Question};

/// The complete store state. Serializable so `JsonStore` can snapshot it.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Inner {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub attempts: Vec<Attempt>,
    #[serde(default)]
    pub mastery: Vec<MasteryRecord>,
}

impl Inner {
    pub fn list_by_topic(&self, topic: &str, course: &str, limit: usize) -> Vec<Question> {
        self.questions
            .iter()
            .rev()
            .filter(|q| q.topic == topic && q.course == course)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn insert_question(&mut self, question: NewQuestion) -> Question {
        let question = Question {
            id: uuid::Uuid::new_v4().to_string(),
            topic: question.topic,
            course: question.course,
            question_text: question.question_text,
            hint: question.hint,
            correct_answer: question.correct_answer,
            explanation: question.explanation,
        };
        self.questions.push(question.clone());
        question
    }

    pub fn mastery_table(&self, user_id: &str, course: &str) -> MasteryTable {
        self.mastery
            .iter()
            .filter(|r| r.user_id == user_id && r.course == course)
            .map(|r| {
                (
                    r.topic.clone(),
                    TopicStats {
                        correct: r.correct_count,
                        total: r.total_attempts,
                    },
                )
            })
            .collect()
    }

    pub fn bump_mastery(
        &mut self,
        user_id: &str,
        topic: &str,
        course: &str,
        is_correct: bool,
        at: DateTime<Utc>,
    ) -> MasteryRecord {
        let record = match self
            .mastery
            .iter_mut()
            .find(|r| r.user_id == user_id && r.topic == topic && r.course == course)
        {
            Some(record) => {
                record.total_attempts += 1;
                if is_correct {
                    record.correct_count += 1;
                }
                record.last_practiced_at = at;
                record
            }
            None => {
                self.mastery.push(MasteryRecord {
                    user_id: user_id.to_string(),
                    topic: topic.to_string(),
                    course: course.to_string(),
                    correct_count: u32::from(is_correct),
                    total_attempts: 1,
                    last_practiced_at: at,
                });
                self.mastery.last_mut().unwrap()
            }
        };
        record.clone()
    }

    pub fn insert_attempt(&mut self, attempt: Attempt) {
        self.attempts.push(attempt);
    }

    /// Attempts newest first, joined with their question. Attempts whose
    /// question row has a different course are filtered out; attempts whose
    /// question is gone are kept with a `None` join.
    pub fn list_attempts(
        &self,
        user_id: &str,
        course: &str,
        limit: usize,
    ) -> Vec<(Attempt, Option<Question>)> {
        let mut rows: Vec<(Attempt, Option<Question>)> = self
            .attempts
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| {
                let question = self
                    .questions
                    .iter()
                    .find(|q| q.id == a.question_id)
                    .cloned();
                (a.clone(), question)
            })
            .filter(|(_, q)| q.as_ref().map(|q| q.course == course).unwrap_or(true))
            .collect();
        rows.sort_by(|a, b| b.0.created_at.cmp(&a.0.created_at));
        rows.truncate(limit);
        rows
    }
}
