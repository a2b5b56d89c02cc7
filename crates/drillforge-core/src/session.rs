//! Session orchestrator: one practice turn at a time.
//!
//! Drives the turn state machine
//! `Idle -> AwaitingQuestion -> QuestionActive -> AwaitingEvaluation -> Resolved`
//! against the two external collaborators. Within a turn every external call
//! is sequential: generate-then-parse, grade-then-persist-then-bump-mastery.
//! Parsing and generator failures abort the turn and return it to `Idle`;
//! persistence failures are logged and swallowed so the user-facing result
//! never depends on the store being up.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::CoreError;
use crate::mastery::MasteryTable;
use crate::model::{Attempt, EvalStatus, Evaluation, Question, SessionContext};
use crate::parser;
use crate::policy::{self, REVIEW_CANDIDATE_LIMIT};
use crate::prompts;
use crate::traits::{GenerateRequest, QuestionStore, TextGenerator};

/// Generation settings for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Model identifier passed to the text generator.
    pub model: String,
    /// Max tokens per generation.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

/// Turn state machine positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingQuestion,
    QuestionActive,
    AwaitingEvaluation,
    Resolved,
}

/// Random draws for one question request, injected by the caller.
///
/// `review` decides review-vs-generate; `pick` selects within the review
/// candidate pool. Both in [0, 1).
#[derive(Debug, Clone, Copy)]
pub struct TurnDraws {
    pub review: f64,
    pub pick: f64,
}

/// How a served question was sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    /// Freshly generated by the text backend.
    Generated,
    /// Replayed unchanged from the question store.
    Review,
}

/// A question ready to present to the student.
#[derive(Debug, Clone)]
pub struct ServedQuestion {
    pub question: Question,
    pub source: QuestionSource,
}

/// The resolved outcome of one turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub question: Question,
    pub evaluation: Evaluation,
    pub attempt_id: String,
}

/// One line of in-session history, newest first.
#[derive(Debug, Clone)]
pub struct HistoryItem {
    pub attempt_id: String,
    pub topic: String,
    pub question_text: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub explanation: String,
    pub is_correct: bool,
    pub timestamp: chrono::DateTime<Utc>,
}

/// A practice session for one user and course.
pub struct Session {
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn QuestionStore>,
    ctx: SessionContext,
    config: SessionConfig,
    state: TurnState,
    active: Option<Question>,
    history: Vec<HistoryItem>,
}

impl Session {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn QuestionStore>,
        ctx: SessionContext,
        config: SessionConfig,
    ) -> Self {
        Self {
            generator,
            store,
            ctx,
            config,
            state: TurnState::Idle,
            active: None,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.active.as_ref()
    }

    /// In-session history, newest first.
    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    /// Recommend the weakest topic in `universe` using the store's counters.
    ///
    /// An unreachable store degrades to an empty table, which ranks every
    /// topic at 0% and turns the recommendation into pure coverage.
    pub async fn recommend_topic(
        &self,
        universe: &[String],
        draw: f64,
    ) -> Result<Option<String>, CoreError> {
        let table = match self
            .store
            .mastery_table(&self.ctx.user_id, &self.ctx.course)
            .await
        {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("mastery fetch failed, recommending by coverage: {e:#}");
                MasteryTable::new()
            }
        };
        Ok(policy::recommend_topic(universe, &table, draw).map(str::to_string))
    }

    /// Serve a question for `topic`: review hit or fresh generation.
    pub async fn request_question(
        &mut self,
        topic: &str,
        draws: TurnDraws,
    ) -> Result<ServedQuestion, CoreError> {
        if topic.trim().is_empty() {
            return Err(CoreError::InvalidRequest("topic is required".into()));
        }
        self.state = TurnState::AwaitingQuestion;

        // Review path: opportunistic, so a store failure falls through to
        // generation instead of aborting the turn.
        let candidates = match self
            .store
            .list_by_topic(topic, &self.ctx.course, REVIEW_CANDIDATE_LIMIT)
            .await
        {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("review candidate fetch failed: {e:#}");
                Vec::new()
            }
        };

        if let Some(reviewed) = policy::select_review(draws.review, draws.pick, &candidates) {
            tracing::info!(question_id = %reviewed.id, topic, "reviewing stored question");
            let question = reviewed.clone();
            self.active = Some(question.clone());
            self.state = TurnState::QuestionActive;
            return Ok(ServedQuestion {
                question,
                source: QuestionSource::Review,
            });
        }

        let question = match self.generate_question(topic).await {
            Ok(q) => q,
            Err(e) => {
                // Terminal for this turn: report, back to Idle, no retry.
                self.abort_turn();
                return Err(e);
            }
        };

        self.active = Some(question.clone());
        self.state = TurnState::QuestionActive;
        Ok(ServedQuestion {
            question,
            source: QuestionSource::Generated,
        })
    }

    async fn generate_question(&self, topic: &str) -> Result<Question, CoreError> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: prompts::generation_prompt(topic, &self.ctx.course),
            system_prompt: Some(prompts::SYSTEM_PROMPT.to_string()),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .generator
            .generate(&request)
            .await
            .map_err(|e| CoreError::GeneratorUnavailable(format!("{e:#}")))?;

        let parsed = parser::parse_question(&response.content, topic, &self.ctx.course)?;

        match self.store.insert_question(parsed.clone()).await {
            Ok(question) => Ok(question),
            Err(e) => {
                // Store down: serve the question anyway under an ephemeral id.
                tracing::warn!("question insert failed, minting ephemeral id: {e:#}");
                Ok(parsed.into_ephemeral(Utc::now()))
            }
        }
    }

    /// Abort the current turn. Idle always means no active question.
    fn abort_turn(&mut self) {
        self.active = None;
        self.state = TurnState::Idle;
    }

    /// Grade the student's answer against the active question.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<TurnOutcome, CoreError> {
        let question = self
            .active
            .clone()
            .ok_or_else(|| CoreError::InvalidRequest("no active question".into()))?;
        if answer.trim().is_empty() {
            return Err(CoreError::InvalidRequest("answer is required".into()));
        }
        self.state = TurnState::AwaitingEvaluation;

        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: prompts::grading_prompt(&question.question_text, answer, &self.ctx.course),
            system_prompt: Some(prompts::SYSTEM_PROMPT.to_string()),
            max_tokens: self.config.max_tokens,
            temperature: 0.0,
        };

        let response = match self.generator.generate(&request).await {
            Ok(r) => r,
            Err(e) => {
                self.abort_turn();
                return Err(CoreError::GeneratorUnavailable(format!("{e:#}")));
            }
        };

        let evaluation = match parser::parse_evaluation(&response.content) {
            Ok(eval) => eval,
            Err(e) => {
                self.abort_turn();
                return Err(e);
            }
        };

        Ok(self.resolve(question, answer, evaluation).await)
    }

    /// Give up on the active question: recorded as incorrect, solution
    /// revealed, no generator call.
    pub async fn surrender(&mut self) -> Result<TurnOutcome, CoreError> {
        let question = self
            .active
            .clone()
            .ok_or_else(|| CoreError::InvalidRequest("no active question".into()))?;
        self.state = TurnState::AwaitingEvaluation;

        let evaluation = Evaluation {
            status: EvalStatus::Surrendered,
            feedback: "Solution revealed.".to_string(),
        };
        Ok(self.resolve(question, "", evaluation).await)
    }

    /// Apply the three resolution effects: persist the attempt, bump mastery,
    /// append history. Each write is best-effort and independently logged;
    /// the evaluation is already final and a failed write never blocks it.
    async fn resolve(
        &mut self,
        question: Question,
        user_answer: &str,
        evaluation: Evaluation,
    ) -> TurnOutcome {
        let is_correct = evaluation.status.is_correct();
        let now = Utc::now();
        let attempt = Attempt {
            id: Uuid::new_v4().to_string(),
            question_id: question.id.clone(),
            user_id: self.ctx.user_id.clone(),
            user_answer: user_answer.to_string(),
            is_correct,
            feedback: evaluation.feedback.clone(),
            created_at: now,
        };

        if question.is_ephemeral() {
            // No stored question row to reference.
            tracing::info!(question_id = %question.id, "skipping attempt insert for ephemeral question");
        } else if let Err(e) = self.store.insert_attempt(attempt.clone()).await {
            tracing::warn!("attempt insert failed: {e:#}");
        }

        if let Err(e) = self
            .store
            .bump_mastery(
                &self.ctx.user_id,
                &question.topic,
                &self.ctx.course,
                is_correct,
                now,
            )
            .await
        {
            tracing::warn!("mastery update failed: {e:#}");
        }

        self.history.insert(
            0,
            HistoryItem {
                attempt_id: attempt.id.clone(),
                topic: question.topic.clone(),
                question_text: question.question_text.clone(),
                user_answer: user_answer.to_string(),
                correct_answer: question.correct_answer.clone(),
                explanation: question.explanation.clone(),
                is_correct,
                timestamp: now,
            },
        );

        self.active = None;
        self.state = TurnState::Resolved;

        TurnOutcome {
            question,
            evaluation,
            attempt_id: attempt.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mastery::TopicStats;
    use crate::model::{MasteryRecord, NewQuestion};
    use crate::traits::GenerateResponse;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Generator double returning scripted responses in order.
    struct ScriptedGenerator {
        responses: Mutex<Vec<String>>,
        calls: AtomicU32,
        fail: bool,
    }

    impl ScriptedGenerator {
        fn new(responses: &[&str]) -> Self {
            let mut list: Vec<String> = responses.iter().map(|s| s.to_string()).collect();
            list.reverse();
            Self {
                responses: Mutex::new(list),
                calls: AtomicU32::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                responses: Mutex::new(Vec::new()),
                calls: AtomicU32::new(0),
                fail: true,
            }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(
            &self,
            request: &GenerateRequest,
        ) -> anyhow::Result<GenerateResponse> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.fail {
                anyhow::bail!("connection refused");
            }
            let content = self
                .responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| "[STATUS]INCORRECT[FEEDBACK]default".to_string());
            Ok(GenerateResponse {
                content,
                model: request.model.clone(),
                latency_ms: 1,
            })
        }
    }

    #[derive(Default)]
    struct StoreState {
        questions: Vec<Question>,
        attempts: Vec<Attempt>,
        mastery: HashMap<(String, String, String), MasteryRecord>,
    }

    /// Store double with per-operation failure toggles.
    #[derive(Default)]
    struct TestStore {
        state: Mutex<StoreState>,
        fail_inserts: bool,
        fail_attempts: bool,
    }

    impl TestStore {
        fn with_questions(questions: Vec<Question>) -> Self {
            Self {
                state: Mutex::new(StoreState {
                    questions,
                    ..Default::default()
                }),
                ..Default::default()
            }
        }

        fn attempt_count(&self) -> usize {
            self.state.lock().unwrap().attempts.len()
        }

        fn mastery_for(&self, user: &str, topic: &str, course: &str) -> Option<(u32, u32)> {
            self.state
                .lock()
                .unwrap()
                .mastery
                .get(&(user.into(), topic.into(), course.into()))
                .map(|r| (r.correct_count, r.total_attempts))
        }
    }

    #[async_trait]
    impl QuestionStore for TestStore {
        async fn list_by_topic(
            &self,
            topic: &str,
            course: &str,
            limit: usize,
        ) -> anyhow::Result<Vec<Question>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .questions
                .iter()
                .filter(|q| q.topic == topic && q.course == course)
                .take(limit)
                .cloned()
                .collect())
        }

        async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<Question> {
            if self.fail_inserts {
                anyhow::bail!("store write rejected");
            }
            let q = Question {
                id: format!("q-{}", self.state.lock().unwrap().questions.len() + 1),
                topic: question.topic,
                course: question.course,
                question_text: question.question_text,
                hint: question.hint,
                correct_answer: question.correct_answer,
                explanation: question.explanation,
            };
            self.state.lock().unwrap().questions.push(q.clone());
            Ok(q)
        }

        async fn mastery_table(
            &self,
            user_id: &str,
            course: &str,
        ) -> anyhow::Result<MasteryTable> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .mastery
                .values()
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
                .collect())
        }

        async fn bump_mastery(
            &self,
            user_id: &str,
            topic: &str,
            course: &str,
            is_correct: bool,
            at: chrono::DateTime<Utc>,
        ) -> anyhow::Result<MasteryRecord> {
            let mut state = self.state.lock().unwrap();
            let record = state
                .mastery
                .entry((user_id.into(), topic.into(), course.into()))
                .or_insert_with(|| MasteryRecord {
                    user_id: user_id.into(),
                    topic: topic.into(),
                    course: course.into(),
                    correct_count: 0,
                    total_attempts: 0,
                    last_practiced_at: at,
                });
            record.total_attempts += 1;
            if is_correct {
                record.correct_count += 1;
            }
            record.last_practiced_at = at;
            Ok(record.clone())
        }

        async fn insert_attempt(&self, attempt: Attempt) -> anyhow::Result<()> {
            if self.fail_attempts {
                anyhow::bail!("store write rejected");
            }
            self.state.lock().unwrap().attempts.push(attempt);
            Ok(())
        }

        async fn list_attempts(
            &self,
            user_id: &str,
            course: &str,
            limit: usize,
        ) -> anyhow::Result<Vec<(Attempt, Option<Question>)>> {
            let state = self.state.lock().unwrap();
            let mut items: Vec<(Attempt, Option<Question>)> = state
                .attempts
                .iter()
                .filter(|a| a.user_id == user_id)
                .map(|a| {
                    let q = state
                        .questions
                        .iter()
                        .find(|q| q.id == a.question_id && q.course == course)
                        .cloned();
                    (a.clone(), q)
                })
                .collect();
            items.sort_by(|a, b| b.0.created_at.cmp(&a.0.created_at));
            items.truncate(limit);
            Ok(items)
        }
    }

    const QUESTION_RESPONSE: &str =
        "[QUESTION]Solve $2^x = 8$[HINT]Powers of 2.[ANSWER]x = 3[EXPLANATION]$8 = 2^3$.";

    fn stored_question(id: &str, topic: &str) -> Question {
        Question {
            id: id.into(),
            topic: topic.into(),
            course: "IB".into(),
            question_text: "old question".into(),
            hint: None,
            correct_answer: "42".into(),
            explanation: "because".into(),
        }
    }

    fn session(generator: Arc<ScriptedGenerator>, store: Arc<TestStore>) -> Session {
        Session::new(
            generator,
            store,
            SessionContext::new("user-1", "IB"),
            SessionConfig::default(),
        )
    }

    fn generate_draws() -> TurnDraws {
        TurnDraws {
            review: 0.99,
            pick: 0.0,
        }
    }

    #[tokio::test]
    async fn generation_path_serves_and_persists() {
        let generator = Arc::new(ScriptedGenerator::new(&[QUESTION_RESPONSE]));
        let store = Arc::new(TestStore::default());
        let mut session = session(Arc::clone(&generator), Arc::clone(&store));

        let served = session
            .request_question("Exponents and logarithms", generate_draws())
            .await
            .unwrap();

        assert_eq!(served.source, QuestionSource::Generated);
        assert_eq!(served.question.id, "q-1");
        assert!(!served.question.is_ephemeral());
        assert_eq!(session.state(), TurnState::QuestionActive);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn review_hit_bypasses_generator() {
        let generator = Arc::new(ScriptedGenerator::new(&[]));
        let store = Arc::new(TestStore::with_questions(vec![
            stored_question("q-old", "Binomial theorem"),
        ]));
        let mut session = session(Arc::clone(&generator), store);

        let served = session
            .request_question(
                "Binomial theorem",
                TurnDraws {
                    review: 0.05,
                    pick: 0.0,
                },
            )
            .await
            .unwrap();

        assert_eq!(served.source, QuestionSource::Review);
        assert_eq!(served.question.id, "q-old");
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn review_draw_above_threshold_always_generates() {
        let generator = Arc::new(ScriptedGenerator::new(&[QUESTION_RESPONSE]));
        let store = Arc::new(TestStore::with_questions(vec![
            stored_question("q-old", "Binomial theorem"),
        ]));
        let mut session = session(Arc::clone(&generator), store);

        let served = session
            .request_question(
                "Binomial theorem",
                TurnDraws {
                    review: 0.10,
                    pick: 0.0,
                },
            )
            .await
            .unwrap();

        assert_eq!(served.source, QuestionSource::Generated);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn malformed_output_is_terminal_for_the_turn() {
        let generator = Arc::new(ScriptedGenerator::new(&["[QUESTION]no other tags"]));
        let store = Arc::new(TestStore::default());
        let mut session = session(Arc::clone(&generator), store);

        let err = session
            .request_question("Proofs (Deductive)", generate_draws())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::MalformedOutput { .. }));
        assert_eq!(session.state(), TurnState::Idle);
        // No silent retry
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn generator_unreachable_returns_to_idle() {
        let generator = Arc::new(ScriptedGenerator::failing());
        let store = Arc::new(TestStore::default());
        let mut session = session(generator, store);

        let err = session
            .request_question("Kinematics", generate_draws())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::GeneratorUnavailable(_)));
        assert_eq!(session.state(), TurnState::Idle);
    }

    #[tokio::test]
    async fn store_insert_failure_falls_back_to_ephemeral_id() {
        let generator = Arc::new(ScriptedGenerator::new(&[QUESTION_RESPONSE]));
        let store = Arc::new(TestStore {
            fail_inserts: true,
            ..Default::default()
        });
        let mut session = session(generator, store);

        let served = session
            .request_question("Exponents and logarithms", generate_draws())
            .await
            .unwrap();

        assert!(served.question.is_ephemeral());
        assert_eq!(session.state(), TurnState::QuestionActive);
    }

    #[tokio::test]
    async fn graded_submission_resolves_and_records() {
        let generator = Arc::new(ScriptedGenerator::new(&[
            QUESTION_RESPONSE,
            "[STATUS]CORRECT[FEEDBACK]nice job",
        ]));
        let store = Arc::new(TestStore::default());
        let mut session = session(Arc::clone(&generator), Arc::clone(&store));

        session
            .request_question("Exponents and logarithms", generate_draws())
            .await
            .unwrap();
        let outcome = session.submit_answer("x = 3").await.unwrap();

        assert_eq!(outcome.evaluation.status, EvalStatus::Correct);
        assert_eq!(outcome.evaluation.feedback, "nice job");
        assert_eq!(session.state(), TurnState::Resolved);
        assert_eq!(store.attempt_count(), 1);
        assert_eq!(
            store.mastery_for("user-1", "Exponents and logarithms", "IB"),
            Some((1, 1))
        );
        assert_eq!(session.history().len(), 1);
        assert!(session.history()[0].is_correct);
    }

    #[tokio::test]
    async fn partial_counts_as_not_correct() {
        let generator = Arc::new(ScriptedGenerator::new(&[
            QUESTION_RESPONSE,
            "[STATUS]PARTIAL[FEEDBACK]halfway there",
        ]));
        let store = Arc::new(TestStore::default());
        let mut session = session(generator, Arc::clone(&store));

        session
            .request_question("Exponents and logarithms", generate_draws())
            .await
            .unwrap();
        let outcome = session.submit_answer("x = 2").await.unwrap();

        assert_eq!(outcome.evaluation.status, EvalStatus::Partial);
        assert_eq!(
            store.mastery_for("user-1", "Exponents and logarithms", "IB"),
            Some((0, 1))
        );
    }

    #[tokio::test]
    async fn surrender_skips_generator_and_counts_incorrect() {
        let generator = Arc::new(ScriptedGenerator::new(&[QUESTION_RESPONSE]));
        let store = Arc::new(TestStore::default());
        let mut session = session(Arc::clone(&generator), Arc::clone(&store));

        session
            .request_question("Exponents and logarithms", generate_draws())
            .await
            .unwrap();
        let calls_before = generator.call_count();
        let outcome = session.surrender().await.unwrap();

        assert_eq!(outcome.evaluation.status, EvalStatus::Surrendered);
        assert!(!outcome.evaluation.status.is_correct());
        assert_eq!(generator.call_count(), calls_before);
        assert_eq!(store.attempt_count(), 1);
        assert_eq!(
            store.mastery_for("user-1", "Exponents and logarithms", "IB"),
            Some((0, 1))
        );
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn attempt_write_failure_does_not_block_resolution() {
        let generator = Arc::new(ScriptedGenerator::new(&[
            QUESTION_RESPONSE,
            "[STATUS]CORRECT[FEEDBACK]well done",
        ]));
        let store = Arc::new(TestStore {
            fail_attempts: true,
            ..Default::default()
        });
        let mut session = session(generator, Arc::clone(&store));

        session
            .request_question("Exponents and logarithms", generate_draws())
            .await
            .unwrap();
        let outcome = session.submit_answer("x = 3").await.unwrap();

        // User still gets the verdict; mastery and history still advance.
        assert_eq!(outcome.evaluation.status, EvalStatus::Correct);
        assert_eq!(store.attempt_count(), 0);
        assert_eq!(
            store.mastery_for("user-1", "Exponents and logarithms", "IB"),
            Some((1, 1))
        );
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn failed_grading_clears_the_active_question() {
        let generator = Arc::new(ScriptedGenerator::new(&[
            QUESTION_RESPONSE,
            "[STATUS]CORRECT but no feedback tag",
        ]));
        let store = Arc::new(TestStore::default());
        let mut session = session(generator, store);

        session
            .request_question("Exponents and logarithms", generate_draws())
            .await
            .unwrap();
        let err = session.submit_answer("x = 3").await.unwrap_err();

        assert!(matches!(err, CoreError::MalformedOutput { .. }));
        assert_eq!(session.state(), TurnState::Idle);
        assert!(session.active_question().is_none());

        // Resubmission against the aborted turn is rejected.
        let err = session.submit_answer("x = 3").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn submit_without_active_question_is_invalid() {
        let generator = Arc::new(ScriptedGenerator::new(&[]));
        let store = Arc::new(TestStore::default());
        let mut session = session(generator, store);

        let err = session.submit_answer("anything").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn empty_topic_is_invalid() {
        let generator = Arc::new(ScriptedGenerator::new(&[]));
        let store = Arc::new(TestStore::default());
        let mut session = session(generator, store);

        let err = session
            .request_question("  ", generate_draws())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn recommendation_uses_store_counters() {
        let generator = Arc::new(ScriptedGenerator::new(&[]));
        let store = Arc::new(TestStore::default());
        store
            .bump_mastery("user-1", "A", "IB", true, Utc::now())
            .await
            .unwrap();
        let session = session(generator, store);

        let universe: Vec<String> = ["A", "B"].map(String::from).to_vec();
        // A is at 100%, untouched B ranks at 0% for every draw.
        for draw in [0.0, 0.5, 0.99] {
            let rec = session.recommend_topic(&universe, draw).await.unwrap();
            assert_eq!(rec.as_deref(), Some("B"));
        }
    }
}
