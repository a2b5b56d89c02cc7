//! The `drill practice` command: the interactive tutoring loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::Rng;

use drillforge_core::model::{EvalStatus, SessionContext};
use drillforge_core::session::{QuestionSource, Session, SessionConfig, TurnDraws, TurnOutcome};

pub async fn execute(
    topic: Option<String>,
    course: String,
    syllabus_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let env = super::env(config_path)?;
    let generator = super::build_generator(&env.config)?;
    let syllabus = super::load_syllabus(&course, syllabus_path.as_deref(), &env.config)?;
    let universe = syllabus.topic_universe();

    if let Some(t) = &topic {
        if !syllabus.contains_topic(t) {
            anyhow::bail!("topic '{t}' is not in the {} syllabus", syllabus.name);
        }
    }

    let ctx = SessionContext::new(env.config.user_id.clone(), course);
    let session_config = SessionConfig {
        model: env.config.default_model.clone(),
        max_tokens: env.config.max_tokens,
        temperature: env.config.default_temperature,
    };
    let mut session = Session::new(generator, env.store, ctx, session_config);
    let mut rng = rand::thread_rng();

    println!("{}", syllabus.name);
    println!("Type your answer, or: hint, giveup, quit\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let turn_topic = match &topic {
            Some(t) => t.clone(),
            None => session
                .recommend_topic(&universe, rng.gen())
                .await?
                .context("syllabus has no topics")?,
        };

        let draws = TurnDraws {
            review: rng.gen(),
            pick: rng.gen(),
        };
        let served = session.request_question(&turn_topic, draws).await?;

        match served.source {
            QuestionSource::Review => println!("--- {turn_topic} (review) ---"),
            QuestionSource::Generated => println!("--- {turn_topic} ---"),
        }
        println!("{}\n", served.question.question_text);

        let outcome = loop {
            print!("> ");
            io::stdout().flush()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    print_summary(&session);
                    return Ok(());
                }
            };
            match line.trim() {
                "" => continue,
                "quit" | "q" => {
                    print_summary(&session);
                    return Ok(());
                }
                "hint" => match &served.question.hint {
                    Some(h) => println!("Hint: {h}"),
                    None => println!("No hint for this one."),
                },
                "giveup" => break session.surrender().await?,
                answer => break session.submit_answer(answer).await?,
            }
        };

        print_outcome(&outcome);
    }
}

fn print_outcome(outcome: &TurnOutcome) {
    match outcome.evaluation.status {
        EvalStatus::Correct => println!("\nCorrect. {}", outcome.evaluation.feedback),
        EvalStatus::Partial => println!("\nPartially correct. {}", outcome.evaluation.feedback),
        EvalStatus::Incorrect => println!("\nIncorrect. {}", outcome.evaluation.feedback),
        EvalStatus::Surrendered => println!("\n{}", outcome.evaluation.feedback),
    }

    if !outcome.evaluation.status.is_correct() {
        println!("Answer: {}", outcome.question.correct_answer);
        println!("Explanation: {}", outcome.question.explanation);
    }
    println!();
}

fn print_summary(session: &Session) {
    let total = session.history().len();
    if total == 0 {
        return;
    }
    let correct = session.history().iter().filter(|h| h.is_correct).count();
    println!("\nSession: {correct}/{total} correct.");
}
