//! The `drill progress` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use drillforge_core::mastery::{self, TopicStats};

pub async fn execute(course: String, recent: usize, config_path: Option<PathBuf>) -> Result<()> {
    let env = super::env(config_path)?;
    let table = env
        .store
        .mastery_table(&env.config.user_id, &course)
        .await?;

    if table.is_empty() {
        println!("No attempts recorded for course '{course}' yet. Run: drill practice");
        return Ok(());
    }

    let mut rows: Vec<(&String, &TopicStats)> = table.iter().collect();
    rows.sort_by(|a, b| {
        mastery::accuracy(*a.1)
            .partial_cmp(&mastery::accuracy(*b.1))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let mut out = Table::new();
    out.set_header(vec!["", "Topic", "Level", "Correct", "Attempts", "Accuracy"]);
    for (topic, stats) in rows {
        out.add_row(vec![
            mastery::traffic_light(*stats).to_string(),
            topic.clone(),
            mastery::level(*stats).as_str().to_string(),
            stats.correct.to_string(),
            stats.total.to_string(),
            format!("{:.0}%", mastery::accuracy(*stats)),
        ]);
    }
    println!("{out}");

    let attempts = env
        .store
        .list_attempts(&env.config.user_id, &course, recent)
        .await?;
    if attempts.is_empty() {
        return Ok(());
    }

    println!("\nRecent attempts:");
    let mut out = Table::new();
    out.set_header(vec!["When", "Topic", "Result", "Your answer"]);
    for (attempt, question) in attempts {
        out.add_row(vec![
            attempt.created_at.format("%Y-%m-%d %H:%M").to_string(),
            question.map(|q| q.topic).unwrap_or_else(|| "?".into()),
            if attempt.is_correct { "correct" } else { "incorrect" }.to_string(),
            attempt.user_answer,
        ]);
    }
    println!("{out}");

    Ok(())
}
