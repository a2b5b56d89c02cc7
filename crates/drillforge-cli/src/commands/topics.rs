//! The `drill topics` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::Rng;

use drillforge_core::mastery::{self, TopicStats};
use drillforge_core::policy;

pub async fn execute(
    course: String,
    syllabus_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let env = super::env(config_path)?;
    let syllabus = super::load_syllabus(&course, syllabus_path.as_deref(), &env.config)?;
    let table = env
        .store
        .mastery_table(&env.config.user_id, &course)
        .await?;

    println!("{}\n", syllabus.name);
    for unit in &syllabus.units {
        println!("{}", unit.title);
        for topic in &unit.topics {
            let stats = table.get(&topic.title).copied().unwrap_or(TopicStats::default());
            println!(
                "  {} {} ({})",
                mastery::traffic_light(stats),
                topic.title,
                mastery::level(stats).as_str()
            );
        }
    }

    let universe = syllabus.topic_universe();
    let mut rng = rand::thread_rng();
    if let Some(pick) = policy::recommend_topic(&universe, &table, rng.gen()) {
        println!("\nSuggested next: {pick}");
    }

    Ok(())
}
