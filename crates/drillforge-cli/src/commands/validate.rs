//! The `drill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use drillforge_core::syllabus;

pub fn execute(syllabus_path: PathBuf) -> Result<()> {
    let syllabi = if syllabus_path.is_dir() {
        syllabus::load_syllabus_directory(&syllabus_path)?
    } else {
        vec![syllabus::parse_syllabus(&syllabus_path)?]
    };

    if syllabi.is_empty() {
        anyhow::bail!("no syllabus files found in {}", syllabus_path.display());
    }

    let mut total_warnings = 0;

    for s in &syllabi {
        println!(
            "Syllabus: {} ({} topics)",
            s.name,
            s.topic_universe().len()
        );

        let warnings = syllabus::validate_syllabus(s);
        for w in &warnings {
            let prefix = w
                .topic_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All syllabi valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
