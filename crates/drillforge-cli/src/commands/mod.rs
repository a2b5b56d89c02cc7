pub mod init;
pub mod practice;
pub mod progress;
pub mod topics;
pub mod validate;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use drillforge_core::syllabus::{self, Syllabus};
use drillforge_core::traits::{QuestionStore, TextGenerator};
use drillforge_providers::{create_generator, load_config_from, DrillforgeConfig};
use drillforge_store::JsonStore;

/// Load config from the given path or the default search locations.
pub(crate) fn config(path: Option<&Path>) -> Result<DrillforgeConfig> {
    load_config_from(path)
}

/// Open the JSON store named by the config.
pub(crate) fn open_store(config: &DrillforgeConfig) -> Result<Arc<dyn QuestionStore>> {
    Ok(Arc::new(JsonStore::open(&config.store_path)?))
}

/// Build the configured default generator.
pub(crate) fn build_generator(config: &DrillforgeConfig) -> Result<Arc<dyn TextGenerator>> {
    let provider_config = config
        .providers
        .get(&config.default_provider)
        .with_context(|| {
            format!(
                "provider '{}' not configured. Run 'drill init' and edit drillforge.toml",
                config.default_provider
            )
        })?;
    Ok(Arc::from(create_generator(provider_config)?))
}

/// Load the syllabus for `course` from an explicit path or the config's
/// syllabus directory.
pub(crate) fn load_syllabus(
    course: &str,
    path: Option<&Path>,
    config: &DrillforgeConfig,
) -> Result<Syllabus> {
    let syllabi = match path {
        Some(p) if p.is_dir() => syllabus::load_syllabus_directory(p)?,
        Some(p) => vec![syllabus::parse_syllabus(p)?],
        None => syllabus::load_syllabus_directory(&config.syllabus_dir).with_context(|| {
            format!(
                "no syllabus directory at {}. Run 'drill init' to create one",
                config.syllabus_dir.display()
            )
        })?,
    };

    syllabi
        .into_iter()
        .find(|s| s.course == course)
        .with_context(|| format!("no syllabus found for course '{course}'"))
}

/// Resolve config, store, and generator for the session commands.
pub(crate) struct CommandEnv {
    pub config: DrillforgeConfig,
    pub store: Arc<dyn QuestionStore>,
}

pub(crate) fn env(config_path: Option<PathBuf>) -> Result<CommandEnv> {
    let config = config(config_path.as_deref())?;
    let store = open_store(&config)?;
    Ok(CommandEnv { config, store })
}
