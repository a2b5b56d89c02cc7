//! TOML syllabus loader.
//!
//! Syllabi are static: a course is a fixed tree of units and topics defined
//! outside the core. Loads syllabus files and directories, and validates
//! them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A course syllabus: the full topic universe questions are tagged against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Syllabus {
    /// Unique identifier (e.g. "ib-math-aa-sl").
    pub id: String,
    /// Course identifier questions and mastery records are keyed by.
    pub course: String,
    /// Human-readable name.
    pub name: String,
    /// The units in this syllabus.
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// A parent grouping of topics (e.g. "Topic 5: Calculus").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// The smallest syllabus unit a question is tagged with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
}

impl Syllabus {
    /// Flat list of every topic title, in syllabus order.
    pub fn topic_universe(&self) -> Vec<String> {
        self.units
            .iter()
            .flat_map(|u| u.topics.iter().map(|t| t.title.clone()))
            .collect()
    }

    /// The unit a topic title belongs to, if any.
    pub fn unit_of(&self, topic_title: &str) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| u.topics.iter().any(|t| t.title == topic_title))
    }

    /// Returns `true` if the title names a topic in this syllabus.
    pub fn contains_topic(&self, topic_title: &str) -> bool {
        self.unit_of(topic_title).is_some()
    }
}

/// Intermediate TOML structure for syllabus files.
#[derive(Debug, Deserialize)]
struct TomlSyllabusFile {
    syllabus: TomlSyllabusHeader,
    #[serde(default)]
    units: Vec<Unit>,
}

#[derive(Debug, Deserialize)]
struct TomlSyllabusHeader {
    id: String,
    course: String,
    name: String,
}

/// Parse a single TOML file into a `Syllabus`.
pub fn parse_syllabus(path: &Path) -> Result<Syllabus> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read syllabus file: {}", path.display()))?;

    parse_syllabus_str(&content, path)
}

/// Parse a TOML string into a `Syllabus` (useful for testing).
pub fn parse_syllabus_str(content: &str, source_path: &Path) -> Result<Syllabus> {
    let parsed: TomlSyllabusFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(Syllabus {
        id: parsed.syllabus.id,
        course: parsed.syllabus.course,
        name: parsed.syllabus.name,
        units: parsed.units,
    })
}

/// Recursively load all `.toml` syllabus files from a directory.
pub fn load_syllabus_directory(dir: &Path) -> Result<Vec<Syllabus>> {
    let mut syllabi = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            syllabi.extend(load_syllabus_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_syllabus(&path) {
                Ok(s) => syllabi.push(s),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(syllabi)
}

/// A warning from syllabus validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The topic ID (if applicable).
    pub topic_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a syllabus for common issues.
pub fn validate_syllabus(syllabus: &Syllabus) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate topic ids or titles across the whole tree
    let mut seen_ids = std::collections::HashSet::new();
    let mut seen_titles = std::collections::HashSet::new();
    for unit in &syllabus.units {
        for topic in &unit.topics {
            if !seen_ids.insert(&topic.id) {
                warnings.push(ValidationWarning {
                    topic_id: Some(topic.id.clone()),
                    message: format!("duplicate topic id: {}", topic.id),
                });
            }
            if !seen_titles.insert(&topic.title) {
                warnings.push(ValidationWarning {
                    topic_id: Some(topic.id.clone()),
                    message: format!("duplicate topic title: {}", topic.title),
                });
            }
            if topic.title.trim().is_empty() {
                warnings.push(ValidationWarning {
                    topic_id: Some(topic.id.clone()),
                    message: "topic title is empty".into(),
                });
            }
        }
    }

    // Units with no topics can never be recommended or practiced
    for unit in &syllabus.units {
        if unit.topics.is_empty() {
            warnings.push(ValidationWarning {
                topic_id: None,
                message: format!("unit '{}' has no topics", unit.id),
            });
        }
    }

    if syllabus.units.is_empty() {
        warnings.push(ValidationWarning {
            topic_id: None,
            message: "syllabus has no units".into(),
        });
    }

    warnings
}
