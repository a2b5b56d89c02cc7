//! drillforge-core — Core tutoring engine, traits, and scoring.
//!
//! This crate defines the data model, collaborator traits, mastery model,
//! scheduling policy, and output-parsing contract that the entire drillforge
//! system builds on.

pub mod error;
pub mod mastery;
pub mod model;
pub mod parser;
pub mod policy;
pub mod prompts;
pub mod session;
pub mod syllabus;
pub mod traits;
