//! Persistence backends for drillforge.
//!
//! Two implementations of [`drillforge_core::traits::QuestionStore`]:
//! an in-memory store for tests and throwaway sessions, and a JSON
//! snapshot store that persists the same state to a single file.

pub mod json;
pub mod memory;

mod inner;

pub use json::JsonStore;
pub use memory::MemoryStore;
