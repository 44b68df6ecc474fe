// Mutation engine: copy-on-write document edits plus linear undo/redo.
// Every edit produces a new snapshot; nothing mutates a snapshot in place.

pub mod engine;
pub mod history;
pub mod mutations;

use thiserror::Error;

pub use engine::DocumentEditor;

/// Input-validation failures. Unresolved ids are not errors; they degrade to
/// no-ops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("section order must list all {expected} sections, got {got}")]
    IncompleteOrdering { expected: usize, got: usize },

    #[error("section '{0}' appears more than once in the requested order")]
    DuplicateSection(String),

    #[error("section '{0}' does not exist")]
    UnknownSection(String),
}
