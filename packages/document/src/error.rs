use thiserror::Error;

/// Errors raised by the tree model
///
/// Stale ids are not errors; the tree operations treat them as no-ops.
/// These variants cover inputs that no intended call path produces.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("Unknown element kind: {0}")]
    UnknownKind(String),
}
