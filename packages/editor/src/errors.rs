//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] pagecraft_common::CommonError),

    #[error("Tree error: {0}")]
    Tree(#[from] pagecraft_document::TreeError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("Content generation failed: {0}")]
    Generator(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}
