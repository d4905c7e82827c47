//! # Pagecraft Editor
//!
//! Session controller for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: element tree + pure operations    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Mutations and drag gestures              │
//! │  - Linear history with undo/redo/jump       │
//! │  - Templates, sections, generated content   │
//! │  - Save/load through a key-value store      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ style: tree → resolved render tree          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The tree is the source of truth**: resolved styles are derived views
//! 2. **Every edit is a snapshot**: history stores whole trees, shared via `Arc`
//! 3. **No-ops are values**: stale ids and rejected drops never raise
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{EditSession, EditorConfig, MemoryStore};
//! use pagecraft_document::ElementPatch;
//!
//! let config = EditorConfig::default();
//! let mut session = EditSession::new(&config)?;
//!
//! session.handle_drag_refs("palette:heading-1", Some("canvas"))?;
//! let id = session.selected_id().unwrap().to_string();
//! session.update_properties(&id, ElementPatch::content("Hello"))?;
//! session.undo();
//!
//! let mut store = MemoryStore::new();
//! session.save(&mut store)?;
//! ```

mod assets;
mod config;
mod drag;
mod errors;
mod generator;
mod history;
mod mutations;
mod session;
mod shortcuts;
mod storage;
mod templates;

pub use assets::{filter_assets, Asset, AssetFilter};
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use drag::{
    drag_preview, interpret, palette_element, DragContext, DragGesture, DragIntent, DragSource,
    DropTarget,
};
pub use errors::EditorError;
pub use generator::{generated_paragraph, CannedGenerator, ContentGenerator};
pub use history::{entry_label, HistoryConfig, HistoryEntry, HistoryLog, Snapshot};
pub use mutations::{Mutation, MutationError, MutationResult, NoopReason};
pub use session::{ChangeOrigin, EditSession, HistoryItem};
pub use shortcuts::{EditorCommand, KeyEvent, Keymap, Shortcut};
pub use storage::{
    load_project, save_project, validate_elements, FileStore, KeyValueStore, MemoryStore, Project,
    ASSETS_KEY, ELEMENTS_KEY, THEME_KEY,
};
pub use templates::{
    find_template, page_templates, search_sections, section_templates, Template,
    SECTION_CATEGORIES,
};
