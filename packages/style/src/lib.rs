//! # Pagecraft Style
//!
//! Style resolution for the page tree: responsive overrides, theme-derived
//! defaults, the per-viewport column clamp, and the resolved render tree.

pub mod layout;
pub mod resolve;

pub use layout::{render_tree, RenderNode};
pub use resolve::{clamp_columns, effective_column_count, resolve, StyleResolver};
