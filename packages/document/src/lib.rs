//! # Pagecraft Document
//!
//! The page tree: element schema, kinds, theme tokens, id minting and the
//! pure structural operations every editor path goes through.
//!
//! ```text
//! root sequence
//! ├── container (x)
//! │   ├── paragraph (p)   parentId = x, position = 0
//! │   └── button (q)      parentId = x, position = 1
//! └── image (r)           parentId = null, position = 1
//! ```
//!
//! Ownership flows only through `children`. `parentId` and `position` are
//! derived and kept in step by [`tree`].

pub mod defaults;
pub mod element;
pub mod error;
pub mod id_generator;
pub mod kind;
pub mod theme;
pub mod tree;

pub use defaults::{default_content, default_style};
pub use element::{Animation, Element, ElementPatch, ResponsiveStyles, StyleMap, Viewport};
pub use error::TreeError;
pub use id_generator::{get_project_seed, IdGenerator};
pub use kind::{palette, ElementKind, PaletteGroup};
pub use theme::{ThemeDefaults, ThemeSettings, DEFAULT_THEME};
pub use tree::{Located, MovePlan, MoveRejection};
