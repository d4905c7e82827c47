//! # Tree Mutations
//!
//! High-level operations the session applies to the page tree.
//!
//! ## Semantics
//!
//! ### MoveElement
//! - Drops `node_id` onto `over_id`, which is always a sibling anchor
//! - Same list: stable move to the anchor's index
//! - Other list: detach and insert before the anchor
//! - Dropping on itself or into its own subtree does nothing
//!
//! ### UpdateProperties
//! - Shallow merge, a present field replaces the whole field
//!
//! ### RemoveNode
//! - Removes the node and all descendants
//!
//! A mutation whose target is gone is not an error: validation reports a
//! [`NoopReason`] and the tree stays as it was.

use pagecraft_document::tree::{self, MovePlan, MoveRejection};
use pagecraft_document::{Element, ElementPatch, TreeError, Viewport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations applied by the session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Merge a partial update into a node
    #[serde(rename_all = "camelCase")]
    UpdateProperties { node_id: String, patch: ElementPatch },

    /// Set one style property, on the base style or one viewport's overrides
    #[serde(rename_all = "camelCase")]
    SetStyleProperty {
        node_id: String,
        property: String,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        viewport: Option<Viewport>,
    },

    #[serde(rename_all = "camelCase")]
    RemoveStyleProperty {
        node_id: String,
        property: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        viewport: Option<Viewport>,
    },

    /// Remove a node and its subtree
    #[serde(rename_all = "camelCase")]
    RemoveNode { node_id: String },

    /// Insert under `parent_id` (root when `None`), appending when `index` is `None`
    #[serde(rename_all = "camelCase")]
    InsertElement {
        #[serde(default)]
        parent_id: Option<String>,
        #[serde(default)]
        index: Option<usize>,
        element: Element,
    },

    /// Drop an existing node onto another
    #[serde(rename_all = "camelCase")]
    MoveElement { node_id: String, over_id: String },

    /// Append a batch of nodes to the root sequence
    AppendElements { elements: Vec<Element> },
}

/// Why a mutation left the tree unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NoopReason {
    #[serde(rename_all = "camelCase")]
    NotFound { node_id: String },
    #[serde(rename_all = "camelCase")]
    ContainerNotFound { container_id: String },
    WouldCreateCycle,
    DroppedOnSelf,
    NoDropTarget,
    /// The mutation ran but produced an identical tree
    Unchanged,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Node dropped onto itself")]
    DroppedOnSelf,

    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl MutationError {
    /// The no-op this error stands for; `None` for genuine failures
    pub fn noop_reason(&self) -> Option<NoopReason> {
        match self {
            MutationError::NodeNotFound(id) => Some(NoopReason::NotFound {
                node_id: id.clone(),
            }),
            MutationError::ContainerNotFound(id) => Some(NoopReason::ContainerNotFound {
                container_id: id.clone(),
            }),
            MutationError::CycleDetected => Some(NoopReason::WouldCreateCycle),
            MutationError::DroppedOnSelf => Some(NoopReason::DroppedOnSelf),
            MutationError::Tree(_) => None,
        }
    }
}

impl Mutation {
    /// Apply to `tree`, returning the new tree
    pub fn apply(&self, tree: &[Element]) -> Result<Vec<Element>, MutationError> {
        self.validate(tree)?;

        match self {
            Mutation::UpdateProperties { node_id, patch } => {
                Ok(tree::update_by_id(tree, node_id, patch))
            }

            Mutation::SetStyleProperty {
                node_id,
                property,
                value,
                viewport,
            } => Ok(Self::edit_style(tree, node_id, *viewport, |style| {
                style.insert(property.clone(), value.clone());
            })),

            Mutation::RemoveStyleProperty {
                node_id,
                property,
                viewport,
            } => Ok(Self::edit_style(tree, node_id, *viewport, |style| {
                style.remove(property);
            })),

            Mutation::RemoveNode { node_id } => Ok(tree::remove_by_id(tree, node_id)),

            Mutation::InsertElement {
                parent_id,
                index,
                element,
            } => Ok(tree::insert_into(
                tree,
                parent_id.as_deref(),
                element.clone(),
                *index,
            )?),

            Mutation::MoveElement { node_id, over_id } => {
                let plan = tree::plan_move(tree, node_id, over_id);
                Ok(tree::apply_move(tree, node_id, &plan))
            }

            Mutation::AppendElements { elements } => {
                let mut next = tree.to_vec();
                for element in elements {
                    next = tree::insert_into(&next, None, element.clone(), None)?;
                }
                Ok(next)
            }
        }
    }

    /// Build a patch that replaces one style map with an edited copy
    fn edit_style(
        tree: &[Element],
        node_id: &str,
        viewport: Option<Viewport>,
        edit: impl FnOnce(&mut pagecraft_document::StyleMap),
    ) -> Vec<Element> {
        let Some(node) = tree::find_by_id(tree, node_id) else {
            return tree.to_vec();
        };

        let patch = match viewport {
            None => {
                let mut style = node.style.clone();
                edit(&mut style);
                ElementPatch::style(style)
            }
            Some(viewport) => {
                let mut responsive = node.responsive_style.clone();
                edit(responsive.get_mut(viewport));
                ElementPatch {
                    responsive_style: Some(responsive),
                    ..ElementPatch::default()
                }
            }
        };

        tree::update_by_id(tree, node_id, &patch)
    }

    /// Validate without applying
    pub fn validate(&self, tree: &[Element]) -> Result<(), MutationError> {
        match self {
            Mutation::UpdateProperties { node_id, .. }
            | Mutation::SetStyleProperty { node_id, .. }
            | Mutation::RemoveStyleProperty { node_id, .. }
            | Mutation::RemoveNode { node_id } => {
                if tree::contains_id(tree, node_id) {
                    Ok(())
                } else {
                    Err(MutationError::NodeNotFound(node_id.clone()))
                }
            }

            Mutation::InsertElement { parent_id, .. } => match parent_id {
                Some(id) if !tree::contains_id(tree, id) => {
                    Err(MutationError::ContainerNotFound(id.clone()))
                }
                _ => Ok(()),
            },

            Mutation::MoveElement { node_id, over_id } => {
                match tree::plan_move(tree, node_id, over_id) {
                    MovePlan::Rejected(MoveRejection::DroppedOnSelf) => {
                        Err(MutationError::DroppedOnSelf)
                    }
                    MovePlan::Rejected(MoveRejection::ActiveNotFound) => {
                        Err(MutationError::NodeNotFound(node_id.clone()))
                    }
                    MovePlan::Rejected(MoveRejection::TargetNotFound) => {
                        Err(MutationError::NodeNotFound(over_id.clone()))
                    }
                    MovePlan::Rejected(MoveRejection::WouldCreateCycle) => {
                        Err(MutationError::CycleDetected)
                    }
                    MovePlan::Reorder { .. } | MovePlan::Reparent { .. } => Ok(()),
                }
            }

            Mutation::AppendElements { .. } => Ok(()),
        }
    }

    /// The node this mutation is about, if any
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Mutation::UpdateProperties { node_id, .. }
            | Mutation::SetStyleProperty { node_id, .. }
            | Mutation::RemoveStyleProperty { node_id, .. }
            | Mutation::RemoveNode { node_id }
            | Mutation::MoveElement { node_id, .. } => Some(node_id),
            Mutation::InsertElement { element, .. } => Some(&element.id),
            Mutation::AppendElements { .. } => None,
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MutationResult {
    /// The tree changed; `version` is the session's new version
    Applied { version: u64 },
    Noop { reason: NoopReason },
}

impl MutationResult {
    pub fn noop(reason: NoopReason) -> Self {
        MutationResult::Noop { reason }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, MutationResult::Applied { .. })
    }
}
