//! # Drag Interpretation
//!
//! Turns a finished drag gesture into a tree change.
//!
//! ```text
//! source \ target   none    canvas         container      leaf
//! palette kind      noop    append root    append inside  append to leaf's parent
//! element id        noop    noop           move (anchor)  move (anchor)
//! ```
//!
//! A move always treats the target as a sibling anchor: same list is a
//! stable array move to the anchor's index, another list places the node
//! immediately before the anchor.

use pagecraft_document::tree::{self, MovePlan, MoveRejection};
use pagecraft_document::{
    default_content, default_style, Element, ElementKind, IdGenerator, TreeError, Viewport,
};
use std::str::FromStr;
use tracing::debug;

use crate::mutations::{Mutation, NoopReason};

const PALETTE_PREFIX: &str = "palette:";
const CANVAS_REF: &str = "canvas";

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A palette entry; dropping it creates a new node
    Palette(ElementKind),
    /// An existing node
    Element(String),
}

impl DragSource {
    /// Parse a raw drag ref: `palette:<kind-tag>` or an element id
    pub fn parse(raw: &str) -> Result<Self, TreeError> {
        match raw.strip_prefix(PALETTE_PREFIX) {
            Some(tag) => Ok(DragSource::Palette(ElementKind::from_str(tag)?)),
            None => Ok(DragSource::Element(raw.to_string())),
        }
    }

    /// Raw ref for this source
    pub fn to_ref(&self) -> String {
        match self {
            DragSource::Palette(kind) => format!("{PALETTE_PREFIX}{}", kind.tag()),
            DragSource::Element(id) => id.clone(),
        }
    }
}

/// Where the drag ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Canvas,
    Element(String),
}

impl DropTarget {
    pub fn parse(raw: &str) -> Self {
        if raw == CANVAS_REF {
            DropTarget::Canvas
        } else {
            DropTarget::Element(raw.to_string())
        }
    }
}

/// A finished drag: the source plus whatever was under the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    pub source: DragSource,
    pub target: Option<DropTarget>,
}

impl DragGesture {
    pub fn new(source: DragSource, target: Option<DropTarget>) -> Self {
        Self { source, target }
    }

    /// Build from raw refs as the pointer layer reports them
    pub fn from_refs(active: &str, over: Option<&str>) -> Result<Self, TreeError> {
        Ok(Self {
            source: DragSource::parse(active)?,
            target: over.map(DropTarget::parse),
        })
    }
}

/// Inputs the interpretation needs besides the tree
pub struct DragContext<'a> {
    pub viewport: Viewport,
    pub ids: &'a mut IdGenerator,
}

/// What a gesture means for the tree
#[derive(Debug, Clone, PartialEq)]
pub enum DragIntent {
    /// Append a freshly minted node to `parent_id` (root when `None`)
    InsertNew {
        parent_id: Option<String>,
        element: Element,
    },
    /// Stable move within one list
    Reorder {
        node_id: String,
        over_id: String,
        parent_id: Option<String>,
        from: usize,
        to: usize,
    },
    /// Detach and insert before `over_id` in another list
    Reparent {
        node_id: String,
        over_id: String,
        new_parent_id: Option<String>,
        index: usize,
    },
    Noop(NoopReason),
}

impl DragIntent {
    /// The mutation that carries this intent out
    pub fn to_mutation(&self) -> Option<Mutation> {
        match self {
            DragIntent::InsertNew { parent_id, element } => Some(Mutation::InsertElement {
                parent_id: parent_id.clone(),
                index: None,
                element: element.clone(),
            }),
            DragIntent::Reorder {
                node_id, over_id, ..
            }
            | DragIntent::Reparent {
                node_id, over_id, ..
            } => Some(Mutation::MoveElement {
                node_id: node_id.clone(),
                over_id: over_id.clone(),
            }),
            DragIntent::Noop(_) => None,
        }
    }
}

/// Fresh palette node with defaults for `viewport`
pub fn palette_element(kind: ElementKind, id: String, viewport: Viewport) -> Element {
    let mut element = Element::new(id, kind).with_content(default_content(kind));
    element.style = default_style(kind, viewport);
    element
}

/// Decide what `gesture` does to `tree`
pub fn interpret(tree: &[Element], gesture: &DragGesture, ctx: &mut DragContext<'_>) -> DragIntent {
    let Some(target) = &gesture.target else {
        debug!(source = %gesture.source.to_ref(), "Drag ended outside any target");
        return DragIntent::Noop(NoopReason::NoDropTarget);
    };

    match &gesture.source {
        DragSource::Palette(kind) => interpret_palette_drop(tree, *kind, target, ctx),
        DragSource::Element(node_id) => interpret_move(tree, node_id, target),
    }
}

fn interpret_palette_drop(
    tree: &[Element],
    kind: ElementKind,
    target: &DropTarget,
    ctx: &mut DragContext<'_>,
) -> DragIntent {
    let parent_id = match target {
        DropTarget::Canvas => None,
        DropTarget::Element(over_id) => {
            let Some(over) = tree::find_with_parent(tree, over_id) else {
                debug!(over_id = %over_id, "Palette drop on stale target");
                return DragIntent::Noop(NoopReason::NotFound {
                    node_id: over_id.clone(),
                });
            };
            if over.element.kind.accepts_children() {
                Some(over.element.id.clone())
            } else {
                // Leaf target: land in the container actually under the cursor
                over.parent_id.map(str::to_string)
            }
        }
    };

    let element = palette_element(kind, ctx.ids.new_id(), ctx.viewport);
    debug!(node_id = %element.id, %kind, parent_id = ?parent_id, "Palette drop");
    DragIntent::InsertNew { parent_id, element }
}

fn interpret_move(tree: &[Element], node_id: &str, target: &DropTarget) -> DragIntent {
    let DropTarget::Element(over_id) = target else {
        debug!(node_id = %node_id, "Existing node dropped on bare canvas");
        return DragIntent::Noop(NoopReason::NoDropTarget);
    };

    match tree::plan_move(tree, node_id, over_id) {
        MovePlan::Reorder {
            parent_id,
            from,
            to,
        } => DragIntent::Reorder {
            node_id: node_id.to_string(),
            over_id: over_id.clone(),
            parent_id,
            from,
            to,
        },
        MovePlan::Reparent {
            new_parent_id,
            index,
        } => DragIntent::Reparent {
            node_id: node_id.to_string(),
            over_id: over_id.clone(),
            new_parent_id,
            index,
        },
        MovePlan::Rejected(rejection) => {
            let reason = match rejection {
                MoveRejection::DroppedOnSelf => NoopReason::DroppedOnSelf,
                MoveRejection::WouldCreateCycle => NoopReason::WouldCreateCycle,
                MoveRejection::ActiveNotFound => NoopReason::NotFound {
                    node_id: node_id.to_string(),
                },
                MoveRejection::TargetNotFound => NoopReason::NotFound {
                    node_id: over_id.clone(),
                },
            };
            DragIntent::Noop(reason)
        }
    }
}

/// The node the drag overlay shows while `source` is in flight
///
/// Palette drags preview a throwaway element that is never inserted.
pub fn drag_preview(tree: &[Element], source: &DragSource, viewport: Viewport) -> Option<Element> {
    match source {
        DragSource::Palette(kind) => Some(palette_element(
            *kind,
            format!("preview-{}", kind.tag()),
            viewport,
        )),
        DragSource::Element(id) => tree::find_by_id(tree, id).cloned(),
    }
}
