//! # Tree Operations
//!
//! Pure structural operations over the page tree.
//!
//! Every operation takes the current root sequence by reference and returns
//! a new one. The input is never touched, so a snapshot captured by the
//! history stays exactly as it was.
//!
//! ## No-op policy
//!
//! A stale id (already deleted, never existed) is not an error. Update,
//! remove, insert-into-missing-container and rejected moves all return a
//! tree equal to the input. Only a duplicate id on insert is reported,
//! since no intended call path produces one.
//!
//! ## Move ordering
//!
//! Moves use remove-then-insert at the target's index read before the
//! removal:
//!
//! ```text
//! [a, b, c]  move a onto c  →  [b, c, a]   (forward: lands after target)
//! [a, b, c]  move c onto a  →  [c, a, b]   (backward: lands before target)
//! X[p, q], r  move r onto q →  X[p, r, q]  (other list: lands before target)
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::element::{Element, ElementPatch};
use crate::error::TreeError;

/// A node together with where it sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located<'a> {
    pub element: &'a Element,
    /// `None` for root-level nodes
    pub parent_id: Option<&'a str>,
    pub index: usize,
}

/// How a drag of one existing node onto another resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan {
    /// Both nodes share a parent: stable array move within that list
    Reorder {
        parent_id: Option<String>,
        from: usize,
        to: usize,
    },
    /// Detach and insert into the target's parent at the target's index
    Reparent {
        new_parent_id: Option<String>,
        index: usize,
    },
    Rejected(MoveRejection),
}

/// Why a move resolves to nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    DroppedOnSelf,
    ActiveNotFound,
    TargetNotFound,
    /// Target lies inside the dragged node's own subtree
    WouldCreateCycle,
}

/// Depth-first search for `id`
pub fn find_by_id<'a>(tree: &'a [Element], id: &str) -> Option<&'a Element> {
    for element in tree {
        if element.id == id {
            return Some(element);
        }
        if let Some(found) = find_by_id(&element.children, id) {
            return Some(found);
        }
    }
    None
}

/// Depth-first search for `id`, also reporting its parent and index
pub fn find_with_parent<'a>(tree: &'a [Element], id: &str) -> Option<Located<'a>> {
    find_located(tree, None, id)
}

fn find_located<'a>(
    list: &'a [Element],
    parent_id: Option<&'a str>,
    id: &str,
) -> Option<Located<'a>> {
    if let Some(index) = list.iter().position(|e| e.id == id) {
        return Some(Located {
            element: &list[index],
            parent_id,
            index,
        });
    }
    for element in list {
        if let Some(found) = find_located(&element.children, Some(element.id.as_str()), id) {
            return Some(found);
        }
    }
    None
}

fn find_by_id_mut<'a>(tree: &'a mut [Element], id: &str) -> Option<&'a mut Element> {
    for element in tree.iter_mut() {
        if element.id == id {
            return Some(element);
        }
        if let Some(found) = find_by_id_mut(&mut element.children, id) {
            return Some(found);
        }
    }
    None
}

pub fn contains_id(tree: &[Element], id: &str) -> bool {
    find_by_id(tree, id).is_some()
}

/// All ids in depth-first order
pub fn collect_ids(tree: &[Element]) -> Vec<&str> {
    let mut ids = Vec::new();
    collect_into(tree, &mut ids);
    ids
}

fn collect_into<'a>(tree: &'a [Element], ids: &mut Vec<&'a str>) {
    for element in tree {
        ids.push(element.id.as_str());
        collect_into(&element.children, ids);
    }
}

/// True when `id` is `ancestor_id` or sits anywhere beneath it
pub fn is_descendant_of(tree: &[Element], ancestor_id: &str, id: &str) -> bool {
    find_by_id(tree, ancestor_id)
        .map(|ancestor| ancestor.id == id || contains_id(&ancestor.children, id))
        .unwrap_or(false)
}

/// Child list of `parent_id`, or the root sequence for `None`
pub fn children_of<'a>(tree: &'a [Element], parent_id: Option<&str>) -> Option<&'a [Element]> {
    match parent_id {
        None => Some(tree),
        Some(id) => find_by_id(tree, id).map(|e| e.children.as_slice()),
    }
}

fn children_of_mut<'a>(
    tree: &'a mut Vec<Element>,
    parent_id: Option<&str>,
) -> Option<&'a mut Vec<Element>> {
    match parent_id {
        None => Some(tree),
        Some(id) => find_by_id_mut(tree, id).map(|e| &mut e.children),
    }
}

/// Rewrite `position` of every entry to its index
fn reindex(list: &mut [Element]) {
    for (index, element) in list.iter_mut().enumerate() {
        element.position = index;
    }
}

/// Recompute `parent_id` and `position` for the whole tree
pub fn normalize(tree: &mut [Element]) {
    normalize_list(tree, None);
}

fn normalize_list(list: &mut [Element], parent_id: Option<&str>) {
    for (index, element) in list.iter_mut().enumerate() {
        element.position = index;
        element.parent_id = parent_id.map(str::to_string);
        let id = element.id.clone();
        normalize_list(&mut element.children, Some(&id));
    }
}

/// Merge `patch` into the node matching `id`
pub fn update_by_id(tree: &[Element], id: &str, patch: &ElementPatch) -> Vec<Element> {
    let mut next = tree.to_vec();
    match find_by_id_mut(&mut next, id) {
        Some(element) => patch.merge_into(element),
        None => debug!(node_id = %id, "Update target not found, tree unchanged"),
    }
    next
}

/// Remove the node matching `id` and its whole subtree
pub fn remove_by_id(tree: &[Element], id: &str) -> Vec<Element> {
    let mut next = tree.to_vec();
    if detach(&mut next, id).is_none() {
        debug!(node_id = %id, "Remove target not found, tree unchanged");
    }
    next
}

/// Take the node out of whichever list holds it
fn detach(list: &mut Vec<Element>, id: &str) -> Option<Element> {
    if let Some(pos) = list.iter().position(|e| e.id == id) {
        let removed = list.remove(pos);
        reindex(list);
        return Some(removed);
    }

    for element in list.iter_mut() {
        if let Some(removed) = detach(&mut element.children, id) {
            return Some(removed);
        }
    }

    None
}

/// Insert `node` under `container_id` (root when `None`)
///
/// Appends when `index` is `None`; indexes past the end append too. An
/// unknown container leaves the tree unchanged. Fails if any id in `node`'s
/// subtree is already present.
pub fn insert_into(
    tree: &[Element],
    container_id: Option<&str>,
    node: Element,
    index: Option<usize>,
) -> Result<Vec<Element>, TreeError> {
    check_fresh_ids(tree, &node)?;

    let mut next = tree.to_vec();
    if !place(&mut next, container_id, node, index) {
        debug!(container_id = ?container_id, "Insert container not found, tree unchanged");
    }
    Ok(next)
}

fn check_fresh_ids(tree: &[Element], node: &Element) -> Result<(), TreeError> {
    let mut seen: HashSet<&str> = collect_ids(tree).into_iter().collect();
    for id in collect_ids(std::slice::from_ref(node)) {
        if !seen.insert(id) {
            return Err(TreeError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

/// Put `node` into `container_id`'s list; false when the container is gone
fn place(
    tree: &mut Vec<Element>,
    container_id: Option<&str>,
    mut node: Element,
    index: Option<usize>,
) -> bool {
    let Some(list) = children_of_mut(tree, container_id) else {
        return false;
    };
    node.parent_id = container_id.map(str::to_string);
    let id = node.id.clone();
    normalize_list(&mut node.children, Some(&id));
    let at = index.unwrap_or(list.len()).min(list.len());
    list.insert(at, node);
    reindex(list);
    true
}

/// Work out what dropping `active_id` onto `over_id` should do
pub fn plan_move(tree: &[Element], active_id: &str, over_id: &str) -> MovePlan {
    if active_id == over_id {
        return MovePlan::Rejected(MoveRejection::DroppedOnSelf);
    }
    let Some(active) = find_with_parent(tree, active_id) else {
        return MovePlan::Rejected(MoveRejection::ActiveNotFound);
    };
    let Some(over) = find_with_parent(tree, over_id) else {
        return MovePlan::Rejected(MoveRejection::TargetNotFound);
    };

    if active.parent_id == over.parent_id {
        return MovePlan::Reorder {
            parent_id: active.parent_id.map(str::to_string),
            from: active.index,
            to: over.index,
        };
    }

    if contains_id(&active.element.children, over_id) {
        return MovePlan::Rejected(MoveRejection::WouldCreateCycle);
    }

    MovePlan::Reparent {
        new_parent_id: over.parent_id.map(str::to_string),
        index: over.index,
    }
}

/// Carry out a plan produced by [`plan_move`]
pub fn apply_move(tree: &[Element], active_id: &str, plan: &MovePlan) -> Vec<Element> {
    let mut next = tree.to_vec();
    match plan {
        MovePlan::Reorder { parent_id, from, to } => {
            if let Some(list) = children_of_mut(&mut next, parent_id.as_deref()) {
                if *from < list.len() && *to < list.len() {
                    let moved = list.remove(*from);
                    list.insert(*to, moved);
                    reindex(list);
                }
            }
        }
        MovePlan::Reparent {
            new_parent_id,
            index,
        } => {
            if let Some(parent) = new_parent_id.as_deref() {
                if is_descendant_of(tree, active_id, parent) {
                    debug!(node_id = %active_id, "Refusing to move node into its own subtree");
                    return next;
                }
            }
            let Some(moved) = detach(&mut next, active_id) else {
                return next;
            };
            if !place(&mut next, new_parent_id.as_deref(), moved, Some(*index)) {
                debug!(node_id = %active_id, "Move destination vanished, tree unchanged");
                return tree.to_vec();
            }
        }
        MovePlan::Rejected(reason) => {
            debug!(node_id = %active_id, ?reason, "Move rejected");
        }
    }
    next
}

/// Drop `active_id` onto `over_id`: reorder among siblings or reparent
pub fn reorder_or_reparent(tree: &[Element], active_id: &str, over_id: &str) -> Vec<Element> {
    let plan = plan_move(tree, active_id, over_id);
    apply_move(tree, active_id, &plan)
}
