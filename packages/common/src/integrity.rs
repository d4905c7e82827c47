//! Tree integrity checks
//!
//! Verifies the structural invariants every tree operation must keep:
//! unique ids, `parentId` matching the owning element, `position` matching
//! the sibling index, and no id reappearing beneath itself.

use std::collections::HashSet;
use std::fmt;

use pagecraft_document::{Element, ElementKind};
use tracing::debug;

use crate::visitor::{walk_element, VisitContext, Visitor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    EmptyId,
    DuplicateId(String),
    /// An id repeated inside its own subtree
    IdCycle(String),
    ParentMismatch {
        id: String,
        recorded: Option<String>,
        actual: Option<String>,
    },
    PositionMismatch {
        id: String,
        recorded: usize,
        actual: usize,
    },
    PlaceholderInTree(String),
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityViolation::EmptyId => write!(f, "element with empty id"),
            IntegrityViolation::DuplicateId(id) => write!(f, "duplicate id {id}"),
            IntegrityViolation::IdCycle(id) => write!(f, "id {id} appears inside its own subtree"),
            IntegrityViolation::ParentMismatch {
                id,
                recorded,
                actual,
            } => write!(
                f,
                "{id} records parent {recorded:?} but is owned by {actual:?}"
            ),
            IntegrityViolation::PositionMismatch {
                id,
                recorded,
                actual,
            } => write!(f, "{id} records position {recorded} but sits at {actual}"),
            IntegrityViolation::PlaceholderInTree(id) => {
                write!(f, "column placeholder {id} stored in the tree")
            }
        }
    }
}

#[derive(Default)]
struct IntegrityChecker {
    seen: HashSet<String>,
    ancestors: Vec<String>,
    violations: Vec<IntegrityViolation>,
}

impl Visitor for IntegrityChecker {
    fn visit_element(&mut self, element: &Element, context: VisitContext<'_>) {
        let id = element.id.as_str();

        if id.is_empty() {
            self.violations.push(IntegrityViolation::EmptyId);
        } else if self.ancestors.iter().any(|a| a == id) {
            self.violations.push(IntegrityViolation::IdCycle(id.to_string()));
        } else if !self.seen.insert(id.to_string()) {
            self.violations
                .push(IntegrityViolation::DuplicateId(id.to_string()));
        }

        let actual = context.parent.map(|p| p.id.clone());
        if element.parent_id != actual {
            self.violations.push(IntegrityViolation::ParentMismatch {
                id: id.to_string(),
                recorded: element.parent_id.clone(),
                actual,
            });
        }

        if element.position != context.index {
            self.violations.push(IntegrityViolation::PositionMismatch {
                id: id.to_string(),
                recorded: element.position,
                actual: context.index,
            });
        }

        if element.kind == ElementKind::ColumnPlaceholder {
            self.violations
                .push(IntegrityViolation::PlaceholderInTree(id.to_string()));
        }

        self.ancestors.push(id.to_string());
        walk_element(self, element, context);
        self.ancestors.pop();
    }
}

/// Every invariant violation found in `tree`, in depth-first order
pub fn check_integrity(tree: &[Element]) -> Vec<IntegrityViolation> {
    let mut checker = IntegrityChecker::default();
    checker.visit_tree(tree);
    if !checker.violations.is_empty() {
        debug!(count = checker.violations.len(), "Tree integrity violations found");
    }
    checker.violations
}

/// Only the violations that [`pagecraft_document::tree::normalize`] cannot repair
pub fn structural_violations(tree: &[Element]) -> Vec<IntegrityViolation> {
    check_integrity(tree)
        .into_iter()
        .filter(|v| {
            !matches!(
                v,
                IntegrityViolation::ParentMismatch { .. } | IntegrityViolation::PositionMismatch { .. }
            )
        })
        .collect()
}
