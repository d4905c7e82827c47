use pagecraft_document::{Animation, Element, StyleMap, Viewport};

/// Where an element sits while it is being visited
#[derive(Debug, Clone, Copy)]
pub struct VisitContext<'a> {
    /// Owning element, `None` for the root sequence
    pub parent: Option<&'a Element>,
    /// Index within the owning list
    pub index: usize,
    pub depth: usize,
}

/// Visitor pattern for traversing the page tree immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, tree: &[Element]) {
        walk_tree(self, tree);
    }

    fn visit_element(&mut self, element: &Element, context: VisitContext<'_>) {
        walk_element(self, element, context);
    }

    /// Base style when `viewport` is `None`, an override map otherwise
    fn visit_style(&mut self, _style: &StyleMap, _viewport: Option<Viewport>) {
        // Leaf, no children to walk
    }

    fn visit_animation(&mut self, _animation: &Animation) {
        // Leaf, no children to walk
    }
}

// Default walk implementations

pub fn walk_tree<V: Visitor>(visitor: &mut V, tree: &[Element]) {
    for (index, element) in tree.iter().enumerate() {
        visitor.visit_element(
            element,
            VisitContext {
                parent: None,
                index,
                depth: 0,
            },
        );
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element, context: VisitContext<'_>) {
    visitor.visit_style(&element.style, None);
    for viewport in Viewport::ALL {
        let overrides = element.responsive_style.get(viewport);
        if !overrides.is_empty() {
            visitor.visit_style(overrides, Some(viewport));
        }
    }
    if let Some(animation) = &element.animation {
        visitor.visit_animation(animation);
    }
    for (index, child) in element.children.iter().enumerate() {
        visitor.visit_element(
            child,
            VisitContext {
                parent: Some(element),
                index,
                depth: context.depth + 1,
            },
        );
    }
}
