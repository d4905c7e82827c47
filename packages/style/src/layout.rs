//! # Render Tree
//!
//! Turns the page tree into the fully resolved structure the renderer
//! draws: every node carries its effective style, and column layouts carry
//! their clamped column count and placeholder slots.

use pagecraft_document::{Element, ElementKind, StyleMap, ThemeSettings, Viewport};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::resolve::{effective_column_count, StyleResolver};

/// One resolved node handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: String,
    pub kind: ElementKind,
    pub content: String,
    pub style: StyleMap,
    /// Effective column count for column layouts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    pub fn is_placeholder(&self) -> bool {
        self.kind == ElementKind::ColumnPlaceholder
    }

    /// Number of nodes in this subtree, placeholders included
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RenderNode::count).sum::<usize>()
    }
}

/// Empty slot filling a column that has no element yet
fn placeholder(parent_id: &str, index: usize) -> RenderNode {
    RenderNode {
        id: format!("{parent_id}-col-{index}"),
        kind: ElementKind::ColumnPlaceholder,
        content: format!("Column {}", index + 1),
        style: StyleMap::new(),
        columns: None,
        children: Vec::new(),
    }
}

fn render_node(resolver: &StyleResolver<'_>, element: &Element) -> RenderNode {
    let mut style = resolver.resolve(element);
    let mut children: Vec<RenderNode> = element
        .children
        .iter()
        .map(|child| render_node(resolver, child))
        .collect();

    let columns = effective_column_count(element.kind, resolver.viewport());
    if let Some(count) = columns {
        style.insert("display".to_string(), "grid".to_string());
        style.insert(
            "gridTemplateColumns".to_string(),
            format!("repeat({count}, 1fr)"),
        );
        style
            .entry("gap".to_string())
            .or_insert_with(|| "1rem".to_string());

        // Extra children wrap onto further grid rows
        for index in children.len()..count {
            children.push(placeholder(&element.id, index));
        }
    }

    RenderNode {
        id: element.id.clone(),
        kind: element.kind,
        content: element.content.clone(),
        style,
        columns,
        children,
    }
}

/// Resolve the whole page for `viewport`
#[instrument(skip(elements, theme), fields(roots = elements.len(), viewport = viewport.as_str()))]
pub fn render_tree(elements: &[Element], viewport: Viewport, theme: &ThemeSettings) -> Vec<RenderNode> {
    let resolver = StyleResolver::new(viewport, theme);
    let nodes: Vec<RenderNode> = elements
        .iter()
        .map(|element| render_node(&resolver, element))
        .collect();
    debug!(
        nodes = nodes.iter().map(RenderNode::count).sum::<usize>(),
        "Render tree built"
    );
    nodes
}
