//! # Style Resolution
//!
//! Computes the style a node is drawn with at a given viewport.
//!
//! Precedence, highest first:
//!
//! ```text
//! responsiveStyle[viewport]   explicit per-viewport override
//! style                       explicit base style
//! theme-derived defaults      only fill keys still missing
//! ```

use pagecraft_document::{Element, ElementKind, StyleMap, ThemeSettings, Viewport};
use tracing::{debug, instrument};

/// Resolves element styles against one viewport and theme
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    viewport: Viewport,
    theme: &'a ThemeSettings,
}

impl<'a> StyleResolver<'a> {
    pub fn new(viewport: Viewport, theme: &'a ThemeSettings) -> Self {
        Self { viewport, theme }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn theme(&self) -> &'a ThemeSettings {
        self.theme
    }

    /// Effective style for `node`
    pub fn resolve(&self, node: &Element) -> StyleMap {
        let mut style = node.style.clone();
        for (property, value) in node.responsive_style.get(self.viewport) {
            style.insert(property.clone(), value.clone());
        }
        self.fill_theme_defaults(node.kind, &mut style);
        style
    }

    fn fill_theme_defaults(&self, kind: ElementKind, style: &mut StyleMap) {
        let theme = self.theme;

        if kind.is_heading() {
            fill(style, "fontFamily", theme.heading_font());
            fill(style, "color", theme.text_color());
            return;
        }

        match kind {
            ElementKind::Paragraph | ElementKind::List | ElementKind::Feature => {
                fill(style, "color", theme.text_color());
            }
            ElementKind::Testimonial => {
                fill(style, "color", theme.text_color());
                if !style.contains_key("borderLeft") {
                    style.insert(
                        "borderLeft".to_string(),
                        format!("4px solid {}", theme.primary_color()),
                    );
                }
            }
            ElementKind::Button => {
                fill(style, "backgroundColor", theme.primary_color());
            }
            _ => {}
        }
    }
}

fn fill(style: &mut StyleMap, property: &str, value: &str) {
    if !style.contains_key(property) {
        style.insert(property.to_string(), value.to_string());
    }
}

/// Effective style of `node` at `viewport` under `theme`
#[instrument(skip(node, theme), fields(node_id = %node.id, kind = %node.kind))]
pub fn resolve(node: &Element, viewport: Viewport, theme: &ThemeSettings) -> StyleMap {
    let style = StyleResolver::new(viewport, theme).resolve(node);
    debug!(properties = style.len(), "Resolved style");
    style
}

/// Column count after the viewport clamp
///
/// Narrow always collapses to a single column and medium caps at two.
pub fn clamp_columns(configured: usize, viewport: Viewport) -> usize {
    match viewport {
        Viewport::Narrow => 1,
        Viewport::Medium => configured.min(2),
        Viewport::Wide => configured,
    }
}

/// Columns a column-layout kind shows at `viewport`; `None` for other kinds
pub fn effective_column_count(kind: ElementKind, viewport: Viewport) -> Option<usize> {
    kind.column_count()
        .map(|configured| clamp_columns(configured, viewport))
}
