//! Starting content and style for newly created elements
//!
//! Theme-derived values (text color, primary color, heading font) are not
//! baked in here. Style resolution fills them at render time so a theme
//! change reaches every element that never overrode them.

use crate::element::{StyleMap, Viewport};
use crate::kind::ElementKind;

pub fn default_content(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Heading1 => "Heading 1",
        ElementKind::Heading2 => "Heading 2",
        ElementKind::Heading3 => "Heading 3",
        ElementKind::Paragraph => "This is a paragraph of text. Click to edit this text.",
        ElementKind::Button => "Click Me",
        ElementKind::Image => "/placeholder.svg",
        ElementKind::Form => "Contact Form",
        ElementKind::Video => "https://www.youtube.com/embed/dQw4w9WgXcQ",
        ElementKind::Map => "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d387193.305935303!2d-74.25986548248684!3d40.69714941932609",
        ElementKind::Testimonial => {
            "This product has completely transformed our business operations. Highly recommended!"
        }
        ElementKind::Feature => {
            "This feature will help you accomplish amazing things with very little effort."
        }
        _ => "",
    }
}

const COLUMN_LAYOUT: &[(&str, &str)] = &[
    ("display", "grid"),
    ("gap", "20px"),
    ("width", "100%"),
    ("marginBottom", "20px"),
    ("justifyContent", "flex-start"),
    ("alignItems", "stretch"),
];

fn baseline(kind: ElementKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ElementKind::Heading1 => &[
            ("fontSize", "32px"),
            ("fontWeight", "bold"),
            ("textAlign", "left"),
            ("padding", "10px"),
            ("marginBottom", "20px"),
        ],
        ElementKind::Heading2 => &[
            ("fontSize", "24px"),
            ("fontWeight", "bold"),
            ("textAlign", "left"),
            ("padding", "10px"),
            ("marginBottom", "16px"),
        ],
        ElementKind::Heading3 => &[
            ("fontSize", "20px"),
            ("fontWeight", "bold"),
            ("textAlign", "left"),
            ("padding", "10px"),
            ("marginBottom", "12px"),
        ],
        ElementKind::Paragraph => &[
            ("fontSize", "16px"),
            ("textAlign", "left"),
            ("lineHeight", "1.5"),
            ("padding", "10px"),
            ("marginBottom", "16px"),
        ],
        ElementKind::Button => &[
            ("color", "#FFFFFF"),
            ("padding", "10px 20px"),
            ("borderRadius", "4px"),
            ("fontWeight", "medium"),
            ("textAlign", "center"),
            ("cursor", "pointer"),
            ("border", "none"),
            ("display", "inline-block"),
        ],
        ElementKind::Image => &[
            ("width", "100%"),
            ("maxWidth", "100%"),
            ("height", "auto"),
            ("objectFit", "cover"),
            ("display", "block"),
            ("marginBottom", "16px"),
        ],
        ElementKind::Separator => &[
            ("border", "none"),
            ("borderTop", "1px solid #E5E7EB"),
            ("margin", "20px 0"),
            ("width", "100%"),
        ],
        ElementKind::Container => &[
            ("width", "100%"),
            ("padding", "20px"),
            ("backgroundColor", "#FFFFFF"),
            ("borderRadius", "8px"),
            ("marginBottom", "20px"),
            ("display", "flex"),
            ("flexDirection", "column"),
            ("justifyContent", "flex-start"),
            ("alignItems", "stretch"),
        ],
        ElementKind::Columns2 | ElementKind::Columns3 | ElementKind::Columns4 => COLUMN_LAYOUT,
        ElementKind::Form => &[
            ("width", "100%"),
            ("padding", "20px"),
            ("backgroundColor", "#F9FAFB"),
            ("borderRadius", "8px"),
            ("marginBottom", "20px"),
        ],
        ElementKind::Video => &[("width", "100%"), ("marginBottom", "20px")],
        ElementKind::Map => &[
            ("width", "100%"),
            ("height", "300px"),
            ("border", "none"),
            ("marginBottom", "20px"),
        ],
        ElementKind::Testimonial => &[
            ("padding", "20px"),
            ("backgroundColor", "#F9FAFB"),
            ("borderRadius", "8px"),
            ("marginBottom", "20px"),
        ],
        ElementKind::Feature => &[
            ("padding", "20px"),
            ("backgroundColor", "#FFFFFF"),
            ("borderRadius", "8px"),
            ("marginBottom", "20px"),
            ("boxShadow", "0 1px 3px rgba(0,0,0,0.1)"),
            ("border", "1px solid #E5E7EB"),
        ],
        _ => &[],
    }
}

fn viewport_adjustment(kind: ElementKind, viewport: Viewport) -> &'static [(&'static str, &'static str)] {
    match (viewport, kind) {
        (Viewport::Narrow, ElementKind::Columns2 | ElementKind::Columns3 | ElementKind::Columns4) => {
            &[("gridTemplateColumns", "1fr")]
        }
        (Viewport::Narrow, ElementKind::Heading1) => &[("fontSize", "24px")],
        (Viewport::Narrow, ElementKind::Heading2) => &[("fontSize", "20px")],
        (Viewport::Narrow, ElementKind::Heading3) => &[("fontSize", "18px")],
        (Viewport::Medium, ElementKind::Columns3 | ElementKind::Columns4) => {
            &[("gridTemplateColumns", "1fr 1fr")]
        }
        _ => &[],
    }
}

/// Desktop baseline for `kind` with the adjustments for `viewport` applied
pub fn default_style(kind: ElementKind, viewport: Viewport) -> StyleMap {
    let mut style: StyleMap = baseline(kind)
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    if let Some(columns) = kind.column_count() {
        style.insert(
            "gridTemplateColumns".to_string(),
            vec!["1fr"; columns].join(" "),
        );
    }

    for (k, v) in viewport_adjustment(kind, viewport) {
        style.insert(k.to_string(), v.to_string());
    }

    style
}
