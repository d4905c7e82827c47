//! Element kinds and the palette they are dragged from

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TreeError;

/// Closed set of element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    #[serde(rename = "heading-1", alias = "sidebar-0")]
    Heading1,
    #[serde(rename = "heading-2", alias = "sidebar-0-2")]
    Heading2,
    #[serde(rename = "heading-3", alias = "sidebar-0-3")]
    Heading3,
    #[serde(alias = "sidebar-1")]
    Paragraph,
    #[serde(alias = "sidebar-2")]
    Button,
    #[serde(alias = "sidebar-3")]
    Image,
    #[serde(alias = "sidebar-separator")]
    Separator,
    #[serde(alias = "sidebar-container")]
    Container,
    #[serde(rename = "columns-2", alias = "sidebar-columns-2")]
    Columns2,
    #[serde(rename = "columns-3", alias = "sidebar-columns-3")]
    Columns3,
    #[serde(rename = "columns-4", alias = "sidebar-columns-4")]
    Columns4,
    #[serde(alias = "sidebar-form")]
    Form,
    #[serde(alias = "sidebar-input")]
    Input,
    #[serde(alias = "sidebar-textarea")]
    Textarea,
    #[serde(alias = "sidebar-checkbox")]
    Checkbox,
    #[serde(alias = "sidebar-radio")]
    Radio,
    #[serde(alias = "sidebar-select")]
    Select,
    #[serde(alias = "sidebar-video")]
    Video,
    #[serde(alias = "sidebar-map")]
    Map,
    #[serde(alias = "sidebar-icon")]
    Icon,
    #[serde(alias = "sidebar-list")]
    List,
    #[serde(alias = "sidebar-table")]
    Table,
    #[serde(alias = "sidebar-testimonial")]
    Testimonial,
    #[serde(alias = "sidebar-pricing")]
    Pricing,
    #[serde(alias = "sidebar-social")]
    Social,
    #[serde(alias = "sidebar-feature")]
    Feature,
    ColumnPlaceholder,
}

impl ElementKind {
    pub const ALL: [ElementKind; 27] = [
        ElementKind::Heading1,
        ElementKind::Heading2,
        ElementKind::Heading3,
        ElementKind::Paragraph,
        ElementKind::Button,
        ElementKind::Image,
        ElementKind::Separator,
        ElementKind::Container,
        ElementKind::Columns2,
        ElementKind::Columns3,
        ElementKind::Columns4,
        ElementKind::Form,
        ElementKind::Input,
        ElementKind::Textarea,
        ElementKind::Checkbox,
        ElementKind::Radio,
        ElementKind::Select,
        ElementKind::Video,
        ElementKind::Map,
        ElementKind::Icon,
        ElementKind::List,
        ElementKind::Table,
        ElementKind::Testimonial,
        ElementKind::Pricing,
        ElementKind::Social,
        ElementKind::Feature,
        ElementKind::ColumnPlaceholder,
    ];

    /// Serialized tag, e.g. `heading-1`
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Heading1 => "heading-1",
            ElementKind::Heading2 => "heading-2",
            ElementKind::Heading3 => "heading-3",
            ElementKind::Paragraph => "paragraph",
            ElementKind::Button => "button",
            ElementKind::Image => "image",
            ElementKind::Separator => "separator",
            ElementKind::Container => "container",
            ElementKind::Columns2 => "columns-2",
            ElementKind::Columns3 => "columns-3",
            ElementKind::Columns4 => "columns-4",
            ElementKind::Form => "form",
            ElementKind::Input => "input",
            ElementKind::Textarea => "textarea",
            ElementKind::Checkbox => "checkbox",
            ElementKind::Radio => "radio",
            ElementKind::Select => "select",
            ElementKind::Video => "video",
            ElementKind::Map => "map",
            ElementKind::Icon => "icon",
            ElementKind::List => "list",
            ElementKind::Table => "table",
            ElementKind::Testimonial => "testimonial",
            ElementKind::Pricing => "pricing",
            ElementKind::Social => "social",
            ElementKind::Feature => "feature",
            ElementKind::ColumnPlaceholder => "column-placeholder",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Heading1 => "Heading 1",
            ElementKind::Heading2 => "Heading 2",
            ElementKind::Heading3 => "Heading 3",
            ElementKind::Paragraph => "Paragraph",
            ElementKind::Button => "Button",
            ElementKind::Image => "Image",
            ElementKind::Separator => "Separator",
            ElementKind::Container => "Container",
            ElementKind::Columns2 => "2 Columns",
            ElementKind::Columns3 => "3 Columns",
            ElementKind::Columns4 => "4 Columns",
            ElementKind::Form => "Form",
            ElementKind::Input => "Input",
            ElementKind::Textarea => "Textarea",
            ElementKind::Checkbox => "Checkbox",
            ElementKind::Radio => "Radio",
            ElementKind::Select => "Select",
            ElementKind::Video => "Video",
            ElementKind::Map => "Map",
            ElementKind::Icon => "Icon",
            ElementKind::List => "List",
            ElementKind::Table => "Table",
            ElementKind::Testimonial => "Testimonial",
            ElementKind::Pricing => "Pricing Table",
            ElementKind::Social => "Social Links",
            ElementKind::Feature => "Feature Card",
            ElementKind::ColumnPlaceholder => "Column Placeholder",
        }
    }

    /// Tag used by documents saved before the current schema
    pub fn legacy_tag(&self) -> Option<&'static str> {
        match self {
            ElementKind::Heading1 => Some("sidebar-0"),
            ElementKind::Heading2 => Some("sidebar-0-2"),
            ElementKind::Heading3 => Some("sidebar-0-3"),
            ElementKind::Paragraph => Some("sidebar-1"),
            ElementKind::Button => Some("sidebar-2"),
            ElementKind::Image => Some("sidebar-3"),
            ElementKind::Separator => Some("sidebar-separator"),
            ElementKind::Container => Some("sidebar-container"),
            ElementKind::Columns2 => Some("sidebar-columns-2"),
            ElementKind::Columns3 => Some("sidebar-columns-3"),
            ElementKind::Columns4 => Some("sidebar-columns-4"),
            ElementKind::Form => Some("sidebar-form"),
            ElementKind::Input => Some("sidebar-input"),
            ElementKind::Textarea => Some("sidebar-textarea"),
            ElementKind::Checkbox => Some("sidebar-checkbox"),
            ElementKind::Radio => Some("sidebar-radio"),
            ElementKind::Select => Some("sidebar-select"),
            ElementKind::Video => Some("sidebar-video"),
            ElementKind::Map => Some("sidebar-map"),
            ElementKind::Icon => Some("sidebar-icon"),
            ElementKind::List => Some("sidebar-list"),
            ElementKind::Table => Some("sidebar-table"),
            ElementKind::Testimonial => Some("sidebar-testimonial"),
            ElementKind::Pricing => Some("sidebar-pricing"),
            ElementKind::Social => Some("sidebar-social"),
            ElementKind::Feature => Some("sidebar-feature"),
            ElementKind::ColumnPlaceholder => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            ElementKind::Heading1 | ElementKind::Heading2 | ElementKind::Heading3
        )
    }

    /// Configured column count for column layouts
    pub fn column_count(&self) -> Option<usize> {
        match self {
            ElementKind::Columns2 => Some(2),
            ElementKind::Columns3 => Some(3),
            ElementKind::Columns4 => Some(4),
            _ => None,
        }
    }

    /// Whether a palette drop on this kind lands inside it
    pub fn accepts_children(&self) -> bool {
        matches!(self, ElementKind::Container) || self.column_count().is_some()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ElementKind {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == s || kind.legacy_tag() == Some(s))
            .ok_or_else(|| TreeError::UnknownKind(s.to_string()))
    }
}

/// A named group of palette entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub kinds: &'static [ElementKind],
}

const PALETTE: &[PaletteGroup] = &[
    PaletteGroup {
        id: "basic",
        label: "Basic",
        kinds: &[
            ElementKind::Heading1,
            ElementKind::Heading2,
            ElementKind::Heading3,
            ElementKind::Paragraph,
            ElementKind::Button,
            ElementKind::Image,
            ElementKind::Separator,
        ],
    },
    PaletteGroup {
        id: "layout",
        label: "Layout",
        kinds: &[
            ElementKind::Container,
            ElementKind::Columns2,
            ElementKind::Columns3,
            ElementKind::Columns4,
        ],
    },
    PaletteGroup {
        id: "forms",
        label: "Forms",
        kinds: &[
            ElementKind::Form,
            ElementKind::Input,
            ElementKind::Textarea,
            ElementKind::Checkbox,
            ElementKind::Radio,
            ElementKind::Select,
        ],
    },
    PaletteGroup {
        id: "media",
        label: "Media",
        kinds: &[ElementKind::Video, ElementKind::Map, ElementKind::Icon],
    },
    PaletteGroup {
        id: "advanced",
        label: "Advanced",
        kinds: &[
            ElementKind::List,
            ElementKind::Table,
            ElementKind::Testimonial,
            ElementKind::Pricing,
            ElementKind::Social,
            ElementKind::Feature,
        ],
    },
];

/// Palette groups in display order. Placeholders are never offered.
pub fn palette() -> &'static [PaletteGroup] {
    PALETTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trips_through_from_str() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.tag().parse::<ElementKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.tag()));
        }
    }

    #[test]
    fn test_legacy_tags_parse() {
        for kind in ElementKind::ALL {
            let Some(legacy) = kind.legacy_tag() else {
                continue;
            };
            assert_eq!(legacy.parse::<ElementKind>().unwrap(), kind);
            let parsed: ElementKind = serde_json::from_str(&format!("\"{legacy}\"")).unwrap();
            assert_eq!(parsed, kind);
        }
        assert_eq!(ElementKind::ColumnPlaceholder.legacy_tag(), None);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert!(matches!(
            "carousel".parse::<ElementKind>(),
            Err(TreeError::UnknownKind(tag)) if tag == "carousel"
        ));
    }

    #[test]
    fn test_containers() {
        assert!(ElementKind::Container.accepts_children());
        assert!(ElementKind::Columns3.accepts_children());
        assert!(!ElementKind::Paragraph.accepts_children());
        assert_eq!(ElementKind::Columns4.column_count(), Some(4));
        assert_eq!(ElementKind::Container.column_count(), None);
    }

    #[test]
    fn test_palette_excludes_placeholder() {
        let offered: Vec<ElementKind> = palette()
            .iter()
            .flat_map(|group| group.kinds.iter().copied())
            .collect();
        assert_eq!(offered.len(), ElementKind::ALL.len() - 1);
        assert!(!offered.contains(&ElementKind::ColumnPlaceholder));
    }
}
