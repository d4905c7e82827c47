use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::kind::ElementKind;

/// Style property name → value (e.g. `fontSize` → `16px`)
pub type StyleMap = BTreeMap<String, String>;

/// Viewport class used to pick responsive overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    #[serde(alias = "mobile")]
    Narrow,
    #[serde(alias = "tablet")]
    Medium,
    #[default]
    #[serde(alias = "desktop")]
    Wide,
}

impl Viewport {
    pub const ALL: [Viewport; 3] = [Viewport::Narrow, Viewport::Medium, Viewport::Wide];

    pub fn as_str(&self) -> &'static str {
        match self {
            Viewport::Narrow => "narrow",
            Viewport::Medium => "medium",
            Viewport::Wide => "wide",
        }
    }
}

/// Per-viewport overrides layered on top of the base style
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveStyles {
    #[serde(alias = "mobile")]
    pub narrow: StyleMap,
    #[serde(alias = "tablet")]
    pub medium: StyleMap,
    #[serde(alias = "desktop")]
    pub wide: StyleMap,
}

impl ResponsiveStyles {
    pub fn get(&self, viewport: Viewport) -> &StyleMap {
        match viewport {
            Viewport::Narrow => &self.narrow,
            Viewport::Medium => &self.medium,
            Viewport::Wide => &self.wide,
        }
    }

    pub fn get_mut(&mut self, viewport: Viewport) -> &mut StyleMap {
        match viewport {
            Viewport::Narrow => &mut self.narrow,
            Viewport::Medium => &mut self.medium,
            Viewport::Wide => &mut self.wide,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.narrow.is_empty() && self.medium.is_empty() && self.wide.is_empty()
    }
}

/// Animation metadata. Carried through untouched for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(alias = "duration")]
    pub duration_seconds: f64,
    #[serde(alias = "delay")]
    pub delay_seconds: f64,
    pub easing: String,
    pub trigger: String,
}

/// One node of the page tree
///
/// `children` is the only ownership path. `parent_id` and `position` are
/// derived and rewritten by every structural operation in [`crate::tree`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: ElementKind,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "styles")]
    pub style: StyleMap,
    #[serde(
        default,
        alias = "responsiveStyles",
        skip_serializing_if = "ResponsiveStyles::is_empty"
    )]
    pub responsive_style: ResponsiveStyles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub children: Vec<Element>,
    #[serde(default)]
    pub position: usize,
}

impl Element {
    /// Bare element with no content, style or children
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            content: String::new(),
            style: StyleMap::new(),
            responsive_style: ResponsiveStyles::default(),
            animation: None,
            parent_id: None,
            children: Vec::new(),
            position: 0,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn with_responsive_style(
        mut self,
        viewport: Viewport,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.responsive_style
            .get_mut(viewport)
            .insert(property.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }
}

/// Partial update merged onto an element by [`crate::tree::update_by_id`]
///
/// Merging is shallow: a present field replaces the whole field. Callers
/// that want to change one responsive key merge the map themselves first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive_style: Option<ResponsiveStyles>,
    /// `Some(None)` clears the animation; JSON `null` means the same
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub animation: Option<Option<Animation>>,
}

/// A field that is present is `Some`, even when its value is `null`
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ElementPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn style(style: StyleMap) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.content.is_none()
            && self.style.is_none()
            && self.responsive_style.is_none()
            && self.animation.is_none()
    }

    /// Apply onto `element` in place
    pub fn merge_into(&self, element: &mut Element) {
        if let Some(kind) = self.kind {
            element.kind = kind;
        }
        if let Some(content) = &self.content {
            element.content = content.clone();
        }
        if let Some(style) = &self.style {
            element.style = style.clone();
        }
        if let Some(responsive) = &self.responsive_style {
            element.responsive_style = responsive.clone();
        }
        if let Some(animation) = &self.animation {
            element.animation = animation.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_json_shape() {
        let element = Element::new("el-1", ElementKind::Paragraph)
            .with_content("Hello")
            .with_style("color", "#111")
            .with_responsive_style(Viewport::Narrow, "color", "#222");

        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["kind"], "paragraph");
        assert_eq!(json["parentId"], serde_json::Value::Null);
        assert_eq!(json["responsiveStyle"]["narrow"]["color"], "#222");

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, element);
    }

    #[test]
    fn test_legacy_viewport_names_deserialize() {
        let json = r#"{ "mobile": { "fontSize": "24px" }, "tablet": {}, "desktop": {} }"#;
        let styles: ResponsiveStyles = serde_json::from_str(json).unwrap();
        assert_eq!(styles.narrow.get("fontSize").map(String::as_str), Some("24px"));

        let viewport: Viewport = serde_json::from_str("\"tablet\"").unwrap();
        assert_eq!(viewport, Viewport::Medium);
    }

    #[test]
    fn test_legacy_element_loads() {
        let json = r#"{
            "id": "element-1",
            "type": "sidebar-0",
            "position": 0,
            "content": "Welcome",
            "styles": { "fontSize": "32px" },
            "parentId": null,
            "children": [],
            "responsiveStyles": {
                "mobile": { "fontSize": "24px" },
                "tablet": {},
                "desktop": {}
            },
            "animation": { "type": "fade", "duration": 1, "delay": 0, "easing": "ease", "trigger": "load" }
        }"#;

        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.kind, ElementKind::Heading1);
        assert_eq!(element.style["fontSize"], "32px");
        assert_eq!(element.responsive_style.narrow["fontSize"], "24px");
        assert_eq!(element.animation.unwrap().duration_seconds, 1.0);
    }

    #[test]
    fn test_null_animation_in_patch_clears() {
        let patch: ElementPatch = serde_json::from_str(r#"{ "animation": null }"#).unwrap();
        assert_eq!(patch.animation, Some(None));
        assert!(!patch.is_empty());

        let absent: ElementPatch = serde_json::from_str(r#"{ "content": "x" }"#).unwrap();
        assert_eq!(absent.animation, None);

        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["animation"], serde_json::Value::Null);
        assert!(json.as_object().unwrap().contains_key("animation"));
        let back: ElementPatch = serde_json::from_value(json).unwrap();
        assert_eq!(back, patch);
    }

    #[test]
    fn test_patch_is_shallow() {
        let mut element = Element::new("el-1", ElementKind::Button)
            .with_style("color", "red")
            .with_style("padding", "4px");

        let mut style = StyleMap::new();
        style.insert("color".to_string(), "blue".to_string());
        ElementPatch::style(style).merge_into(&mut element);

        assert_eq!(element.style.len(), 1);
        assert_eq!(element.style["color"], "blue");
    }

    #[test]
    fn test_patch_clears_animation() {
        let mut element = Element::new("el-1", ElementKind::Image);
        element.animation = Some(Animation {
            kind: "fade".to_string(),
            duration_seconds: 0.5,
            delay_seconds: 0.0,
            easing: "ease-out".to_string(),
            trigger: "load".to_string(),
        });

        let patch = ElementPatch {
            animation: Some(None),
            ..ElementPatch::default()
        };
        patch.merge_into(&mut element);
        assert!(element.animation.is_none());
    }
}
