//! Theme tokens with built-in fallbacks

use serde::{Deserialize, Serialize};

/// Design tokens. Every field is optional; accessors fall back to
/// [`DEFAULT_THEME`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h1_font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h1_font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h2_font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h2_font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_line_height: Option<String>,
}

/// Fallback token values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeDefaults {
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub font_family: &'static str,
    pub heading_font: &'static str,
    pub base_font_size: &'static str,
    pub container_width: &'static str,
    pub spacing_unit: &'static str,
}

const SYSTEM_FONT_STACK: &str = "system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif";

pub const DEFAULT_THEME: ThemeDefaults = ThemeDefaults {
    primary_color: "#4F46E5",
    secondary_color: "#10B981",
    background_color: "#FFFFFF",
    text_color: "#111827",
    font_family: SYSTEM_FONT_STACK,
    heading_font: "",
    base_font_size: "16",
    container_width: "1200",
    spacing_unit: "4",
};

fn token<'a>(value: &'a Option<String>, fallback: &'static str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

impl ThemeSettings {
    pub fn primary_color(&self) -> &str {
        token(&self.primary_color, DEFAULT_THEME.primary_color)
    }

    pub fn secondary_color(&self) -> &str {
        token(&self.secondary_color, DEFAULT_THEME.secondary_color)
    }

    pub fn background_color(&self) -> &str {
        token(&self.background_color, DEFAULT_THEME.background_color)
    }

    pub fn text_color(&self) -> &str {
        token(&self.text_color, DEFAULT_THEME.text_color)
    }

    pub fn font_family(&self) -> &str {
        token(&self.font_family, DEFAULT_THEME.font_family)
    }

    /// Heading font, or the body font family when no heading font is set
    pub fn heading_font(&self) -> &str {
        let heading = token(&self.heading_font, DEFAULT_THEME.heading_font);
        if heading.is_empty() {
            self.font_family()
        } else {
            heading
        }
    }

    pub fn base_font_size(&self) -> &str {
        token(&self.base_font_size, DEFAULT_THEME.base_font_size)
    }

    pub fn container_width(&self) -> &str {
        token(&self.container_width, DEFAULT_THEME.container_width)
    }

    pub fn spacing_unit(&self) -> &str {
        token(&self.spacing_unit, DEFAULT_THEME.spacing_unit)
    }

    /// Theme with every fallback filled in explicitly
    pub fn defaults() -> Self {
        Self {
            primary_color: Some(DEFAULT_THEME.primary_color.to_string()),
            secondary_color: Some(DEFAULT_THEME.secondary_color.to_string()),
            background_color: Some(DEFAULT_THEME.background_color.to_string()),
            text_color: Some(DEFAULT_THEME.text_color.to_string()),
            font_family: Some(DEFAULT_THEME.font_family.to_string()),
            heading_font: Some(DEFAULT_THEME.heading_font.to_string()),
            base_font_size: Some(DEFAULT_THEME.base_font_size.to_string()),
            container_width: Some(DEFAULT_THEME.container_width.to_string()),
            spacing_unit: Some(DEFAULT_THEME.spacing_unit.to_string()),
            ..Self::default()
        }
    }

    /// Look up a built-in preset by id (`default`, `dark`, `minimal`, `colorful`)
    pub fn preset(id: &str) -> Option<Self> {
        let base = Self::defaults();
        let theme = match id {
            "default" => base,
            "dark" => Self {
                primary_color: Some("#6366F1".to_string()),
                background_color: Some("#1F2937".to_string()),
                text_color: Some("#F9FAFB".to_string()),
                ..base
            },
            "minimal" => Self {
                primary_color: Some("#000000".to_string()),
                secondary_color: Some("#6B7280".to_string()),
                font_family: Some("'Inter', sans-serif".to_string()),
                heading_font: Some("'Inter', sans-serif".to_string()),
                ..base
            },
            "colorful" => Self {
                primary_color: Some("#8B5CF6".to_string()),
                secondary_color: Some("#EC4899".to_string()),
                font_family: Some("'Poppins', sans-serif".to_string()),
                heading_font: Some("'Poppins', sans-serif".to_string()),
                ..base
            },
            _ => return None,
        };
        Some(theme)
    }

    pub const PRESETS: [&'static str; 4] = ["default", "dark", "minimal", "colorful"];
}
