//! Content generator seam
//!
//! Generated text always lands as a new paragraph at the end of the page.
//! A generator that fails produces no node at all.

use pagecraft_document::{Element, ElementKind, StyleMap};

use crate::errors::EditorError;

pub trait ContentGenerator {
    /// Produce text for `prompt`
    fn generate(&mut self, prompt: &str) -> Result<String, EditorError>;
}

/// Paragraph node wrapping generated `content`
pub fn generated_paragraph(id: String, content: &str) -> Element {
    let style: StyleMap = [
        ("fontSize", "16px"),
        ("color", "#333333"),
        ("lineHeight", "1.5"),
        ("padding", "10px"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let mut element = Element::new(id, ElementKind::Paragraph).with_content(content);
    element.style = style;
    element
}

/// Offline generator answering from a fixed table of topics
#[derive(Debug, Clone)]
pub struct CannedGenerator {
    responses: Vec<(String, String)>,
    fallback: String,
}

impl Default for CannedGenerator {
    fn default() -> Self {
        let responses = [
            (
                "hero section",
                "# Welcome to Our Platform\n\nThe most powerful solution for your business needs. Get started today and see the difference.",
            ),
            (
                "about us",
                "# About Our Company\n\nFounded in 2020, we've been on a mission to transform how businesses operate. Our team of experts brings decades of experience to solve your most challenging problems.",
            ),
            (
                "contact",
                "# Get in Touch\n\nWe'd love to hear from you! Reach out to our team for any questions or inquiries.\n\nEmail: contact@example.com\nPhone: (123) 456-7890",
            ),
        ]
        .iter()
        .map(|(topic, text)| (topic.to_string(), text.to_string()))
        .collect();

        Self {
            responses,
            fallback: "# Generated Content\n\nThis is generated content based on your prompt. You can edit this text or use it as a starting point for your website.".to_string(),
        }
    }
}

impl ContentGenerator for CannedGenerator {
    fn generate(&mut self, prompt: &str) -> Result<String, EditorError> {
        let prompt = prompt.trim().to_lowercase();
        if prompt.is_empty() {
            return Err(EditorError::Generator("empty prompt".to_string()));
        }
        let text = self
            .responses
            .iter()
            .find(|(topic, _)| prompt.contains(topic.as_str()))
            .map(|(_, text)| text.clone())
            .unwrap_or_else(|| self.fallback.clone());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_wrapping() {
        let p = generated_paragraph("el-x-1".to_string(), "Hello");
        assert_eq!(p.kind, ElementKind::Paragraph);
        assert_eq!(p.content, "Hello");
        assert_eq!(p.style["color"], "#333333");
        assert_eq!(p.style["lineHeight"], "1.5");
        assert!(p.children.is_empty());
    }

    #[test]
    fn test_canned_generator() {
        let mut generator = CannedGenerator::default();
        assert!(generator
            .generate("Write an About Us blurb")
            .unwrap()
            .starts_with("# About Our Company"));
        assert!(generator
            .generate("pricing")
            .unwrap()
            .starts_with("# Generated Content"));
        assert!(matches!(
            generator.generate("   "),
            Err(EditorError::Generator(_))
        ));
    }
}
