//! # Template Library
//!
//! Built-in page templates and section templates.
//!
//! Template trees carry placeholder ids. [`Template::instantiate`] re-mints
//! every id in the copy, so the same template can be applied any number of
//! times without two nodes sharing an id.

use pagecraft_document::{tree, Element, ElementKind, IdGenerator, Viewport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: String,
    pub thumbnail: String,
    pub elements: Vec<Element>,
}

impl Template {
    /// Copy of the elements with fresh ids and derived fields recomputed
    pub fn instantiate(&self, ids: &mut IdGenerator) -> Vec<Element> {
        let mut elements = self.elements.clone();
        for element in &mut elements {
            ids.remint(element);
        }
        tree::normalize(&mut elements);
        elements
    }
}

/// Section categories as `(id, label)`; `all` matches every section
pub const SECTION_CATEGORIES: &[(&str, &str)] = &[
    ("all", "All Sections"),
    ("hero", "Hero Sections"),
    ("features", "Features"),
    ("testimonials", "Testimonials"),
    ("contact", "Contact"),
];

/// Sections whose name contains `term` (case-insensitive) in `category`
pub fn search_sections<'a>(sections: &'a [Template], term: &str, category: &str) -> Vec<&'a Template> {
    let term = term.to_lowercase();
    sections
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&term))
        .filter(|t| category == "all" || t.category == category)
        .collect()
}

fn node(id: &str, kind: ElementKind, content: &str, style: &[(&str, &str)]) -> Element {
    let mut element = Element::new(id, kind).with_content(content);
    for (property, value) in style {
        element.style.insert(property.to_string(), value.to_string());
    }
    element
}

fn responsive(mut element: Element, viewport: Viewport, style: &[(&str, &str)]) -> Element {
    let overrides = element.responsive_style.get_mut(viewport);
    for (property, value) in style {
        overrides.insert(property.to_string(), value.to_string());
    }
    element
}

fn section_heading(id: &str, content: &str, margin_bottom: &str) -> Element {
    let heading = node(
        id,
        ElementKind::Heading2,
        content,
        &[
            ("fontSize", "36px"),
            ("fontWeight", "bold"),
            ("textAlign", "center"),
            ("marginBottom", margin_bottom),
        ],
    );
    let heading = responsive(heading, Viewport::Narrow, &[("fontSize", "28px")]);
    responsive(heading, Viewport::Medium, &[("fontSize", "32px")])
}

fn hero_section() -> Vec<Element> {
    let heading = node(
        "hero-heading",
        ElementKind::Heading1,
        "Welcome to Our Platform",
        &[
            ("fontSize", "48px"),
            ("fontWeight", "bold"),
            ("textAlign", "center"),
            ("marginBottom", "16px"),
        ],
    );
    let heading = responsive(heading, Viewport::Narrow, &[("fontSize", "32px")]);
    let heading = responsive(heading, Viewport::Medium, &[("fontSize", "40px")]);

    let subheading = node(
        "hero-subheading",
        ElementKind::Paragraph,
        "The most powerful solution for your business needs. Get started today and see the difference.",
        &[
            ("fontSize", "20px"),
            ("textAlign", "center"),
            ("maxWidth", "800px"),
            ("margin", "0 auto 32px auto"),
            ("color", "#666666"),
        ],
    );
    let subheading = responsive(subheading, Viewport::Narrow, &[("fontSize", "16px")]);
    let subheading = responsive(subheading, Viewport::Medium, &[("fontSize", "18px")]);

    let button = node(
        "hero-button",
        ElementKind::Button,
        "Get Started",
        &[
            ("fontSize", "18px"),
            ("padding", "12px 24px"),
            ("borderRadius", "4px"),
            ("color", "#FFFFFF"),
            ("fontWeight", "medium"),
            ("margin", "0 auto"),
            ("display", "block"),
            ("width", "fit-content"),
        ],
    );

    vec![heading, subheading, button]
}

fn features_section() -> Vec<Element> {
    let card_style: &[(&str, &str)] = &[
        ("padding", "24px"),
        ("borderRadius", "8px"),
        ("boxShadow", "0 4px 6px rgba(0,0,0,0.1)"),
    ];
    let cards = [
        ("feature-1", "This feature will help you accomplish amazing things with very little effort."),
        ("feature-2", "Another great feature that will transform how you work and boost productivity."),
        ("feature-3", "The third amazing feature that will make your life easier and more efficient."),
    ]
    .iter()
    .map(|(id, content)| node(id, ElementKind::Feature, content, card_style))
    .collect();

    let columns = node(
        "features-container",
        ElementKind::Columns3,
        "",
        &[("display", "grid"), ("gap", "24px"), ("width", "100%")],
    )
    .with_children(cards);

    vec![section_heading("features-heading", "Our Features", "48px"), columns]
}

fn testimonial_section() -> Vec<Element> {
    let quote = node(
        "testimonial-container",
        ElementKind::Testimonial,
        "This product has completely transformed our business operations. The interface is intuitive, and the support team is always ready to help. Highly recommended for any business looking to streamline their processes!",
        &[
            ("padding", "32px"),
            ("backgroundColor", "#F9FAFB"),
            ("borderRadius", "8px"),
            ("maxWidth", "800px"),
            ("margin", "0 auto"),
        ],
    );
    let quote = responsive(quote, Viewport::Narrow, &[("padding", "24px")]);

    vec![
        section_heading("testimonial-heading", "What Our Customers Say", "32px"),
        quote,
    ]
}

fn contact_section() -> Vec<Element> {
    let form = node(
        "contact-form",
        ElementKind::Form,
        "",
        &[
            ("maxWidth", "600px"),
            ("margin", "0 auto"),
            ("padding", "32px"),
            ("backgroundColor", "#F9FAFB"),
            ("borderRadius", "8px"),
        ],
    );
    let form = responsive(form, Viewport::Narrow, &[("padding", "24px")]);

    vec![section_heading("contact-heading", "Get in Touch", "32px"), form]
}

fn template(id: &str, name: &str, category: &str, thumbnail: &str, elements: Vec<Element>) -> Template {
    let mut elements = elements;
    tree::normalize(&mut elements);
    Template {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        thumbnail: thumbnail.to_string(),
        elements,
    }
}

/// Sections appended to the current page
pub fn section_templates() -> Vec<Template> {
    vec![
        template("hero-1", "Hero Section with CTA", "hero", "/hero-call-to-action.png", hero_section()),
        template("features-1", "Three Column Features", "features", "/features.png", features_section()),
        template(
            "testimonial-1",
            "Customer Testimonial",
            "testimonials",
            "/testimonial.png",
            testimonial_section(),
        ),
        template("contact-1", "Contact Form", "contact", "/contact.png", contact_section()),
    ]
}

fn wrapped(id: &str, sections: Vec<Vec<Element>>) -> Vec<Element> {
    sections
        .into_iter()
        .enumerate()
        .map(|(i, children)| {
            node(&format!("{id}-section-{i}"), ElementKind::Container, "", &[("padding", "48px 20px")])
                .with_children(children)
        })
        .collect()
}

/// Whole-page starting points; applying one replaces the page
pub fn page_templates() -> Vec<Template> {
    vec![
        template(
            "landing-page",
            "Landing Page",
            "Marketing",
            "/placeholder.svg?key=landing",
            wrapped(
                "landing",
                vec![hero_section(), features_section(), testimonial_section(), contact_section()],
            ),
        ),
        template(
            "portfolio",
            "Portfolio",
            "Personal",
            "/placeholder.svg?key=portfolio",
            wrapped("portfolio", vec![hero_section(), features_section()]),
        ),
        template(
            "blog",
            "Blog",
            "Content",
            "/placeholder.svg?key=blog",
            vec![
                node("blog-title", ElementKind::Heading1, "Latest Posts", &[("textAlign", "center")]),
                node("blog-intro", ElementKind::Paragraph, "Thoughts, stories and ideas.", &[]),
                node("blog-separator", ElementKind::Separator, "", &[]),
            ],
        ),
        template(
            "ecommerce",
            "E-Commerce",
            "Business",
            "/placeholder.svg?key=ecommerce",
            wrapped("ecommerce", vec![hero_section(), features_section()]),
        ),
        template(
            "about-us",
            "About Us",
            "Business",
            "/placeholder.svg?key=about",
            wrapped("about", vec![testimonial_section()]),
        ),
        template(
            "contact",
            "Contact Page",
            "Business",
            "/placeholder.svg?key=contact",
            contact_section(),
        ),
    ]
}

pub fn find_template<'a>(templates: &'a [Template], id: &str) -> Option<&'a Template> {
    templates.iter().find(|t| t.id == id)
}
