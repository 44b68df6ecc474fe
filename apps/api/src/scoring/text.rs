//! Searchable text extraction.

use crate::models::resume::{ItemContent, ResumeDocument};

/// Removes `**` emphasis markers, keeping the emphasised words.
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}

/// Lowercases, strips emphasis and collapses whitespace runs to one space.
pub fn normalize(text: &str) -> String {
    strip_emphasis(text)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every user-visible string in the document, in display order, one per line.
pub fn document_text(doc: &ResumeDocument) -> String {
    let mut parts: Vec<&str> = vec![doc.metadata.name.as_str()];

    for section in doc.ordered_sections() {
        parts.push(&section.title);
        for item in section.ordered_items() {
            push_content(&mut parts, &item.content);
        }
    }

    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .map(strip_emphasis)
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_content<'a>(parts: &mut Vec<&'a str>, content: &'a ItemContent) {
    match content {
        ItemContent::Experience(c) => {
            parts.push(&c.company);
            parts.push(&c.role);
            parts.extend(c.location.as_deref());
            parts.push(&c.start_date);
            parts.extend(c.end_date.as_deref());
        }
        ItemContent::Education(c) => {
            parts.push(&c.institution);
            parts.push(&c.degree);
            parts.extend(c.field.as_deref());
            parts.extend(c.location.as_deref());
            parts.extend(c.start_date.as_deref());
            parts.push(&c.end_date);
            parts.extend(c.gpa.as_deref());
        }
        ItemContent::Skills(c) => {
            for category in &c.categories {
                parts.push(&category.name);
                parts.extend(category.skills.iter().map(String::as_str));
            }
        }
        ItemContent::Summary(c) => parts.push(&c.text),
        ItemContent::Project(c) => {
            parts.push(&c.name);
            parts.extend(c.description.as_deref());
            if let Some(technologies) = &c.technologies {
                parts.extend(technologies.iter().map(String::as_str));
            }
            parts.extend(c.url.as_deref());
        }
        ItemContent::Custom(c) => {
            parts.extend(c.title.as_deref());
            parts.extend(c.subtitle.as_deref());
            parts.extend(c.date_range.as_deref());
            parts.extend(c.location.as_deref());
        }
    }
    parts.extend(content.ordered_bullets().into_iter().map(|b| b.text.as_str()));
}
