//! Pure document edits.
//!
//! Each function takes the current snapshot and returns the next one, or
//! `None` when a coordinate does not resolve. Only the path from the root to
//! the edited node is copied; sibling sections and items stay shared through
//! their `Arc`s.

use std::collections::HashSet;
use std::sync::Arc;

use crate::editor::EditError;
use crate::models::resume::{
    new_id, Bullet, ItemContent, MetadataField, ResumeDocument, Section, SectionItem,
};

// ────────────────────────────────────────────────────────────────────────────
// Path-copying helpers
// ────────────────────────────────────────────────────────────────────────────

fn with_section<F>(doc: &ResumeDocument, section_id: &str, edit: F) -> Option<ResumeDocument>
where
    F: FnOnce(&mut Section) -> Option<()>,
{
    let index = doc.sections.iter().position(|s| s.id == section_id)?;
    let mut next = doc.clone();
    edit(Arc::make_mut(&mut next.sections[index]))?;
    Some(next)
}

fn with_item<F>(
    doc: &ResumeDocument,
    section_id: &str,
    item_id: &str,
    edit: F,
) -> Option<ResumeDocument>
where
    F: FnOnce(&mut SectionItem) -> Option<()>,
{
    with_section(doc, section_id, |section| {
        let index = section.items.iter().position(|i| i.id == item_id)?;
        edit(Arc::make_mut(&mut section.items[index]))
    })
}

fn with_bullets<F>(
    doc: &ResumeDocument,
    section_id: &str,
    item_id: &str,
    edit: F,
) -> Option<ResumeDocument>
where
    F: FnOnce(&mut Vec<Bullet>) -> Option<()>,
{
    with_item(doc, section_id, item_id, |item| {
        edit(item.content.bullets_mut()?)
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Metadata
// ────────────────────────────────────────────────────────────────────────────

pub fn update_metadata_field(
    doc: &ResumeDocument,
    field: MetadataField,
    value: Option<String>,
) -> Option<ResumeDocument> {
    let mut next = doc.clone();
    next.metadata.set(field, value).then_some(next)
}

// ────────────────────────────────────────────────────────────────────────────
// Bullets
// ────────────────────────────────────────────────────────────────────────────

pub fn update_bullet_text(
    doc: &ResumeDocument,
    section_id: &str,
    item_id: &str,
    bullet_id: &str,
    text: &str,
) -> Option<ResumeDocument> {
    with_bullets(doc, section_id, item_id, |bullets| {
        let bullet = bullets.iter_mut().find(|b| b.id == bullet_id)?;
        bullet.text = text.to_string();
        Some(())
    })
}

/// Appends a bullet at `max(order) + 1` (0 when empty). Returns the next
/// snapshot and the new bullet's id.
pub fn add_bullet(
    doc: &ResumeDocument,
    section_id: &str,
    item_id: &str,
    text: &str,
) -> Option<(ResumeDocument, String)> {
    let bullet_id = new_id();
    let next = with_bullets(doc, section_id, item_id, |bullets| {
        let order = bullets.iter().map(|b| b.order).max().map_or(0, |max| max + 1);
        bullets.push(Bullet {
            id: bullet_id.clone(),
            text: text.to_string(),
            order,
        });
        Some(())
    })?;
    Some((next, bullet_id))
}

/// Removes a bullet. Remaining bullets keep their `order` values.
pub fn remove_bullet(
    doc: &ResumeDocument,
    section_id: &str,
    item_id: &str,
    bullet_id: &str,
) -> Option<ResumeDocument> {
    with_bullets(doc, section_id, item_id, |bullets| {
        let index = bullets.iter().position(|b| b.id == bullet_id)?;
        bullets.remove(index);
        Some(())
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Items
// ────────────────────────────────────────────────────────────────────────────

pub fn remove_section_item(
    doc: &ResumeDocument,
    section_id: &str,
    item_id: &str,
) -> Option<ResumeDocument> {
    with_section(doc, section_id, |section| {
        let index = section.items.iter().position(|i| i.id == item_id)?;
        section.items.remove(index);
        Some(())
    })
}

pub fn update_summary_text(
    doc: &ResumeDocument,
    section_id: &str,
    item_id: &str,
    text: &str,
) -> Option<ResumeDocument> {
    with_item(doc, section_id, item_id, |item| match &mut item.content {
        ItemContent::Summary(summary) => {
            summary.text = text.to_string();
            Some(())
        }
        _ => None,
    })
}

/// Appends a skill to a category of a skills item.
///
/// `item_id` / `category` of `None` fall back to the first stored item and
/// its first stored category. `category` matches a category id, or a
/// category name case-insensitively.
pub fn add_skill(
    doc: &ResumeDocument,
    section_id: &str,
    item_id: Option<&str>,
    category: Option<&str>,
    skill: &str,
) -> Option<ResumeDocument> {
    with_section(doc, section_id, |section| {
        let index = match item_id {
            Some(id) => section.items.iter().position(|i| i.id == id)?,
            None if section.items.is_empty() => return None,
            None => 0,
        };
        let item = Arc::make_mut(&mut section.items[index]);
        let ItemContent::Skills(skills) = &mut item.content else {
            return None;
        };
        let target = match category {
            Some(key) => skills
                .categories
                .iter_mut()
                .find(|c| c.id == key || c.name.eq_ignore_ascii_case(key))?,
            None => skills.categories.first_mut()?,
        };
        target.skills.push(skill.to_string());
        Some(())
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Inserts a section. A section whose id is already present does not resolve.
pub fn add_section(doc: &ResumeDocument, section: Section) -> Option<ResumeDocument> {
    if doc.section(&section.id).is_some() {
        return None;
    }
    let mut next = doc.clone();
    next.sections.push(Arc::new(section));
    Some(next)
}

pub fn remove_section(doc: &ResumeDocument, section_id: &str) -> Option<ResumeDocument> {
    let index = doc.sections.iter().position(|s| s.id == section_id)?;
    let mut next = doc.clone();
    next.sections.remove(index);
    Some(next)
}

pub fn update_section_title(
    doc: &ResumeDocument,
    section_id: &str,
    title: &str,
) -> Option<ResumeDocument> {
    with_section(doc, section_id, |section| {
        section.title = title.to_string();
        Some(())
    })
}

/// Sets each section's `order` to its index in `ordered_ids`.
///
/// `ordered_ids` must be a permutation of every section id in the document.
pub fn reorder_sections(
    doc: &ResumeDocument,
    ordered_ids: &[String],
) -> Result<ResumeDocument, EditError> {
    if ordered_ids.len() != doc.sections.len() {
        return Err(EditError::IncompleteOrdering {
            expected: doc.sections.len(),
            got: ordered_ids.len(),
        });
    }

    let mut seen = HashSet::new();
    for id in ordered_ids {
        if !seen.insert(id.as_str()) {
            return Err(EditError::DuplicateSection(id.clone()));
        }
        if doc.section(id).is_none() {
            return Err(EditError::UnknownSection(id.clone()));
        }
    }

    let mut next = doc.clone();
    for section in next.sections.iter_mut() {
        let position = ordered_ids
            .iter()
            .position(|id| *id == section.id)
            .ok_or_else(|| EditError::UnknownSection(section.id.clone()))?;
        let order = position as i32;
        if section.order != order {
            Arc::make_mut(section).order = order;
        }
    }
    Ok(next)
}
