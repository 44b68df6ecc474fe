//! Suggestion applier. Turns one suggestion into at most one editor call.
//!
//! Dispatch is planned as a plain `Dispatch` value first, then executed, so
//! callers can see what an approval will do before it touches the document.
//!
//! Priority (first match wins):
//! 1. skills section + add + suggested_text → append skill
//! 2. add + section + item + suggested_text → add bullet
//! 3. delete → remove bullet if `bullet_id`, else remove item if `item_id`
//! 4. bullet_id + suggested_text → rewrite bullet
//! 5. anything else → no mutation

use serde::Serialize;

use crate::editor::DocumentEditor;
use crate::models::resume::{ItemContent, ResumeDocument, SectionType};
use crate::models::suggestion::{Suggestion, SuggestionAction};

/// The single editor call an approved suggestion maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dispatch {
    AddSkill {
        section_id: String,
        item_id: Option<String>,
        category_id: Option<String>,
        skill: String,
    },
    AddBullet {
        section_id: String,
        item_id: String,
        text: String,
    },
    RemoveBullet {
        section_id: String,
        item_id: String,
        bullet_id: String,
    },
    RemoveItem {
        section_id: String,
        item_id: String,
    },
    RewriteBullet {
        section_id: String,
        item_id: String,
        bullet_id: String,
        text: String,
    },
    NoOp,
}

/// Chooses the editor call for `suggestion` against the current snapshot.
pub fn plan(document: &ResumeDocument, suggestion: &Suggestion) -> Dispatch {
    let section_id = suggestion.section_id.as_deref();
    let item_id = suggestion.item_id.as_deref();
    let bullet_id = suggestion.bullet_id.as_deref();
    let text = suggestion.suggested_text.as_deref();

    let section = section_id.and_then(|id| document.section(id));

    // 1. Skills additions
    if let (Some(section), SuggestionAction::Add, Some(skill)) =
        (section, suggestion.action, text)
    {
        if section.section_type == SectionType::Skills {
            let item = item_id
                .and_then(|id| section.item(id))
                .or_else(|| section.items.first().map(|i| i.as_ref()));
            let category_id = match (item.map(|i| &i.content), suggestion.field.as_deref()) {
                (Some(ItemContent::Skills(skills)), Some(field)) => skills
                    .categories
                    .iter()
                    .find(|c| c.id == field || c.name.eq_ignore_ascii_case(field))
                    .map(|c| c.id.clone()),
                _ => None,
            };
            return Dispatch::AddSkill {
                section_id: section.id.clone(),
                item_id: item_id
                    .filter(|id| section.item(id).is_some())
                    .map(str::to_string),
                category_id,
                skill: skill.to_string(),
            };
        }
    }

    match (suggestion.action, section_id, item_id, bullet_id, text) {
        // 2. Bullet additions
        (SuggestionAction::Add, Some(section_id), Some(item_id), _, Some(text)) => {
            Dispatch::AddBullet {
                section_id: section_id.to_string(),
                item_id: item_id.to_string(),
                text: text.to_string(),
            }
        }
        // 3. Deletions
        (SuggestionAction::Delete, Some(section_id), Some(item_id), Some(bullet_id), _) => {
            Dispatch::RemoveBullet {
                section_id: section_id.to_string(),
                item_id: item_id.to_string(),
                bullet_id: bullet_id.to_string(),
            }
        }
        (SuggestionAction::Delete, Some(section_id), Some(item_id), None, _) => {
            Dispatch::RemoveItem {
                section_id: section_id.to_string(),
                item_id: item_id.to_string(),
            }
        }
        (SuggestionAction::Delete, ..) => Dispatch::NoOp,
        // 4. Implicit rewrite
        (_, Some(section_id), Some(item_id), Some(bullet_id), Some(text)) => {
            Dispatch::RewriteBullet {
                section_id: section_id.to_string(),
                item_id: item_id.to_string(),
                bullet_id: bullet_id.to_string(),
                text: text.to_string(),
            }
        }
        // 5. Nothing to do
        _ => Dispatch::NoOp,
    }
}

/// Runs a planned dispatch. Returns whether the document changed.
pub fn execute(editor: &mut DocumentEditor, dispatch: &Dispatch) -> bool {
    match dispatch {
        Dispatch::AddSkill {
            section_id,
            item_id,
            category_id,
            skill,
        } => editor.add_skill(
            section_id,
            item_id.as_deref(),
            category_id.as_deref(),
            skill,
        ),
        Dispatch::AddBullet {
            section_id,
            item_id,
            text,
        } => editor.add_bullet(section_id, item_id, text).is_some(),
        Dispatch::RemoveBullet {
            section_id,
            item_id,
            bullet_id,
        } => editor.remove_bullet(section_id, item_id, bullet_id),
        Dispatch::RemoveItem {
            section_id,
            item_id,
        } => editor.remove_section_item(section_id, item_id),
        Dispatch::RewriteBullet {
            section_id,
            item_id,
            bullet_id,
            text,
        } => editor.update_bullet_text(section_id, item_id, bullet_id, text),
        Dispatch::NoOp => false,
    }
}

/// Plans and executes `suggestion` against the editor's current document.
/// With no document loaded the plan is `NoOp`.
pub fn apply(editor: &mut DocumentEditor, suggestion: &Suggestion) -> (Dispatch, bool) {
    let dispatch = match editor.document() {
        Some(document) => plan(document, suggestion),
        None => Dispatch::NoOp,
    };
    let mutated = execute(editor, &dispatch);
    (dispatch, mutated)
}
