//! Shared fixtures for unit tests.

use std::sync::Arc;

use crate::models::resume::{
    Bullet, ExperienceContent, ItemContent, ResumeDocument, ResumeMetadata, Section,
    SectionItem, SectionType, SkillCategory, SkillsContent, SummaryContent,
};
use crate::models::suggestion::{Suggestion, SuggestionAction, SuggestionType};

pub fn bullet(id: &str, text: &str, order: i32) -> Bullet {
    Bullet {
        id: id.to_string(),
        text: text.to_string(),
        order,
    }
}

pub fn section(id: &str, section_type: SectionType, order: i32, items: Vec<SectionItem>) -> Section {
    Section {
        id: id.to_string(),
        section_type,
        title: id.to_uppercase(),
        order,
        items: items.into_iter().map(Arc::new).collect(),
    }
}

pub fn experience_item(id: &str, bullets: Vec<Bullet>) -> SectionItem {
    SectionItem {
        id: id.to_string(),
        order: 0,
        content: ItemContent::Experience(ExperienceContent {
            company: "Acme Corp".to_string(),
            role: "Staff Engineer".to_string(),
            location: Some("Berlin".to_string()),
            start_date: "2019-03".to_string(),
            end_date: None,
            bullets,
        }),
    }
}

pub fn skills_item(id: &str, categories: Vec<SkillCategory>) -> SectionItem {
    SectionItem {
        id: id.to_string(),
        order: 0,
        content: ItemContent::Skills(SkillsContent { categories }),
    }
}

pub fn category(id: &str, name: &str, skills: &[&str]) -> SkillCategory {
    SkillCategory {
        id: id.to_string(),
        name: name.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

/// Three sections: `exp` (order 0), `skills` (order 1), `summary` (order 2).
///
/// `exp/job1` has bullets `b1` "Led team" and `b2`; `skills/sk1` has the
/// categories `langs` and `tools`.
pub fn sample_document() -> ResumeDocument {
    let mut doc = ResumeDocument::new(ResumeMetadata {
        name: "Ada Lovelace".to_string(),
        email: Some("ada@example.com".to_string()),
        ..Default::default()
    });
    doc.id = "doc-1".to_string();
    doc.sections = vec![
        Arc::new(section(
            "exp",
            SectionType::Experience,
            0,
            vec![experience_item(
                "job1",
                vec![
                    bullet("b1", "Led team", 0),
                    bullet("b2", "Built **Python** data pipelines", 1),
                ],
            )],
        )),
        Arc::new(section(
            "skills",
            SectionType::Skills,
            1,
            vec![skills_item(
                "sk1",
                vec![
                    category("langs", "Languages", &["Python", "SQL"]),
                    category("tools", "Tools", &["Git"]),
                ],
            )],
        )),
        Arc::new(section(
            "summary",
            SectionType::Summary,
            2,
            vec![SectionItem {
                id: "sum1".to_string(),
                order: 0,
                content: ItemContent::Summary(SummaryContent {
                    text: "Backend engineer focused on reliability.".to_string(),
                }),
            }],
        )),
    ];
    doc
}

/// A pending suggestion aimed at `exp/job1`, optionally at one of its bullets.
pub fn suggestion(
    id: &str,
    action: SuggestionAction,
    bullet_id: Option<&str>,
    suggested_text: Option<&str>,
) -> Suggestion {
    Suggestion {
        id: id.to_string(),
        action,
        suggestion_type: SuggestionType::Content,
        section_id: Some("exp".to_string()),
        item_id: Some("job1".to_string()),
        bullet_id: bullet_id.map(str::to_string),
        field: None,
        title: format!("Suggestion {id}"),
        description: String::new(),
        current_text: None,
        suggested_text: suggested_text.map(str::to_string),
        impact: "Medium".to_string(),
        score_impact: 0,
        is_accepted: false,
        is_dismissed: false,
    }
}
