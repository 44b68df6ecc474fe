//! Résumé document model.
//!
//! A `ResumeDocument` is an immutable snapshot. Sections and items sit behind
//! `Arc` so the editor can copy only the path it changes; every other section
//! and item is shared with the previous snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mints a fresh identifier. Identifiers are never reused after deletion.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn initial_version() -> u32 {
    1
}

// ────────────────────────────────────────────────────────────────────────────
// Root aggregate
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default = "new_id")]
    pub id: String,
    pub metadata: ResumeMetadata,
    #[serde(default)]
    pub sections: Vec<Arc<Section>>,
    /// Bumped on every committed edit. Advisory only.
    #[serde(default = "initial_version")]
    pub version: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ResumeDocument {
    #[cfg(test)]
    pub fn new(metadata: ResumeMetadata) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            metadata,
            sections: Vec::new(),
            version: initial_version(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections
            .iter()
            .map(Arc::as_ref)
            .find(|s| s.id == section_id)
    }

    /// Sections stable-sorted by `order`; ties keep insertion order.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().map(Arc::as_ref).collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    #[cfg(test)]
    pub fn item(&self, section_id: &str, item_id: &str) -> Option<&SectionItem> {
        self.section(section_id)?.item(item_id)
    }

    #[cfg(test)]
    pub fn bullet(&self, section_id: &str, item_id: &str, bullet_id: &str) -> Option<&Bullet> {
        self.item(section_id, item_id)?
            .content
            .bullets()?
            .iter()
            .find(|b| b.id == bullet_id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metadata
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeMetadata {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    Name,
    Location,
    Email,
    Phone,
    Linkedin,
    Website,
    Github,
}

impl ResumeMetadata {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Writes one field. Returns `false` when the write is not allowed
    /// (`name` is required and cannot be cleared or blanked).
    pub fn set(&mut self, field: MetadataField, value: Option<String>) -> bool {
        let slot = match field {
            MetadataField::Name => {
                return match value {
                    Some(name) if !name.trim().is_empty() => {
                        self.name = name;
                        true
                    }
                    _ => false,
                };
            }
            MetadataField::Location => &mut self.location,
            MetadataField::Email => &mut self.email,
            MetadataField::Phone => &mut self.phone,
            MetadataField::Linkedin => &mut self.linkedin,
            MetadataField::Website => &mut self.website,
            MetadataField::Github => &mut self.github,
        };
        *slot = value;
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections and items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub title: String,
    pub order: i32,
    #[serde(default)]
    pub items: Vec<Arc<SectionItem>>,
}

impl Section {
    #[cfg(test)]
    pub fn new(section_type: SectionType, title: impl Into<String>, order: i32) -> Self {
        Self {
            id: new_id(),
            section_type,
            title: title.into(),
            order,
            items: Vec::new(),
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&SectionItem> {
        self.items
            .iter()
            .map(Arc::as_ref)
            .find(|i| i.id == item_id)
    }

    pub fn ordered_items(&self) -> Vec<&SectionItem> {
        let mut items: Vec<&SectionItem> = self.items.iter().map(Arc::as_ref).collect();
        items.sort_by_key(|i| i.order);
        items
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionItem {
    #[serde(default = "new_id")]
    pub id: String,
    pub order: i32,
    pub content: ItemContent,
}

/// Typed item payload. The tag never changes after creation; edits replace
/// fields inside a variant, never the variant itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemContent {
    Experience(ExperienceContent),
    Education(EducationContent),
    Skills(SkillsContent),
    Summary(SummaryContent),
    Project(ProjectContent),
    Custom(CustomContent),
}

impl ItemContent {
    /// The bullet collection, for variants that carry one.
    pub fn bullets(&self) -> Option<&[Bullet]> {
        match self {
            ItemContent::Experience(c) => Some(&c.bullets),
            ItemContent::Education(c) => Some(&c.bullets),
            ItemContent::Project(c) => Some(&c.bullets),
            ItemContent::Custom(c) => Some(&c.bullets),
            ItemContent::Skills(_) | ItemContent::Summary(_) => None,
        }
    }

    pub fn bullets_mut(&mut self) -> Option<&mut Vec<Bullet>> {
        match self {
            ItemContent::Experience(c) => Some(&mut c.bullets),
            ItemContent::Education(c) => Some(&mut c.bullets),
            ItemContent::Project(c) => Some(&mut c.bullets),
            ItemContent::Custom(c) => Some(&mut c.bullets),
            ItemContent::Skills(_) | ItemContent::Summary(_) => None,
        }
    }

    /// Bullets stable-sorted by `order`. Empty for bullet-less variants.
    pub fn ordered_bullets(&self) -> Vec<&Bullet> {
        let mut bullets: Vec<&Bullet> = self.bullets().unwrap_or_default().iter().collect();
        bullets.sort_by_key(|b| b.order);
        bullets
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceContent {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: String,
    /// `None` means "Present".
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationContent {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    pub end_date: String,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsContent {
    #[serde(default)]
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContent {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub date_range: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
}

// ────────────────────────────────────────────────────────────────────────────
// Leaves
// ────────────────────────────────────────────────────────────────────────────

/// One line of free text. `**...**` spans render bold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    #[serde(default = "new_id")]
    pub id: String,
    pub text: String,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    /// Minted on input when absent so categories can be addressed by id.
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary shapes
// ────────────────────────────────────────────────────────────────────────────

/// Output of the document-parsing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub resume: ResumeDocument,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Body sent to the PDF-rendering collaborator.
#[derive(Debug, Serialize)]
pub struct ExportRequest<'a> {
    pub resume: &'a ResumeDocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_content_deserializes_by_type_tag() {
        let json = r#"{
            "id": "i1",
            "order": 0,
            "content": {
                "type": "experience",
                "company": "Acme",
                "role": "Engineer",
                "start_date": "2020-01",
                "bullets": [{"id": "b1", "text": "Led team", "order": 0}]
            }
        }"#;
        let item: SectionItem = serde_json::from_str(json).unwrap();
        assert!(matches!(item.content, ItemContent::Experience(_)));
        assert_eq!(item.content.bullets().unwrap()[0].text, "Led team");
    }

    #[test]
    fn test_missing_ids_are_minted() {
        let json = r#"{"type": "skills", "title": "Skills", "order": 3,
            "items": [{"order": 0, "content": {"type": "skills",
                "categories": [{"name": "Languages", "skills": ["Rust"]}]}}]}"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert!(!section.id.is_empty());
        let ItemContent::Skills(skills) = &section.items[0].content else {
            panic!("expected skills content");
        };
        assert!(!skills.categories[0].id.is_empty());
    }

    #[test]
    fn test_ordered_sections_is_stable_on_ties() {
        let mut doc = ResumeDocument::new(ResumeMetadata {
            name: "Ada".to_string(),
            ..Default::default()
        });
        let mut first = Section::new(SectionType::Summary, "First", 1);
        first.id = "first".to_string();
        let mut second = Section::new(SectionType::Skills, "Second", 1);
        second.id = "second".to_string();
        let mut zero = Section::new(SectionType::Experience, "Zero", 0);
        zero.id = "zero".to_string();
        doc.sections = vec![Arc::new(first), Arc::new(second), Arc::new(zero)];

        let ids: Vec<&str> = doc.ordered_sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["zero", "first", "second"]);
    }

    #[test]
    fn test_summary_has_no_bullets() {
        let content = ItemContent::Summary(SummaryContent {
            text: "Engineer".to_string(),
        });
        assert!(content.bullets().is_none());
        assert!(content.ordered_bullets().is_empty());
    }

    #[test]
    fn test_metadata_name_cannot_be_cleared() {
        let mut meta = ResumeMetadata {
            name: "Ada".to_string(),
            ..Default::default()
        };
        assert!(!meta.set(MetadataField::Name, None));
        assert!(!meta.set(MetadataField::Name, Some("   ".to_string())));
        assert_eq!(meta.name, "Ada");
        assert!(meta.has_name());
        assert!(meta.set(MetadataField::Email, Some("ada@example.com".to_string())));
        assert_eq!(meta.email.as_deref(), Some("ada@example.com"));
    }
}
