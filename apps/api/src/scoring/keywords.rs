//! Keyword inventory for a job description.

use std::collections::HashSet;

use crate::models::analysis::{JobDescription, Keyword, KeywordCategory};
use crate::scoring::text::normalize;

impl JobDescription {
    /// The keywords to match against a résumé.
    ///
    /// Extracted keywords come first, then required and preferred skills as
    /// `skill` keywords. Terms are de-duplicated case-insensitively, keeping
    /// the first occurrence. A zero frequency is filled in by counting the term
    /// in `raw_text`.
    pub fn keyword_inventory(&self) -> Vec<Keyword> {
        let skills = self
            .required_skills
            .iter()
            .chain(&self.preferred_skills)
            .map(|skill| Keyword::new(skill.clone(), KeywordCategory::Skill));

        let mut seen = HashSet::new();
        self.extracted_keywords
            .iter()
            .cloned()
            .chain(skills)
            .filter(|kw| {
                let key = normalize(&kw.term);
                !key.is_empty() && seen.insert(key)
            })
            .map(|mut kw| {
                if kw.frequency == 0 {
                    kw.frequency = count_occurrences(&self.raw_text, &kw.term);
                }
                kw
            })
            .collect()
    }
}

/// Non-overlapping, case-insensitive occurrences of `term` in `haystack`.
pub fn count_occurrences(haystack: &str, term: &str) -> u32 {
    let needle = normalize(term);
    if needle.is_empty() {
        return 0;
    }
    normalize(haystack).matches(needle.as_str()).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jd() -> JobDescription {
        JobDescription {
            id: "jd-1".to_string(),
            raw_text: "Senior Data Engineer. Required: Python, SQL. We love python. \
                       Nice to have: Docker."
                .to_string(),
            title: Some("Senior Data Engineer".to_string()),
            company: None,
            extracted_keywords: vec![Keyword {
                term: "Python".to_string(),
                frequency: 0,
                category: KeywordCategory::Skill,
                found_in_resume: false,
            }],
            required_skills: vec!["python".to_string(), "SQL".to_string()],
            preferred_skills: vec!["Docker".to_string(), "  ".to_string()],
            responsibilities: vec![],
        }
    }

    #[test]
    fn test_inventory_dedups_case_insensitively() {
        let terms: Vec<String> = jd().keyword_inventory().into_iter().map(|k| k.term).collect();
        assert_eq!(terms, vec!["Python", "SQL", "Docker"]);
    }

    #[test]
    fn test_inventory_fills_missing_frequency() {
        let inventory = jd().keyword_inventory();
        assert_eq!(inventory[0].frequency, 2);
        assert_eq!(inventory[1].frequency, 1);
    }

    #[test]
    fn test_supplied_frequency_is_kept() {
        let mut jd = jd();
        jd.extracted_keywords[0].frequency = 9;
        assert_eq!(jd.keyword_inventory()[0].frequency, 9);
    }

    #[test]
    fn test_count_occurrences_empty_term() {
        assert_eq!(count_occurrences("anything", "   "), 0);
    }
}
