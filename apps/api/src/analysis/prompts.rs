// Prompt constants for résumé analysis.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for analysis. JSON-only output is appended at call time.
pub const ANALYSIS_SYSTEM: &str = "You are an expert résumé coach and ATS specialist. \
    You review a structured résumé against a target job description and propose \
    concrete, directly applicable edits.";

/// Analysis prompt template. Replace `{resume_json}` and `{job_description}`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Review the résumé below against the target job description.

Return a JSON object with this EXACT schema:
{
  "score": 74,
  "summary": "Solid backend experience; little evidence of cloud-native tooling.",
  "keywords": [
    {"term": "Kubernetes", "frequency": 3, "category": "tool"}
  ],
  "suggestions": [
    {
      "type": "critical",
      "action": "rewrite",
      "title": "Quantify team leadership",
      "description": "State team size and outcome.",
      "section_id": "<section id from the résumé>",
      "item_id": "<item id from the résumé>",
      "bullet_id": "<bullet id from the résumé>",
      "current_text": "Led team",
      "suggested_text": "Led a team of 5 engineers shipping the billing platform",
      "impact": "High",
      "score_impact": 6
    }
  ]
}

Rules:
- Propose 3 to 5 high-impact suggestions.
- "type" is one of: critical, stylistic, formatting, content.
- "action" is one of: rewrite, add, delete.
  - rewrite: replace the text of one existing bullet (needs bullet_id and suggested_text).
  - add: append a new bullet to an item (needs item_id and suggested_text). In a
    skills section, suggested_text is a single skill name.
  - delete: remove a bullet (bullet_id) or a whole item (item_id only).
- "keywords": the most important terms of the job description, with how often each
  appears there and a category of skill, methodology, tool or soft_skill.
- "score" is a realistic 0-100 ATS quality score for the résumé as it stands.
- Use **double asterisks** around a phrase in suggested_text only to bold it.

RÉSUMÉ JSON:
{resume_json}

TARGET JOB DESCRIPTION:
{job_description}"#;
