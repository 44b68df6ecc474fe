// Cross-cutting prompt fragments. Each caller defines its own prompts.rs
// alongside it and composes these in.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps suggestion coordinates pointing at real nodes of the submitted résumé.
pub const ID_FIDELITY_INSTRUCTION: &str = "\
    CRITICAL: section_id, item_id and bullet_id must be copied EXACTLY from the \
    résumé JSON you were given. Never invent ids. If a suggestion does not target \
    an existing bullet, omit bullet_id rather than guessing.";
