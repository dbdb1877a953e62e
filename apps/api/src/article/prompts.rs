// All LLM prompt constants for the Article module.

/// System prompt template. Replace `{persona}` before sending.
pub const ARTICLE_SYSTEM_TEMPLATE: &str = "You are a professional newspaper journalist \
    writing in {persona} style. \
    Create a compelling, well-structured newspaper article based on the information provided. \
    Include a catchy headline, subheading, and organized paragraphs. \
    Make it engaging and newsworthy.";

/// User prompt template. Replace `{source_text}` before sending.
pub const ARTICLE_USER_TEMPLATE: &str = "Write a newspaper article about this person \
    based on the following information:\n\n{source_text}";

pub const ARTICLE_TEMPERATURE: f32 = 0.8;
pub const ARTICLE_MAX_OUTPUT_TOKENS: u32 = 1000;
