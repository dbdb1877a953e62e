//! Prompt Builder — turns a style and the uploaded text into a `GenerationRequest`.

use crate::article::prompts::{
    ARTICLE_MAX_OUTPUT_TOKENS, ARTICLE_SYSTEM_TEMPLATE, ARTICLE_TEMPERATURE,
    ARTICLE_USER_TEMPLATE,
};
use crate::article::style::StyleSelection;
use crate::llm_client::GenerationRequest;

/// Builds the system/user instruction pair for one article.
///
/// The source text is embedded verbatim. Oversized input is not truncated;
/// the upstream API rejects it and the client reports a transport error.
pub fn build_prompt(style: StyleSelection, source_text: &str) -> GenerationRequest {
    let persona_label = style.persona_label();

    GenerationRequest {
        persona_label: persona_label.to_string(),
        source_text: source_text.to_string(),
        system_instruction: ARTICLE_SYSTEM_TEMPLATE.replace("{persona}", persona_label),
        // Single pass so braces inside the source text are never re-expanded.
        user_instruction: ARTICLE_USER_TEMPLATE.replacen("{source_text}", source_text, 1),
        temperature: ARTICLE_TEMPERATURE,
        max_output_tokens: ARTICLE_MAX_OUTPUT_TOKENS,
    }
}
