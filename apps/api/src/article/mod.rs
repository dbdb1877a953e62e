// Article pipeline: upload staging, prompt construction, relay endpoint and
// display formatting. All generation calls go through llm_client.

pub mod formatter;
pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
pub mod style;
pub mod upload;
