//! Axum route handler for the Article API.

use axum::{
    extract::{multipart::MultipartError, multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::article::prompt_builder::build_prompt;
use crate::article::style::StyleSelection;
use crate::article::upload::{UploadStore, UploadedDocument};
use crate::errors::AppError;
use crate::llm_client::ArticleGenerator;
use crate::state::AppState;

/// Multipart text field carrying the requested style.
pub const STYLE_FIELD: &str = "style";

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub article: String,
}

/// The parsed multipart form. Dropping it removes any staged document.
struct ArticleForm {
    document: Option<UploadedDocument>,
    style: StyleSelection,
}

/// POST /generate-article
///
/// Stages the uploaded document, asks the generator for an article in the
/// requested style and relays the text. The staged file is removed before the
/// response is returned, whatever the outcome.
pub async fn handle_generate_article(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ArticleResponse>, AppError> {
    let multipart = multipart.map_err(|e| {
        debug!("Rejected non-multipart request: {e}");
        AppError::BadRequest("Expected a multipart form upload")
    })?;

    let form = receive_form(&state.uploads, multipart).await?;
    let document = form
        .document
        .ok_or(AppError::BadRequest("No file uploaded"))?;

    let outcome = write_article(state.generator.as_ref(), &document, form.style).await;
    document.release();

    let article = outcome?;
    Ok(Json(ArticleResponse { article }))
}

/// Reads every multipart field, staging the single file field to disk.
async fn receive_form(
    uploads: &UploadStore,
    mut multipart: Multipart,
) -> Result<ArticleForm, AppError> {
    let mut document: Option<UploadedDocument> = None;
    let mut style_value: Option<String> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(malformed)? {
        // Browsers submit an empty file name when no file was chosen.
        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        if let Some(file_name) = file_name {
            if document.is_some() {
                return Err(AppError::BadRequest("Only one file may be uploaded"));
            }
            let mut pending = uploads.create(Some(file_name.as_str()))?;
            while let Some(chunk) = field.chunk().await.map_err(malformed)? {
                pending.write_chunk(&chunk).await?;
            }
            document = Some(pending.finish().await?);
        } else if field.name() == Some(STYLE_FIELD) {
            style_value = Some(field.text().await.map_err(malformed)?);
        }
    }

    Ok(ArticleForm {
        document,
        style: StyleSelection::from_form_value(style_value.as_deref()),
    })
}

async fn write_article(
    generator: &dyn ArticleGenerator,
    document: &UploadedDocument,
    style: StyleSelection,
) -> Result<String, AppError> {
    let source_text = document.read_text().await?;
    info!(
        "Generating {:?} article from upload '{}' ({} bytes)",
        style,
        document.original_name(),
        document.size_bytes()
    );

    let request = build_prompt(style, &source_text);
    let article = generator.generate(request).await?;

    info!("Article generated ({} chars)", article.chars().count());
    Ok(article)
}

fn malformed(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    debug!("Malformed multipart body: {e}");
    AppError::BadRequest("Malformed multipart form")
}
