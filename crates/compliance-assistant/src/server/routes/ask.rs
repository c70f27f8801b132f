//! Document question endpoint

use axum::{extract::State, Json};

use crate::error::{Error, Result};
use crate::ingestion::PdfExtractor;
use crate::server::{form::FormFields, state::AppState};
use crate::types::AnswerResponse;

/// POST /ask - Answer a question about an uploaded PDF
pub async fn ask_document(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<AnswerResponse>> {
    let question = form.text("question")?;
    let file = form.file("file")?;

    PdfExtractor::check_content_type(file.content_type.as_deref())?;

    let filename = file
        .filename
        .clone()
        .unwrap_or_else(|| "upload.pdf".to_string());
    let data = file.data.clone();

    tracing::info!("Extracting '{}' ({} bytes) for a question", filename, data.len());

    let task_filename = filename.clone();
    let extracted =
        tokio::task::spawn_blocking(move || PdfExtractor::extract(&task_filename, &data))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    Error::file_parse(&filename, "PDF extraction crashed")
                } else {
                    Error::internal(format!("PDF extraction task failed: {}", e))
                }
            })??;

    tracing::debug!(
        "Extracted {} chars from {} pages",
        extracted.text.len(),
        extracted.page_count
    );

    let answer = state.document_qa().answer(question, &extracted.text).await?;
    Ok(Json(answer.into()))
}
