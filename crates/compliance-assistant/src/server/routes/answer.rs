//! Local extractive QA endpoint

use axum::{extract::State, Json};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{AnswerRequest, AnswerResponse};

/// POST /answer - Extract an answer span from inline context
pub async fn answer_inline(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let pipeline = state.qa_pipeline()?;

    let answer = tokio::task::spawn_blocking(move || {
        pipeline.answer(&request.question, &request.context)
    })
    .await
    .map_err(|e| Error::inference(format!("QA task failed: {}", e)))??;

    Ok(Json(answer.into()))
}
