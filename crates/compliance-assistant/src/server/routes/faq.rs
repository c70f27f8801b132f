//! FAQ session endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::server::{form::FormFields, state::AppState};
use crate::types::{FaqAskResponse, FaqStartResponse, MessageResponse};

/// POST /faq/start - Start (or restart) a session with its FAQ context
pub async fn start_session(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<FaqStartResponse>> {
    let context = form.text("context")?;
    let session_id = form.text("session_id")?;

    state.faq().start(session_id, context);

    Ok(Json(FaqStartResponse {
        message: "FAQ session started".to_string(),
        session_id: session_id.to_string(),
    }))
}

/// POST /faq/ask - Ask within a live session
pub async fn ask_session(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<FaqAskResponse>> {
    let question = form.text("question")?;
    let session_id = form.text("session_id")?;

    let answer = state.faq().ask(session_id, question).await?;

    Ok(Json(FaqAskResponse {
        answer,
        session_id: session_id.to_string(),
    }))
}

/// DELETE /faq/end/:session_id - End a live session
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.faq().end(&session_id)?;
    Ok(Json(MessageResponse::new(format!(
        "FAQ session {} ended",
        session_id
    ))))
}
