//! Request handlers for the quiz API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sassmeter_core::{questions, AnswerChoice, SessionId};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::{QuestionView, SessionView, SharedState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub narrator: String,
    pub active_sessions: usize,
}

/// Answer submission; `option: null` means a custom answer
#[derive(Debug, Deserialize)]
pub struct AnswerBody {
    #[serde(default)]
    pub option: Option<usize>,
    #[serde(default)]
    pub text: String,
}

impl AnswerBody {
    pub fn choice(&self) -> AnswerChoice {
        self.option.map_or(AnswerChoice::Custom, AnswerChoice::Option)
    }
}

#[derive(Debug, Deserialize)]
pub struct RatingBody {
    pub value: u8,
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        narrator: state.narrator_name().to_string(),
        active_sessions: state.active_sessions().await,
    })
}

pub async fn list_questions() -> Json<Vec<QuestionView>> {
    Json(questions().iter().map(QuestionView::from).collect())
}

pub async fn create_session(State(state): State<SharedState>) -> (StatusCode, Json<SessionView>) {
    (StatusCode::CREATED, Json(state.create_session().await))
}

pub async fn get_session(
    State(state): State<SharedState>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<SessionView>> {
    Ok(Json(state.view(id).await?))
}

pub async fn delete_session(
    State(state): State<SharedState>,
    Path(id): Path<SessionId>,
) -> ApiResult<StatusCode> {
    state.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn start(
    State(state): State<SharedState>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<SessionView>> {
    let ((), view) = state.update(id, |s| s.start()).await?;
    Ok(Json(view))
}

pub async fn answer(
    State(state): State<SharedState>,
    Path(id): Path<SessionId>,
    body: Result<Json<AnswerBody>, JsonRejection>,
) -> ApiResult<Json<SessionView>> {
    let Json(body) = body?;
    let (pending, view) = state
        .update(id, |s| s.select_answer(body.choice(), &body.text))
        .await?;
    state.dispatch(id, pending);
    Ok(Json(view))
}

pub async fn rate(
    State(state): State<SharedState>,
    Path(id): Path<SessionId>,
    body: Result<Json<RatingBody>, JsonRejection>,
) -> ApiResult<Json<SessionView>> {
    let Json(body) = body?;
    let (_tone, view) = state.update(id, |s| s.submit_rating(body.value)).await?;
    Ok(Json(view))
}

pub async fn continue_quiz(
    State(state): State<SharedState>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<SessionView>> {
    let (pending, view) = state.update(id, |s| s.continue_quiz()).await?;
    if let Some(pending) = pending {
        state.dispatch(id, pending);
    }
    Ok(Json(view))
}

pub async fn restart(
    State(state): State<SharedState>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<SessionView>> {
    let ((), view) = state
        .update(id, |s| {
            s.restart();
            Ok(())
        })
        .await?;
    Ok(Json(view))
}
