use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::db::operations::study_sessions::{
    self, SessionScope, StudySessionSummary, WordReviewItem,
};
use crate::db::operations::words::{self, WordWithStats};
use crate::db::operations::{groups, study_activities};
use crate::db::DbConn;
use crate::response::AppError;
use crate::routes::{ListResponse, PageQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateSessionRequest {
    group_id: i64,
    study_activity_id: i64,
}

#[derive(Debug, Deserialize)]
struct ReviewRequest {
    correct: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route("/:id", get(get_session))
        .route("/:id/words", get(session_words))
        .route("/:id/words/:word_id/review", post(review_word))
}

async fn list_sessions(
    query: Result<Query<PageQuery>, QueryRejection>,
    mut conn: DbConn,
) -> Result<Json<ListResponse<StudySessionSummary>>, AppError> {
    let Query(query) = query?;
    let page = query.page()?;

    let total = study_sessions::count_sessions(&mut conn, SessionScope::All).await?;
    let items = study_sessions::list_sessions(&mut conn, SessionScope::All, page).await?;

    Ok(Json(ListResponse::new(items, page, total)))
}

async fn create_session(
    mut conn: DbConn,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StudySessionSummary>), AppError> {
    let Json(payload) = payload?;

    if groups::find_group(&mut conn, payload.group_id).await?.is_none() {
        return Err(AppError::not_found(format!(
            "group {} not found",
            payload.group_id
        )));
    }
    if study_activities::find_activity(&mut conn, payload.study_activity_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found(format!(
            "study activity {} not found",
            payload.study_activity_id
        )));
    }

    let session_id =
        study_sessions::create_session(&mut conn, payload.group_id, payload.study_activity_id)
            .await?;

    let session = study_sessions::find_session(&mut conn, session_id)
        .await?
        .ok_or_else(|| AppError::internal(format!("session {session_id} vanished after insert")))?;

    tracing::info!(
        session_id,
        group_id = payload.group_id,
        study_activity_id = payload.study_activity_id,
        "study session created"
    );

    Ok((StatusCode::CREATED, Json(session)))
}

async fn get_session(
    session_id: Result<Path<i64>, PathRejection>,
    mut conn: DbConn,
) -> Result<Json<StudySessionSummary>, AppError> {
    let Path(session_id) = session_id?;

    let session = study_sessions::find_session(&mut conn, session_id)
        .await?
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Json(session))
}

async fn session_words(
    session_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
    mut conn: DbConn,
) -> Result<Json<ListResponse<WordWithStats>>, AppError> {
    let Path(session_id) = session_id?;
    let Query(query) = query?;
    let page = query.page()?;

    if !study_sessions::session_exists(&mut conn, session_id).await? {
        return Err(session_not_found(session_id));
    }

    let total = study_sessions::count_session_words(&mut conn, session_id).await?;
    let items = study_sessions::list_session_words(&mut conn, session_id, page).await?;

    Ok(Json(ListResponse::new(items, page, total)))
}

async fn review_word(
    ids: Result<Path<(i64, i64)>, PathRejection>,
    mut conn: DbConn,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WordReviewItem>), AppError> {
    let Path((session_id, word_id)) = ids?;
    let Json(payload) = payload?;

    if !study_sessions::session_exists(&mut conn, session_id).await? {
        return Err(session_not_found(session_id));
    }
    if !words::word_exists(&mut conn, word_id).await? {
        return Err(AppError::not_found(format!("word {word_id} not found")));
    }

    let item =
        study_sessions::record_review(&mut conn, session_id, word_id, payload.correct).await?;

    tracing::debug!(session_id, word_id, correct = payload.correct, "review recorded");

    Ok((StatusCode::CREATED, Json(item)))
}

fn session_not_found(session_id: i64) -> AppError {
    AppError::not_found(format!("study session {session_id} not found"))
}
