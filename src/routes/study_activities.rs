use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Json, Router};

use crate::db::operations::study_activities::{self, StudyActivity};
use crate::db::operations::study_sessions::{self, SessionScope, StudySessionSummary};
use crate::db::DbConn;
use crate::response::AppError;
use crate::routes::{ListResponse, PageQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activities))
        .route("/:id", get(get_activity))
        .route("/:id/study_sessions", get(activity_sessions))
}

async fn list_activities(mut conn: DbConn) -> Result<Json<Vec<StudyActivity>>, AppError> {
    let activities = study_activities::list_activities(&mut conn).await?;
    Ok(Json(activities))
}

async fn get_activity(
    activity_id: Result<Path<i64>, PathRejection>,
    mut conn: DbConn,
) -> Result<Json<StudyActivity>, AppError> {
    let Path(activity_id) = activity_id?;
    let activity = require_activity(&mut conn, activity_id).await?;
    Ok(Json(activity))
}

async fn activity_sessions(
    activity_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
    mut conn: DbConn,
) -> Result<Json<ListResponse<StudySessionSummary>>, AppError> {
    let Path(activity_id) = activity_id?;
    let Query(query) = query?;
    let page = query.page()?;

    require_activity(&mut conn, activity_id).await?;

    let scope = SessionScope::Activity(activity_id);
    let total = study_sessions::count_sessions(&mut conn, scope).await?;
    let items = study_sessions::list_sessions(&mut conn, scope, page).await?;

    Ok(Json(ListResponse::new(items, page, total)))
}

async fn require_activity(conn: &mut DbConn, activity_id: i64) -> Result<StudyActivity, AppError> {
    study_activities::find_activity(conn, activity_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("study activity {activity_id} not found")))
}
