use axum::routing::get;
use axum::{Json, Router};

use crate::db::operations::dashboard::{self, DashboardStats, RecentSession, StudyProgress};
use crate::db::DbConn;
use crate::response::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recent-session", get(recent_session))
        .route("/stats", get(stats))
        .route("/study_progress", get(study_progress))
}

/// Responds with JSON `null` until the first session exists.
async fn recent_session(mut conn: DbConn) -> Result<Json<Option<RecentSession>>, AppError> {
    let session = dashboard::recent_session(&mut conn).await?;
    Ok(Json(session))
}

async fn stats(mut conn: DbConn) -> Result<Json<DashboardStats>, AppError> {
    let stats = dashboard::stats(&mut conn).await?;
    Ok(Json(stats))
}

async fn study_progress(mut conn: DbConn) -> Result<Json<StudyProgress>, AppError> {
    let progress = dashboard::study_progress(&mut conn).await?;
    Ok(Json(progress))
}
