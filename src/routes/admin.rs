use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use crate::db::operations::admin;
use crate::db::DbConn;
use crate::response::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ResetResponse {
    success: bool,
    message: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reset_history", post(reset_history))
        .route("/full_reset", post(full_reset))
}

async fn reset_history(mut conn: DbConn) -> Result<Json<ResetResponse>, AppError> {
    let removed = admin::reset_history(&mut conn).await?;
    tracing::warn!(rows = removed, "study history reset");

    Ok(Json(ResetResponse {
        success: true,
        message: "All study history has been reset",
    }))
}

async fn full_reset(mut conn: DbConn) -> Result<Json<ResetResponse>, AppError> {
    let removed = admin::full_reset(&mut conn).await?;
    tracing::warn!(rows = removed, "full database reset");

    Ok(Json(ResetResponse {
        success: true,
        message: "System reset complete",
    }))
}
