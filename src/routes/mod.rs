mod admin;
mod dashboard;
mod groups;
mod health;
mod study_activities;
mod study_sessions;
mod words;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::pagination::{Page, Pagination};
use crate::response::{json_error, AppError};
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 10;

/// `page` / `per_page` for listings that have no sort options.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    page: Option<i64>,
    per_page: Option<i64>,
}

impl PageQuery {
    pub(crate) fn page(&self) -> Result<Page, AppError> {
        Ok(Page::new(self.page, self.per_page, DEFAULT_PER_PAGE)?)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ListResponse<T> {
    items: Vec<T>,
    pagination: Pagination,
}

impl<T> ListResponse<T> {
    pub(crate) fn new(items: Vec<T>, page: Page, total: i64) -> Self {
        Self {
            items,
            pagination: page.describe(total),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/words", words::router())
        .nest("/api/groups", groups::router())
        .nest("/api/study_sessions", study_sessions::router())
        .nest("/api/study_activities", study_activities::router())
        .nest("/api/dashboard", dashboard::router())
        .nest("/api/health", health::router())
        .nest("/api", admin::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "route not found").into_response()
}
