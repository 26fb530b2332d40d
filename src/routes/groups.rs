use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::operations::groups::{self, Group};
use crate::db::operations::study_sessions::{self, SessionScope};
use crate::db::operations::words::{Word, WordWithStats};
use crate::db::DbConn;
use crate::pagination::{GroupSort, Page, SortOrder};
use crate::response::AppError;
use crate::routes::words::WordListQuery;
use crate::routes::{ListResponse, PageQuery};
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 10;

#[derive(Debug, Deserialize)]
struct GroupListQuery {
    page: Option<i64>,
    per_page: Option<i64>,
    sort_by: Option<String>,
    order: Option<String>,
}

#[derive(Debug, Serialize)]
struct GroupListResponse {
    groups: Vec<Group>,
    total_pages: i64,
    current_page: i64,
    total_groups: i64,
}

#[derive(Debug, Serialize)]
struct GroupWordsResponse {
    words: Vec<WordWithStats>,
    total_pages: i64,
    current_page: i64,
    total_words: i64,
}

#[derive(Debug, Serialize)]
struct RawWordsResponse {
    words: Vec<Word>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_groups))
        .route("/:id", get(get_group))
        .route("/:id/words", get(group_words))
        .route("/:id/words/raw", get(group_words_raw))
        .route("/:id/study_sessions", get(group_sessions))
}

async fn list_groups(
    query: Result<Query<GroupListQuery>, QueryRejection>,
    mut conn: DbConn,
) -> Result<Json<GroupListResponse>, AppError> {
    let Query(query) = query?;
    let page = Page::new(query.page, query.per_page, DEFAULT_PER_PAGE)?;
    let sort = GroupSort::parse(query.sort_by.as_deref())?;
    let order = SortOrder::parse(query.order.as_deref())?;

    let total = groups::count_groups(&mut conn).await?;
    let items = groups::list_groups(&mut conn, page, sort, order).await?;

    Ok(Json(GroupListResponse {
        groups: items,
        total_pages: page.total_pages(total),
        current_page: page.page,
        total_groups: total,
    }))
}

async fn get_group(
    group_id: Result<Path<i64>, PathRejection>,
    mut conn: DbConn,
) -> Result<Json<Group>, AppError> {
    let Path(group_id) = group_id?;
    let group = require_group(&mut conn, group_id).await?;
    Ok(Json(group))
}

async fn group_words(
    group_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<WordListQuery>, QueryRejection>,
    mut conn: DbConn,
) -> Result<Json<GroupWordsResponse>, AppError> {
    let Path(group_id) = group_id?;
    let Query(query) = query?;
    let (page, sort, order) = query.parse()?;

    require_group(&mut conn, group_id).await?;

    let total = groups::count_group_words(&mut conn, group_id).await?;
    let items = groups::list_group_words(&mut conn, group_id, page, sort, order).await?;

    Ok(Json(GroupWordsResponse {
        words: items,
        total_pages: page.total_pages(total),
        current_page: page.page,
        total_words: total,
    }))
}

async fn group_words_raw(
    group_id: Result<Path<i64>, PathRejection>,
    mut conn: DbConn,
) -> Result<Json<RawWordsResponse>, AppError> {
    let Path(group_id) = group_id?;
    require_group(&mut conn, group_id).await?;

    let words = groups::all_group_words(&mut conn, group_id).await?;
    Ok(Json(RawWordsResponse { words }))
}

async fn group_sessions(
    group_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
    mut conn: DbConn,
) -> Result<Json<ListResponse<study_sessions::StudySessionSummary>>, AppError> {
    let Path(group_id) = group_id?;
    let Query(query) = query?;
    let page = query.page()?;

    require_group(&mut conn, group_id).await?;

    let scope = SessionScope::Group(group_id);
    let total = study_sessions::count_sessions(&mut conn, scope).await?;
    let items = study_sessions::list_sessions(&mut conn, scope, page).await?;

    Ok(Json(ListResponse::new(items, page, total)))
}

async fn require_group(conn: &mut DbConn, group_id: i64) -> Result<Group, AppError> {
    groups::find_group(conn, group_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("group {group_id} not found")))
}
