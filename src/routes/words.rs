use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::operations::words::{self, WordDetail, WordWithStats};
use crate::db::DbConn;
use crate::pagination::{Page, SortOrder, WordSort};
use crate::response::AppError;
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 10;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WordListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl WordListQuery {
    pub(crate) fn parse(&self) -> Result<(Page, WordSort, SortOrder), AppError> {
        let page = Page::new(self.page, self.per_page, DEFAULT_PER_PAGE)?;
        let sort = WordSort::parse(self.sort_by.as_deref())?;
        let order = SortOrder::parse(self.order.as_deref())?;
        Ok((page, sort, order))
    }
}

#[derive(Debug, Serialize)]
struct WordListResponse {
    words: Vec<WordWithStats>,
    total_pages: i64,
    current_page: i64,
    total_words: i64,
}

#[derive(Debug, Serialize)]
struct WordDetailResponse {
    word: WordDetail,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_words))
        .route("/:id", get(get_word))
}

async fn list_words(
    query: Result<Query<WordListQuery>, QueryRejection>,
    mut conn: DbConn,
) -> Result<Json<WordListResponse>, AppError> {
    let Query(query) = query?;
    let (page, sort, order) = query.parse()?;

    let total = words::count_words(&mut conn).await?;
    let items = words::list_words(&mut conn, page, sort, order).await?;

    Ok(Json(WordListResponse {
        words: items,
        total_pages: page.total_pages(total),
        current_page: page.page,
        total_words: total,
    }))
}

async fn get_word(
    word_id: Result<Path<i64>, PathRejection>,
    mut conn: DbConn,
) -> Result<Json<WordDetailResponse>, AppError> {
    let Path(word_id) = word_id?;

    let word = words::word_detail(&mut conn, word_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("word {word_id} not found")))?;

    Ok(Json(WordDetailResponse { word }))
}
