use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqliteConnection};

use crate::db::operations::words::{map_word_with_stats, WordWithStats};
use crate::pagination::Page;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StudySessionSummary {
    pub id: i64,
    pub group_id: i64,
    pub group_name: String,
    pub study_activity_id: i64,
    pub activity_name: String,
    pub start_time: String,
    pub end_time: String,
    pub review_items_count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WordReviewItem {
    pub id: i64,
    pub word_id: i64,
    pub study_session_id: i64,
    pub correct: bool,
    pub created_at: String,
}

/// Which sessions a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    All,
    Group(i64),
    Activity(i64),
}

impl SessionScope {
    const fn where_clause(self) -> &'static str {
        match self {
            SessionScope::All => "",
            SessionScope::Group(_) => r#"WHERE ss."group_id" = ?"#,
            SessionScope::Activity(_) => r#"WHERE ss."study_activity_id" = ?"#,
        }
    }

    const fn bound_id(self) -> Option<i64> {
        match self {
            SessionScope::All => None,
            SessionScope::Group(id) | SessionScope::Activity(id) => Some(id),
        }
    }
}

const SUMMARY_SELECT: &str = r#"
    SELECT
        ss."id",
        ss."group_id",
        g."name" AS "group_name",
        ss."study_activity_id",
        sa."name" AS "activity_name",
        strftime('%Y-%m-%dT%H:%M:%SZ', ss."created_at") AS "start_time",
        strftime('%Y-%m-%dT%H:%M:%SZ', COALESCE(MAX(wri."created_at"), ss."created_at")) AS "end_time",
        COUNT(wri."id") AS "review_items_count"
    FROM "study_sessions" ss
    JOIN "groups" g ON g."id" = ss."group_id"
    JOIN "study_activities" sa ON sa."id" = ss."study_activity_id"
    LEFT JOIN "word_review_items" wri ON wri."study_session_id" = ss."id"
"#;

pub async fn count_sessions(
    conn: &mut SqliteConnection,
    scope: SessionScope,
) -> Result<i64, sqlx::Error> {
    let sql = format!(
        r#"SELECT COUNT(*) FROM "study_sessions" ss {}"#,
        scope.where_clause()
    );
    let mut query = sqlx::query_scalar::<Sqlite, i64>(&sql);
    if let Some(id) = scope.bound_id() {
        query = query.bind(id);
    }
    query.fetch_one(conn).await
}

pub async fn list_sessions(
    conn: &mut SqliteConnection,
    scope: SessionScope,
    page: Page,
) -> Result<Vec<StudySessionSummary>, sqlx::Error> {
    let sql = format!(
        r#"
        {SUMMARY_SELECT}
        {}
        GROUP BY ss."id"
        ORDER BY ss."created_at" DESC, ss."id" DESC
        LIMIT ? OFFSET ?
        "#,
        scope.where_clause(),
    );

    let mut query = sqlx::query::<Sqlite>(&sql);
    if let Some(id) = scope.bound_id() {
        query = query.bind(id);
    }
    let rows = query
        .bind(page.per_page)
        .bind(page.offset())
        .fetch_all(conn)
        .await?;

    rows.iter().map(map_summary).collect()
}

pub async fn find_session(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<Option<StudySessionSummary>, sqlx::Error> {
    let sql = format!(
        r#"
        {SUMMARY_SELECT}
        WHERE ss."id" = ?
        GROUP BY ss."id"
        "#
    );

    let row = sqlx::query(&sql)
        .bind(session_id)
        .fetch_optional(conn)
        .await?;

    row.as_ref().map(map_summary).transpose()
}

pub async fn session_exists(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar(r#"SELECT "id" FROM "study_sessions" WHERE "id" = ?"#)
            .bind(session_id)
            .fetch_optional(conn)
            .await?;
    Ok(found.is_some())
}

pub async fn create_session(
    conn: &mut SqliteConnection,
    group_id: i64,
    study_activity_id: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO "study_sessions" ("group_id", "study_activity_id") VALUES (?, ?)"#,
    )
    .bind(group_id)
    .bind(study_activity_id)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn record_review(
    conn: &mut SqliteConnection,
    session_id: i64,
    word_id: i64,
    correct: bool,
) -> Result<WordReviewItem, sqlx::Error> {
    let id = sqlx::query(
        r#"
        INSERT INTO "word_review_items" ("word_id", "study_session_id", "correct")
        VALUES (?, ?, ?)
        "#,
    )
    .bind(word_id)
    .bind(session_id)
    .bind(correct)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    let row = sqlx::query(
        r#"
        SELECT "id", "word_id", "study_session_id", "correct",
               strftime('%Y-%m-%dT%H:%M:%SZ', "created_at") AS "created_at"
        FROM "word_review_items"
        WHERE "id" = ?
        "#,
    )
    .bind(id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(WordReviewItem {
        id: row.try_get("id")?,
        word_id: row.try_get("word_id")?,
        study_session_id: row.try_get("study_session_id")?,
        correct: row.try_get("correct")?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn count_session_words(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"SELECT COUNT(DISTINCT "word_id") FROM "word_review_items" WHERE "study_session_id" = ?"#,
    )
    .bind(session_id)
    .fetch_one(conn)
    .await
}

/// Distinct words reviewed in a session, with counts limited to that session.
pub async fn list_session_words(
    conn: &mut SqliteConnection,
    session_id: i64,
    page: Page,
) -> Result<Vec<WordWithStats>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT w."id", w."kanji", w."romaji", w."english",
               SUM(CASE WHEN wri."correct" = 1 THEN 1 ELSE 0 END) AS "correct_count",
               SUM(CASE WHEN wri."correct" = 0 THEN 1 ELSE 0 END) AS "wrong_count"
        FROM "word_review_items" wri
        JOIN "words" w ON w."id" = wri."word_id"
        WHERE wri."study_session_id" = ?
        GROUP BY w."id"
        ORDER BY w."kanji" ASC, w."id" ASC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(session_id)
    .bind(page.per_page)
    .bind(page.offset())
    .fetch_all(conn)
    .await?;

    rows.iter().map(map_word_with_stats).collect()
}

fn map_summary(row: &SqliteRow) -> Result<StudySessionSummary, sqlx::Error> {
    Ok(StudySessionSummary {
        id: row.try_get("id")?,
        group_id: row.try_get("group_id")?,
        group_name: row.try_get("group_name")?,
        study_activity_id: row.try_get("study_activity_id")?,
        activity_name: row.try_get("activity_name")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        review_items_count: row.try_get("review_items_count")?,
    })
}
