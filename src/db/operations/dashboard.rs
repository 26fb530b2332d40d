use serde::Serialize;
use sqlx::{Row, SqliteConnection};

/// Trailing window for `active_groups`, as an SQLite date modifier.
const ACTIVE_GROUP_WINDOW: &str = "-30 days";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecentSession {
    pub id: i64,
    pub group_id: i64,
    pub group_name: String,
    pub activity_name: String,
    pub created_at: String,
    pub correct_count: i64,
    pub wrong_count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_vocabulary: i64,
    pub total_words_studied: i64,
    pub success_rate: f64,
    pub total_sessions: i64,
    pub active_groups: i64,
    /// Always zero: streaks are not tracked.
    pub current_streak: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StudyProgress {
    pub total_words_studied: i64,
    pub total_available_words: i64,
}

pub async fn recent_session(
    conn: &mut SqliteConnection,
) -> Result<Option<RecentSession>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            ss."id",
            ss."group_id",
            g."name" AS "group_name",
            sa."name" AS "activity_name",
            strftime('%Y-%m-%dT%H:%M:%SZ', ss."created_at") AS "created_at",
            COUNT(CASE WHEN wri."correct" = 1 THEN 1 END) AS "correct_count",
            COUNT(CASE WHEN wri."correct" = 0 THEN 1 END) AS "wrong_count"
        FROM "study_sessions" ss
        JOIN "study_activities" sa ON sa."id" = ss."study_activity_id"
        JOIN "groups" g ON g."id" = ss."group_id"
        LEFT JOIN "word_review_items" wri ON wri."study_session_id" = ss."id"
        GROUP BY ss."id"
        ORDER BY ss."created_at" DESC, ss."id" DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(Some(RecentSession {
        id: row.try_get("id")?,
        group_id: row.try_get("group_id")?,
        group_name: row.try_get("group_name")?,
        activity_name: row.try_get("activity_name")?,
        created_at: row.try_get("created_at")?,
        correct_count: row.try_get("correct_count")?,
        wrong_count: row.try_get("wrong_count")?,
    }))
}

pub async fn stats(conn: &mut SqliteConnection) -> Result<DashboardStats, sqlx::Error> {
    let progress = study_progress(&mut *conn).await?;

    let success_rate: Option<f64> = sqlx::query_scalar(
        r#"
        SELECT ROUND(AVG(CASE WHEN "correct" = 1 THEN 100.0 ELSE 0.0 END), 2)
        FROM "word_review_items"
        "#,
    )
    .fetch_one(&mut *conn)
    .await?;

    let total_sessions: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "study_sessions""#)
        .fetch_one(&mut *conn)
        .await?;

    let active_groups: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(DISTINCT "group_id")
        FROM "study_sessions"
        WHERE "created_at" >= datetime('now', ?)
        "#,
    )
    .bind(ACTIVE_GROUP_WINDOW)
    .fetch_one(&mut *conn)
    .await?;

    Ok(DashboardStats {
        total_vocabulary: progress.total_available_words,
        total_words_studied: progress.total_words_studied,
        success_rate: success_rate.unwrap_or(0.0).clamp(0.0, 100.0),
        total_sessions,
        active_groups,
        current_streak: 0,
    })
}

pub async fn study_progress(conn: &mut SqliteConnection) -> Result<StudyProgress, sqlx::Error> {
    let total_available_words: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "words""#)
        .fetch_one(&mut *conn)
        .await?;

    let total_words_studied: i64 =
        sqlx::query_scalar(r#"SELECT COUNT(DISTINCT "word_id") FROM "word_review_items""#)
            .fetch_one(&mut *conn)
            .await?;

    Ok(StudyProgress {
        total_words_studied,
        total_available_words,
    })
}
