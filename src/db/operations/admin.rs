use sqlx::{Connection, SqliteConnection};

/// Tables cleared by a study-history reset, children before parents.
const HISTORY_TABLES: &[&str] = &["word_review_items", "study_sessions"];

/// Tables cleared by a full reset, children before parents.
const ALL_TABLES: &[&str] = &[
    "word_review_items",
    "study_sessions",
    "word_groups",
    "words",
    "groups",
    "study_activities",
];

pub async fn reset_history(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    clear_tables(conn, HISTORY_TABLES).await
}

pub async fn full_reset(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    clear_tables(conn, ALL_TABLES).await
}

async fn clear_tables(conn: &mut SqliteConnection, tables: &[&str]) -> Result<u64, sqlx::Error> {
    let mut tx = conn.begin().await?;
    let mut removed = 0;

    for table in tables {
        let sql = format!(r#"DELETE FROM "{table}""#);
        removed += sqlx::query(&sql).execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    tracing::info!(tables = tables.len(), rows = removed, "tables cleared");

    Ok(removed)
}
