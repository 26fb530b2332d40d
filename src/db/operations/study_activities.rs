use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StudyActivity {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

pub async fn list_activities(
    conn: &mut SqliteConnection,
) -> Result<Vec<StudyActivity>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT "id", "name", "url", "thumbnail_url", "description"
        FROM "study_activities"
        ORDER BY "id" ASC
        "#,
    )
    .fetch_all(conn)
    .await?;

    rows.iter().map(map_activity).collect()
}

pub async fn find_activity(
    conn: &mut SqliteConnection,
    activity_id: i64,
) -> Result<Option<StudyActivity>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT "id", "name", "url", "thumbnail_url", "description"
        FROM "study_activities"
        WHERE "id" = ?
        "#,
    )
    .bind(activity_id)
    .fetch_optional(conn)
    .await?;

    row.as_ref().map(map_activity).transpose()
}

fn map_activity(row: &SqliteRow) -> Result<StudyActivity, sqlx::Error> {
    Ok(StudyActivity {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        url: row.try_get("url")?,
        thumbnail_url: row.try_get("thumbnail_url")?,
        description: row.try_get("description")?,
    })
}
