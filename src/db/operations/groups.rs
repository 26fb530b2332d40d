use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::db::operations::words::{map_word, map_word_with_stats, Word, WordWithStats};
use crate::pagination::{GroupSort, Page, SortOrder, WordSort};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub word_count: i64,
}

const GROUP_COLUMNS: &str = r#"
    g."id", g."name",
    (SELECT COUNT(*) FROM "word_groups" wg WHERE wg."group_id" = g."id") AS "word_count"
"#;

pub async fn count_groups(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "groups""#)
        .fetch_one(conn)
        .await
}

pub async fn list_groups(
    conn: &mut SqliteConnection,
    page: Page,
    sort: GroupSort,
    order: SortOrder,
) -> Result<Vec<Group>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {GROUP_COLUMNS}
        FROM "groups" g
        ORDER BY {} {}, g."id" ASC
        LIMIT ? OFFSET ?
        "#,
        sort.as_sql(),
        order.as_sql(),
    );

    let rows = sqlx::query(&sql)
        .bind(page.per_page)
        .bind(page.offset())
        .fetch_all(conn)
        .await?;

    rows.iter().map(map_group).collect()
}

pub async fn find_group(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Option<Group>, sqlx::Error> {
    let sql = format!(r#"SELECT {GROUP_COLUMNS} FROM "groups" g WHERE g."id" = ?"#);
    let row = sqlx::query(&sql)
        .bind(group_id)
        .fetch_optional(conn)
        .await?;

    row.as_ref().map(map_group).transpose()
}

pub async fn count_group_words(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "word_groups" WHERE "group_id" = ?"#)
        .bind(group_id)
        .fetch_one(conn)
        .await
}

pub async fn list_group_words(
    conn: &mut SqliteConnection,
    group_id: i64,
    page: Page,
    sort: WordSort,
    order: SortOrder,
) -> Result<Vec<WordWithStats>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT w."id", w."kanji", w."romaji", w."english",
               COALESCE(wr."correct_count", 0) AS "correct_count",
               COALESCE(wr."wrong_count", 0) AS "wrong_count"
        FROM "words" w
        JOIN "word_groups" wg ON wg."word_id" = w."id"
        LEFT JOIN "word_reviews" wr ON wr."word_id" = w."id"
        WHERE wg."group_id" = ?
        ORDER BY {} {}, w."id" ASC
        LIMIT ? OFFSET ?
        "#,
        sort.as_sql(),
        order.as_sql(),
    );

    let rows = sqlx::query(&sql)
        .bind(group_id)
        .bind(page.per_page)
        .bind(page.offset())
        .fetch_all(conn)
        .await?;

    rows.iter().map(map_word_with_stats).collect()
}

/// Every word of a group, unpaged. Activity launchers load a whole group at once.
pub async fn all_group_words(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Vec<Word>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT w."id", w."kanji", w."romaji", w."english"
        FROM "words" w
        JOIN "word_groups" wg ON wg."word_id" = w."id"
        WHERE wg."group_id" = ?
        ORDER BY w."id" ASC
        "#,
    )
    .bind(group_id)
    .fetch_all(conn)
    .await?;

    rows.iter().map(map_word).collect()
}

fn map_group(row: &SqliteRow) -> Result<Group, sqlx::Error> {
    Ok(Group {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        word_count: row.try_get("word_count")?,
    })
}
