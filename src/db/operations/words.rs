use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::pagination::{Page, SortOrder, WordSort};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WordWithStats {
    pub id: i64,
    pub kanji: String,
    pub romaji: String,
    pub english: String,
    pub correct_count: i64,
    pub wrong_count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Word {
    pub id: i64,
    pub kanji: String,
    pub romaji: String,
    pub english: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GroupRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordDetail {
    #[serde(flatten)]
    pub word: WordWithStats,
    pub groups: Vec<GroupRef>,
}

pub async fn count_words(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "words""#)
        .fetch_one(conn)
        .await
}

pub async fn list_words(
    conn: &mut SqliteConnection,
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
        LEFT JOIN "word_reviews" wr ON wr."word_id" = w."id"
        ORDER BY {} {}, w."id" ASC
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

    rows.iter().map(map_word_with_stats).collect()
}

pub async fn find_word(
    conn: &mut SqliteConnection,
    word_id: i64,
) -> Result<Option<WordWithStats>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT w."id", w."kanji", w."romaji", w."english",
               COALESCE(wr."correct_count", 0) AS "correct_count",
               COALESCE(wr."wrong_count", 0) AS "wrong_count"
        FROM "words" w
        LEFT JOIN "word_reviews" wr ON wr."word_id" = w."id"
        WHERE w."id" = ?
        "#,
    )
    .bind(word_id)
    .fetch_optional(conn)
    .await?;

    row.as_ref().map(map_word_with_stats).transpose()
}

pub async fn groups_of_word(
    conn: &mut SqliteConnection,
    word_id: i64,
) -> Result<Vec<GroupRef>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT g."id", g."name"
        FROM "word_groups" wg
        JOIN "groups" g ON g."id" = wg."group_id"
        WHERE wg."word_id" = ?
        ORDER BY g."name" ASC, g."id" ASC
        "#,
    )
    .bind(word_id)
    .fetch_all(conn)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(GroupRef {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            })
        })
        .collect()
}

pub async fn word_detail(
    conn: &mut SqliteConnection,
    word_id: i64,
) -> Result<Option<WordDetail>, sqlx::Error> {
    let Some(word) = find_word(&mut *conn, word_id).await? else {
        return Ok(None);
    };
    let groups = groups_of_word(&mut *conn, word_id).await?;
    Ok(Some(WordDetail { word, groups }))
}

pub async fn word_exists(conn: &mut SqliteConnection, word_id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar(r#"SELECT "id" FROM "words" WHERE "id" = ?"#)
        .bind(word_id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

pub(crate) fn map_word_with_stats(row: &SqliteRow) -> Result<WordWithStats, sqlx::Error> {
    Ok(WordWithStats {
        id: row.try_get("id")?,
        kanji: row.try_get("kanji")?,
        romaji: row.try_get("romaji")?,
        english: row.try_get("english")?,
        correct_count: row.try_get("correct_count")?,
        wrong_count: row.try_get("wrong_count")?,
    })
}

pub(crate) fn map_word(row: &SqliteRow) -> Result<Word, sqlx::Error> {
    Ok(Word {
        id: row.try_get("id")?,
        kanji: row.try_get("kanji")?,
        romaji: row.try_get("romaji")?,
        english: row.try_get("english")?,
    })
}
