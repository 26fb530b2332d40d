use sqlx::SqlitePool;

struct SeedWord {
    kanji: &'static str,
    romaji: &'static str,
    english: &'static str,
    groups: &'static [&'static str],
}

struct SeedActivity {
    name: &'static str,
    url: &'static str,
    thumbnail_url: &'static str,
    description: &'static str,
}

const SEED_GROUPS: &[&str] = &["Core Verbs", "Core Adjectives", "Greetings"];

const SEED_WORDS: &[SeedWord] = &[
    SeedWord { kanji: "払う", romaji: "harau", english: "to pay", groups: &["Core Verbs"] },
    SeedWord { kanji: "行く", romaji: "iku", english: "to go", groups: &["Core Verbs"] },
    SeedWord { kanji: "食べる", romaji: "taberu", english: "to eat", groups: &["Core Verbs"] },
    SeedWord { kanji: "新しい", romaji: "atarashii", english: "new", groups: &["Core Adjectives"] },
    SeedWord { kanji: "高い", romaji: "takai", english: "expensive; tall", groups: &["Core Adjectives"] },
    SeedWord { kanji: "今日は", romaji: "konnichiwa", english: "hello", groups: &["Greetings"] },
    SeedWord { kanji: "有難う", romaji: "arigatou", english: "thank you", groups: &["Greetings"] },
];

const SEED_ACTIVITIES: &[SeedActivity] = &[
    SeedActivity {
        name: "Flashcards",
        url: "http://localhost:8081",
        thumbnail_url: "/assets/study_activities/flashcards.png",
        description: "Practice with flashcards",
    },
    SeedActivity {
        name: "Typing Tutor",
        url: "http://localhost:8082",
        thumbnail_url: "/assets/study_activities/typing-tutor.png",
        description: "Type the romaji for each word",
    },
];

/// Inserts demo vocabulary into an empty database. Returns whether anything was written.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "words""#)
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::debug!(words = existing, "database already populated, skipping seed");
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let mut group_ids = Vec::with_capacity(SEED_GROUPS.len());
    for name in SEED_GROUPS {
        let id = sqlx::query(r#"INSERT INTO "groups" ("name") VALUES (?)"#)
            .bind(*name)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        group_ids.push((*name, id));
    }

    for word in SEED_WORDS {
        let word_id = sqlx::query(
            r#"INSERT INTO "words" ("kanji", "romaji", "english") VALUES (?, ?, ?)"#,
        )
        .bind(word.kanji)
        .bind(word.romaji)
        .bind(word.english)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for group_name in word.groups {
            let Some((_, group_id)) = group_ids.iter().find(|(name, _)| name == group_name) else {
                continue;
            };
            sqlx::query(r#"INSERT INTO "word_groups" ("word_id", "group_id") VALUES (?, ?)"#)
                .bind(word_id)
                .bind(*group_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    for activity in SEED_ACTIVITIES {
        sqlx::query(
            r#"
            INSERT INTO "study_activities" ("name", "url", "thumbnail_url", "description")
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(activity.name)
        .bind(activity.url)
        .bind(activity.thumbnail_url)
        .bind(activity.description)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        words = SEED_WORDS.len(),
        groups = SEED_GROUPS.len(),
        activities = SEED_ACTIVITIES.len(),
        "seeded demo vocabulary"
    );

    Ok(true)
}
