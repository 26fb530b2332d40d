#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use lang_portal_backend::db::{self, config::DbConfig};
use lang_portal_backend::state::AppState;

pub const TEST_ORIGIN: &str = "http://localhost:5173";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let config = DbConfig::at_path(dir.path().join("words.db"));
        let pool = db::connect(&config).await.expect("failed to open test database");

        let router = lang_portal_backend::create_app(
            AppState::new(pool.clone()),
            &[TEST_ORIGIN.to_string()],
        );

        Self {
            router,
            pool,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is not JSON")
        };

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn insert_word(&self, kanji: &str, romaji: &str, english: &str) -> i64 {
        sqlx::query(r#"INSERT INTO "words" ("kanji", "romaji", "english") VALUES (?, ?, ?)"#)
            .bind(kanji)
            .bind(romaji)
            .bind(english)
            .execute(&self.pool)
            .await
            .expect("insert word")
            .last_insert_rowid()
    }

    pub async fn insert_group(&self, name: &str) -> i64 {
        sqlx::query(r#"INSERT INTO "groups" ("name") VALUES (?)"#)
            .bind(name)
            .execute(&self.pool)
            .await
            .expect("insert group")
            .last_insert_rowid()
    }

    pub async fn link(&self, word_id: i64, group_id: i64) {
        sqlx::query(r#"INSERT INTO "word_groups" ("word_id", "group_id") VALUES (?, ?)"#)
            .bind(word_id)
            .bind(group_id)
            .execute(&self.pool)
            .await
            .expect("link word to group");
    }

    pub async fn insert_activity(&self, name: &str) -> i64 {
        sqlx::query(
            r#"INSERT INTO "study_activities" ("name", "url", "thumbnail_url", "description") VALUES (?, ?, NULL, NULL)"#,
        )
        .bind(name)
        .bind(format!("http://localhost:8081/{}", name.to_lowercase()))
        .execute(&self.pool)
        .await
        .expect("insert activity")
        .last_insert_rowid()
    }

    /// `created_at` uses SQLite's `YYYY-MM-DD HH:MM:SS` form.
    pub async fn insert_session_at(&self, group_id: i64, activity_id: i64, created_at: &str) -> i64 {
        sqlx::query(
            r#"INSERT INTO "study_sessions" ("group_id", "study_activity_id", "created_at") VALUES (?, ?, ?)"#,
        )
        .bind(group_id)
        .bind(activity_id)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .expect("insert session")
        .last_insert_rowid()
    }

    pub async fn insert_review(&self, session_id: i64, word_id: i64, correct: bool) {
        sqlx::query(
            r#"INSERT INTO "word_review_items" ("word_id", "study_session_id", "correct") VALUES (?, ?, ?)"#,
        )
        .bind(word_id)
        .bind(session_id)
        .bind(correct)
        .execute(&self.pool)
        .await
        .expect("insert review");
    }

    /// Three words in one group, one activity. Returns (group_id, activity_id, word_ids).
    pub async fn seed_basic(&self) -> (i64, i64, Vec<i64>) {
        let group_id = self.insert_group("Core Verbs").await;
        let activity_id = self.insert_activity("Flashcards").await;

        let mut word_ids = Vec::new();
        for (kanji, romaji, english) in [
            ("払う", "harau", "to pay"),
            ("行く", "iku", "to go"),
            ("食べる", "taberu", "to eat"),
        ] {
            let id = self.insert_word(kanji, romaji, english).await;
            self.link(id, group_id).await;
            word_ids.push(id);
        }

        (group_id, activity_id, word_ids)
    }
}
