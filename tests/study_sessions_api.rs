use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::TestApp;

#[tokio::test]
async fn test_create_session() {
    let app = TestApp::new().await;
    let (group_id, activity_id, _) = app.seed_basic().await;

    let (status, body) = app
        .post_json(
            "/api/study_sessions",
            json!({ "group_id": group_id, "study_activity_id": activity_id }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["group_id"], group_id);
    assert_eq!(body["group_name"], "Core Verbs");
    assert_eq!(body["study_activity_id"], activity_id);
    assert_eq!(body["activity_name"], "Flashcards");
    assert_eq!(body["review_items_count"], 0);
    assert_eq!(body["start_time"], body["end_time"]);
}

#[tokio::test]
async fn test_create_session_with_unknown_group_is_404() {
    let app = TestApp::new().await;
    let (_, activity_id, _) = app.seed_basic().await;

    let (status, body) = app
        .post_json(
            "/api/study_sessions",
            json!({ "group_id": 999, "study_activity_id": activity_id }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "group 999 not found");
}

#[tokio::test]
async fn test_create_session_with_unknown_activity_is_404() {
    let app = TestApp::new().await;
    let (group_id, _, _) = app.seed_basic().await;

    let (status, body) = app
        .post_json(
            "/api/study_sessions",
            json!({ "group_id": group_id, "study_activity_id": 999 }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "study activity 999 not found");
}

#[tokio::test]
async fn test_create_session_with_missing_field_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/api/study_sessions", json!({ "group_id": 1 }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_review_word_records_item_and_updates_stats() {
    let app = TestApp::new().await;
    let (group_id, activity_id, words) = app.seed_basic().await;
    let session = app
        .insert_session_at(group_id, activity_id, "2024-05-01 12:00:00")
        .await;

    let (status, body) = app
        .post_json(
            &format!("/api/study_sessions/{session}/words/{}/review", words[1]),
            json!({ "correct": true }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["word_id"], words[1]);
    assert_eq!(body["study_session_id"], session);
    assert_eq!(body["correct"], true);
    assert!(body["created_at"].as_str().unwrap().ends_with('Z'));

    let (_, word) = app.get(&format!("/api/words/{}", words[1])).await;
    assert_eq!(word["word"]["correct_count"], 1);

    let (_, summary) = app.get(&format!("/api/study_sessions/{session}")).await;
    assert_eq!(summary["review_items_count"], 1);
}

#[tokio::test]
async fn test_review_with_unknown_session_or_word_is_404() {
    let app = TestApp::new().await;
    let (group_id, activity_id, words) = app.seed_basic().await;
    let session = app
        .insert_session_at(group_id, activity_id, "2024-05-01 12:00:00")
        .await;

    let (status, body) = app
        .post_json(
            &format!("/api/study_sessions/777/words/{}/review", words[0]),
            json!({ "correct": false }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "study session 777 not found");

    let (status, body) = app
        .post_json(
            &format!("/api/study_sessions/{session}/words/888/review"),
            json!({ "correct": false }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "word 888 not found");
}

#[tokio::test]
async fn test_list_sessions_newest_first_with_id_tiebreak() {
    let app = TestApp::new().await;
    let (group_id, activity_id, _) = app.seed_basic().await;

    let first = app
        .insert_session_at(group_id, activity_id, "2024-01-01 08:00:00")
        .await;
    let tie_a = app
        .insert_session_at(group_id, activity_id, "2024-02-01 08:00:00")
        .await;
    let tie_b = app
        .insert_session_at(group_id, activity_id, "2024-02-01 08:00:00")
        .await;

    let (status, body) = app.get("/api/study_sessions?per_page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total_items"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["items"][0]["id"], tie_b);
    assert_eq!(body["items"][1]["id"], tie_a);
    assert_eq!(body["items"][0]["start_time"], "2024-02-01T08:00:00Z");

    let (_, page_two) = app.get("/api/study_sessions?page=2&per_page=2").await;
    assert_eq!(page_two["items"][0]["id"], first);
}

#[tokio::test]
async fn test_get_unknown_session_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/study_sessions/5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app.get("/api/study_sessions/5/words").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_words_counts_are_per_session() {
    let app = TestApp::new().await;
    let (group_id, activity_id, words) = app.seed_basic().await;
    let earlier = app
        .insert_session_at(group_id, activity_id, "2024-01-01 08:00:00")
        .await;
    let current = app
        .insert_session_at(group_id, activity_id, "2024-01-02 08:00:00")
        .await;

    app.insert_review(earlier, words[0], true).await;
    app.insert_review(current, words[0], false).await;
    app.insert_review(current, words[0], true).await;
    app.insert_review(current, words[2], false).await;

    let (status, body) = app
        .get(&format!("/api/study_sessions/{current}/words"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total_items"], 2);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items[0]["id"], words[0]);
    assert_eq!(items[0]["correct_count"], 1);
    assert_eq!(items[0]["wrong_count"], 1);
    assert_eq!(items[1]["id"], words[2]);
    assert_eq!(items[1]["wrong_count"], 1);
}

#[tokio::test]
async fn test_activities_listing_and_sessions() {
    let app = TestApp::new().await;
    let (group_id, activity_id, _) = app.seed_basic().await;
    let other = app.insert_activity("Typing").await;
    let session = app
        .insert_session_at(group_id, activity_id, "2024-04-01 10:00:00")
        .await;
    app.insert_session_at(group_id, other, "2024-04-02 10:00:00")
        .await;

    let (status, list) = app.get("/api/study_activities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["name"], "Flashcards");
    assert_eq!(list[0]["url"], "http://localhost:8081/flashcards");
    assert!(list[0]["thumbnail_url"].is_null());

    let (status, one) = app
        .get(&format!("/api/study_activities/{activity_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["id"], activity_id);

    let (status, sessions) = app
        .get(&format!("/api/study_activities/{activity_id}/study_sessions"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sessions["pagination"]["total_items"], 1);
    assert_eq!(sessions["items"][0]["id"], session);

    let (status, _) = app.get("/api/study_activities/404/study_sessions").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
