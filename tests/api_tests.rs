//! API integration tests
//!
//! Run against a live server (database and Redis up) with:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so repeated runs don't collide on unique columns
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    format!("{}{:08x}", prefix, nanos)
}

/// Register a fresh user and log in; returns (token, user_id)
async fn register_and_login(client: &Client, username: &str) -> (String, i64) {
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "password",
            "email": format!("{}@test.com", username)
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);
    let user: Value = response.json().await.expect("Failed to parse register response");
    let user_id = user["id"].as_i64().expect("No user ID");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "password" }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse login response");
    let token = body["token"].as_str().expect("No token in response").to_string();

    (token, user_id)
}

/// Create a club; returns its id
async fn create_club(client: &Client, token: &str, name: &str) -> i64 {
    let response = client
        .post(format!("{}/clubs", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send create club request");

    assert_eq!(response.status(), 201);
    let club: Value = response.json().await.expect("Failed to parse club response");
    club["id"].as_i64().expect("No club ID")
}

/// Create a book directly; returns its id
async fn create_book(client: &Client, token: &str, title: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": title,
            "author": "Test Author",
            "image": "/static/images/placeholder.png",
            "num_pages": 310,
            "publish_date": "21 September 1937"
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);
    let book: Value = response.json().await.expect("Failed to parse book response");
    book["id"].as_i64().expect("No book ID")
}

/// Add a book to a club's queue
async fn add_read(client: &Client, token: &str, club_id: i64, book_id: i64) {
    let response = client
        .post(format!("{}/clubs/{}/reads", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send add read request");

    assert_eq!(response.status(), 201);
}

async fn get_reads(client: &Client, token: &str, club_id: i64) -> Vec<Value> {
    let response = client
        .get(format!("{}/clubs/{}/reads", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send list reads request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse reads response");
    body.as_array().expect("Reads body is not an array").clone()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let username = unique("u");

    let (token, _user_id) = register_and_login(&client, &username).await;
    assert!(!token.is_empty());

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], username.as_str());
    // the hash never leaves the server
    assert!(body.get("password").is_none());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_username_is_conflict() {
    let client = Client::new();
    let username = unique("u");

    let (token, _) = register_and_login(&client, &username).await;

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "other-password",
            "email": "other@test.com"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    // no second row appeared
    let response = client
        .get(format!("{}/users?name={}", BASE_URL, username))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 1);
}

#[tokio::test]
#[ignore]
async fn test_wrong_credentials_are_indistinguishable() {
    let client = Client::new();
    let username = unique("u");
    register_and_login(&client, &username).await;

    let wrong_password = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(wrong_password.status(), 401);
    let wrong_password: Value = wrong_password.json().await.expect("Failed to parse response");

    let unknown_user = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": unique("nouser"), "password": "password" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(unknown_user.status(), 401);
    let unknown_user: Value = unknown_user.json().await.expect("Failed to parse response");

    // same error body either way
    assert_eq!(wrong_password["message"], unknown_user["message"]);
}

#[tokio::test]
#[ignore]
async fn test_first_joiner_is_admin() {
    let client = Client::new();
    let (token_a, user_a) = register_and_login(&client, &unique("ua")).await;
    let (token_b, _) = register_and_login(&client, &unique("ub")).await;
    let (token_c, user_c) = register_and_login(&client, &unique("uc")).await;

    // creator joins as the first member and becomes admin
    let club_id = create_club(&client, &token_a, &unique("club")).await;

    let response = client
        .get(format!("{}/clubs/{}", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token_a))
        .send()
        .await
        .expect("Failed to send request");
    let club: Value = response.json().await.expect("Failed to parse response");
    let members = club["members"].as_array().expect("No members array");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["user_id"].as_i64(), Some(user_a));
    assert_eq!(members[0]["admin"], true);

    // second joiner is a plain member
    let response = client
        .post(format!("{}/clubs/{}/join", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token_b))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let membership: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(membership["admin"], false);
    assert_eq!(membership["moderator"], false);

    // both leave; the next joiner finds an empty club and gets admin
    for token in [&token_a, &token_b] {
        let response = client
            .post(format!("{}/clubs/{}/leave", BASE_URL, club_id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 204);
    }

    let response = client
        .post(format!("{}/clubs/{}/join", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token_c))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let membership: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(membership["user_id"].as_i64(), Some(user_c));
    assert_eq!(membership["admin"], true);
}

#[tokio::test]
#[ignore]
async fn test_join_twice_is_conflict() {
    let client = Client::new();
    let (token_a, _) = register_and_login(&client, &unique("ua")).await;
    let (token_b, _) = register_and_login(&client, &unique("ub")).await;
    let club_id = create_club(&client, &token_a, &unique("club")).await;

    for expected in [201, 409] {
        let response = client
            .post(format!("{}/clubs/{}/join", BASE_URL, club_id))
            .header("Authorization", format!("Bearer {}", token_b))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
#[ignore]
async fn test_at_most_one_current_read() {
    let client = Client::new();
    let (token, _) = register_and_login(&client, &unique("u")).await;
    let club_id = create_club(&client, &token, &unique("club")).await;

    let b1 = create_book(&client, &token, &unique("Book A ")).await;
    let b2 = create_book(&client, &token, &unique("Book B ")).await;
    let b3 = create_book(&client, &token, &unique("Book C ")).await;
    for book_id in [b1, b2, b3] {
        add_read(&client, &token, club_id, book_id).await;
    }

    // b1 current, then b2 current: b1 must be cleared
    for book_id in [b1, b2] {
        let response = client
            .post(format!("{}/clubs/{}/reads/{}/current", BASE_URL, club_id, book_id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    let reads = get_reads(&client, &token, club_id).await;
    let current: Vec<_> = reads.iter().filter(|r| r["current"] == true).collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0]["book_id"].as_i64(), Some(b2));

    // toggling the current read off leaves none current
    let response = client
        .post(format!("{}/clubs/{}/reads/{}/current", BASE_URL, club_id, b2))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let reads = get_reads(&client, &token, club_id).await;
    assert!(reads.iter().all(|r| r["current"] == false));
}

#[tokio::test]
#[ignore]
async fn test_complete_forces_not_current() {
    let client = Client::new();
    let (token, _) = register_and_login(&client, &unique("u")).await;
    let club_id = create_club(&client, &token, &unique("club")).await;
    let book_id = create_book(&client, &token, &unique("Book ")).await;
    add_read(&client, &token, club_id, book_id).await;

    let response = client
        .post(format!("{}/clubs/{}/reads/{}/current", BASE_URL, club_id, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let read: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(read["current"], true);

    let response = client
        .post(format!("{}/clubs/{}/reads/{}/complete", BASE_URL, club_id, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let read: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(read["complete"], true);
    assert_eq!(read["current"], false);

    // and back to incomplete
    let response = client
        .post(format!("{}/clubs/{}/reads/{}/complete", BASE_URL, club_id, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let read: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(read["complete"], false);
}

#[tokio::test]
#[ignore]
async fn test_moderator_toggle() {
    let client = Client::new();
    let (token_a, user_a) = register_and_login(&client, &unique("ua")).await;
    let (token_b, user_b) = register_and_login(&client, &unique("ub")).await;
    let club_id = create_club(&client, &token_a, &unique("club")).await;

    let response = client
        .post(format!("{}/clubs/{}/join", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token_b))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // a plain member cannot grant roles
    let response = client
        .post(format!("{}/clubs/{}/members/{}/moderator", BASE_URL, club_id, user_a))
        .header("Authorization", format!("Bearer {}", token_b))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // admin toggles the member: member -> moderator -> member
    for expected in [true, false] {
        let response = client
            .post(format!("{}/clubs/{}/members/{}/moderator", BASE_URL, club_id, user_b))
            .header("Authorization", format!("Bearer {}", token_a))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
        let membership: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(membership["moderator"].as_bool(), Some(expected));
    }

    // the admin's own membership is not a valid target
    let response = client
        .post(format!("{}/clubs/{}/members/{}/moderator", BASE_URL, club_id, user_a))
        .header("Authorization", format!("Bearer {}", token_a))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_club_delete_is_admin_only_and_cascades() {
    let client = Client::new();
    let (token_a, _) = register_and_login(&client, &unique("ua")).await;
    let (token_b, _) = register_and_login(&client, &unique("ub")).await;
    let club_id = create_club(&client, &token_a, &unique("club")).await;

    let response = client
        .post(format!("{}/clubs/{}/join", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token_b))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let book_id = create_book(&client, &token_a, &unique("Book ")).await;
    add_read(&client, &token_a, club_id, book_id).await;

    let response = client
        .post(format!("{}/clubs/{}/meetings", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token_a))
        .json(&json!({ "date": "2024-09-20", "topic": "Chapter one" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let meeting: Value = response.json().await.expect("Failed to parse response");
    let meeting_id = meeting["id"].as_i64().expect("No meeting ID");

    // a plain member cannot delete the club
    let response = client
        .delete(format!("{}/clubs/{}", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token_b))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // the admin can, and everything club-scoped goes with it
    let response = client
        .delete(format!("{}/clubs/{}", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token_a))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    for url in [
        format!("{}/clubs/{}", BASE_URL, club_id),
        format!("{}/meetings/{}", BASE_URL, meeting_id),
    ] {
        let response = client
            .get(url)
            .header("Authorization", format!("Bearer {}", token_a))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 404);
    }

    // the book itself is shared and survives
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token_a))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_meeting_delete_detaches_notes() {
    let client = Client::new();
    let (token, _) = register_and_login(&client, &unique("u")).await;
    let club_id = create_club(&client, &token, &unique("club")).await;
    let book_id = create_book(&client, &token, &unique("Book ")).await;

    let response = client
        .post(format!("{}/clubs/{}/meetings", BASE_URL, club_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "date": "2024-09-30", "topic": "Wrap-up" }))
        .send()
        .await
        .expect("Failed to send request");
    let meeting: Value = response.json().await.expect("Failed to parse response");
    let meeting_id = meeting["id"].as_i64().expect("No meeting ID");

    let response = client
        .post(format!("{}/notes", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "meeting_id": meeting_id,
            "text": "Gimli is my favorite"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let note: Value = response.json().await.expect("Failed to parse response");
    let note_id = note["id"].as_i64().expect("No note ID");

    let response = client
        .delete(format!("{}/meetings/{}", BASE_URL, meeting_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // the note survives, detached from the meeting
    let response = client
        .get(format!("{}/books/{}/notes", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let notes: Value = response.json().await.expect("Failed to parse response");
    let note = notes
        .as_array()
        .expect("Notes body is not an array")
        .iter()
        .find(|n| n["id"].as_i64() == Some(note_id))
        .expect("Note disappeared with its meeting");
    assert!(note["meeting_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_note_author_gate() {
    let client = Client::new();
    let (token_a, _) = register_and_login(&client, &unique("ua")).await;
    let (token_b, _) = register_and_login(&client, &unique("ub")).await;
    let book_id = create_book(&client, &token_a, &unique("Book ")).await;

    let response = client
        .post(format!("{}/notes", BASE_URL))
        .header("Authorization", format!("Bearer {}", token_a))
        .json(&json!({ "book_id": book_id, "text": "mama mia" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let note: Value = response.json().await.expect("Failed to parse response");
    let note_id = note["id"].as_i64().expect("No note ID");

    // only the author can touch it
    let response = client
        .put(format!("{}/notes/{}", BASE_URL, note_id))
        .header("Authorization", format!("Bearer {}", token_b))
        .json(&json!({ "text": "hijacked" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .delete(format!("{}/notes/{}", BASE_URL, note_id))
        .header("Authorization", format!("Bearer {}", token_b))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .put(format!("{}/notes/{}", BASE_URL, note_id))
        .header("Authorization", format!("Bearer {}", token_a))
        .json(&json!({ "text": "edited" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let note: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(note["text"], "edited");
}

#[tokio::test]
#[ignore]
async fn test_favorite_toggle() {
    let client = Client::new();
    let (token, user_id) = register_and_login(&client, &unique("u")).await;
    let book_id = create_book(&client, &token, &unique("Book ")).await;

    for expected in [true, false] {
        let response = client
            .post(format!("{}/books/{}/favorite", BASE_URL, book_id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["favorite"].as_bool(), Some(expected));
    }

    let response = client
        .get(format!("{}/users/{}/favorites", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let favorites: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(favorites.as_array().map(|a| a.len()), Some(0));
}

#[tokio::test]
#[ignore]
async fn test_user_delete_cascades() {
    let client = Client::new();
    let (token_a, _) = register_and_login(&client, &unique("ua")).await;
    let (token_d, user_d) = register_and_login(&client, &unique("ud")).await;
    let book_id = create_book(&client, &token_a, &unique("Book ")).await;

    let response = client
        .post(format!("{}/notes", BASE_URL))
        .header("Authorization", format!("Bearer {}", token_d))
        .json(&json!({ "book_id": book_id, "text": "short-lived" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let note: Value = response.json().await.expect("Failed to parse response");
    let note_id = note["id"].as_i64().expect("No note ID");

    let response = client
        .post(format!("{}/books/{}/favorite", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token_d))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // a user can only delete their own account
    let response = client
        .delete(format!("{}/users/{}", BASE_URL, user_d))
        .header("Authorization", format!("Bearer {}", token_a))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .delete(format!("{}/users/{}", BASE_URL, user_d))
        .header("Authorization", format!("Bearer {}", token_d))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // the account is gone and the note went with it
    let response = client
        .get(format!("{}/users/{}", BASE_URL, user_d))
        .header("Authorization", format!("Bearer {}", token_a))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = client
        .get(format!("{}/books/{}/notes", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token_a))
        .send()
        .await
        .expect("Failed to send request");
    let notes: Value = response.json().await.expect("Failed to parse response");
    assert!(notes
        .as_array()
        .expect("Notes body is not an array")
        .iter()
        .all(|n| n["id"].as_i64() != Some(note_id)));
}

#[tokio::test]
#[ignore]
async fn test_import_without_lookup_is_bad_request() {
    let client = Client::new();
    let (token, _) = register_and_login(&client, &unique("u")).await;

    let response = client
        .post(format!("{}/books/import", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_logout_invalidates_session() {
    let client = Client::new();
    let (token, _) = register_and_login(&client, &unique("u")).await;

    let response = client
        .post(format!("{}/auth/logout", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}
