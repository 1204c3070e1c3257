// tests/api_tests.rs

use assessment_platform::{config::Config, routes, state::AppState, store::MemoryStore};
use std::sync::Arc;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. Create test configuration and state on the in-memory store
    let config = Config {
        rust_log: "error".to_string(),
        ..Config::default()
    };

    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config,
    };

    // 2. Create the router with the app state
    let app = routes::create_router(state);

    // 3. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 4. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn sample_assessment() -> serde_json::Value {
    serde_json::json!({
        "title": "Rust Ownership",
        "description": "Moves, borrows and lifetimes",
        "questions": [
            { "text": "Who owns a moved value?", "options": ["caller", "callee"], "correctAnswerIndex": 1 },
            { "text": "How many &mut at once?", "options": ["0", "1", "many"], "correctAnswerIndex": 1 },
            { "text": "Is Box<T> Copy?", "options": ["yes", "no"], "correctAnswerIndex": 1 }
        ]
    })
}

async fn create(client: &reqwest::Client, address: &str, body: &serde_json::Value) -> serde_json::Value {
    let response = client
        .post(&format!("{}/api/assessments", address))
        .json(body)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("Failed to parse json")
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn create_assessment_works() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let created = create(&client, &address, &sample_assessment()).await;

    // Assert
    assert!(created["id"].as_i64().is_some());
    assert_eq!(created["version"], 1);
    assert_eq!(created["questions"][1]["correctAnswerIndex"], 1);
    assert!(created["createdAt"].as_str().is_some());
}

#[tokio::test]
async fn create_assessment_fails_validation() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let mut body = sample_assessment();
    body["questions"][2]["correctAnswerIndex"] = serde_json::json!(5);

    // Act
    let response = client
        .post(&format!("{}/api/assessments", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let err: serde_json::Value = response.json().await.unwrap();
    assert!(
        err["error"]
            .as_str()
            .unwrap()
            .contains("questions[2].correctAnswerIndex")
    );
}

#[tokio::test]
async fn create_assessment_rejects_non_json_body() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(&format!("{}/api/assessments", address))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let err: serde_json::Value = response.json().await.unwrap();
    assert!(err["error"].as_str().is_some());
}

#[tokio::test]
async fn public_view_hides_answer_key() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let created = create(&client, &address, &sample_assessment()).await;
    let id = created["id"].as_i64().unwrap();

    // Act
    let single = client
        .get(&format!("{}/api/assessments/{}", address, id))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let list = client
        .get(&format!("{}/api/assessments", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let owner: serde_json::Value = client
        .get(&format!("{}/api/assessments/{}/with-answers", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert!(single.contains("Rust Ownership"));
    assert!(!single.contains("correctAnswerIndex"));
    assert!(!list.contains("correctAnswerIndex"));
    assert_eq!(owner["questions"][0]["correctAnswerIndex"], 1);
}

#[tokio::test]
async fn import_ignores_supplied_id_and_timestamp() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let mut body = sample_assessment();
    body["id"] = serde_json::json!(999);
    body["_id"] = serde_json::json!("65f0c0ffee");
    body["createdAt"] = serde_json::json!("2001-01-01T00:00:00Z");

    // Act
    let response = client
        .post(&format!("{}/api/assessments/import", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let imported: serde_json::Value = response.json().await.unwrap();
    assert_eq!(imported["success"], true);
    assert_ne!(imported["assessment"]["id"], 999);
    assert_ne!(imported["assessment"]["createdAt"], "2001-01-01T00:00:00Z");
    assert_eq!(imported["assessment"]["title"], body["title"]);
    assert_eq!(imported["assessment"]["questions"], body["questions"]);
}

#[tokio::test]
async fn import_rejects_missing_title() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let body = serde_json::json!({ "description": "no title", "questions": [] });

    // Act
    let response = client
        .post(&format!("{}/api/assessments/import", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let err: serde_json::Value = response.json().await.unwrap();
    assert_eq!(err["error"], "title: is required");
}

#[tokio::test]
async fn update_replaces_questions_and_bumps_version() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let created = create(&client, &address, &sample_assessment()).await;
    let id = created["id"].as_i64().unwrap();

    let replacement = serde_json::json!({
        "title": "Rust Ownership v2",
        "description": "Shorter",
        "questions": [
            { "text": "Is Rc<T> Send?", "options": ["yes", "no"], "correctAnswerIndex": 1 }
        ]
    });

    // Act
    let response = client
        .put(&format!("{}/api/assessments/{}", address, id))
        .json(&replacement)
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["version"], 2);
    assert_eq!(updated["questions"].as_array().unwrap().len(), 1);
    assert_eq!(updated["id"], id);
}

#[tokio::test]
async fn update_unknown_assessment_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .put(&format!("{}/api/assessments/4242", address))
        .json(&sample_assessment())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_assessment_works() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let created = create(&client, &address, &sample_assessment()).await;
    let id = created["id"].as_i64().unwrap();

    // Act
    let first = client
        .delete(&format!("{}/api/assessments/{}", address, id))
        .send()
        .await
        .unwrap();
    let second = client
        .delete(&format!("{}/api/assessments/{}", address, id))
        .send()
        .await
        .unwrap();
    let fetch = client
        .get(&format!("{}/api/assessments/{}", address, id))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(second.status().as_u16(), 404);
    assert_eq!(fetch.status().as_u16(), 404);
}
