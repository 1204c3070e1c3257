//! Import CLI tests using assert_cmd.

use assert_cmd::Command;
use assessment_platform::{config::Config, routes, state::AppState, store::MemoryStore};
use predicates::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn import_assessment() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("import-assessment").unwrap();
    cmd.env_remove("ASSESSMENT_API_URL").env("RUST_LOG", "info");
    cmd
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn document(correct_answer_index: i64) -> String {
    serde_json::json!({
        "_id": "65f0c0ffee",
        "title": "Cargo Basics",
        "description": "Workspaces and features",
        "questions": [
            { "text": "Which file lists dependencies?", "options": ["Cargo.toml", "Cargo.lock"], "correctAnswerIndex": correct_answer_index },
            { "text": "Do features unify?", "options": ["yes", "no"], "correctAnswerIndex": 0 }
        ]
    })
    .to_string()
}

async fn spawn_app() -> String {
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config: Config::default(),
    };
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

#[test]
fn dry_run_accepts_valid_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "assessment.json", &document(0));

    import_assessment()
        .arg(&path)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("with 2 questions"));
}

#[test]
fn out_of_range_key_fails_with_field_path() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "assessment.json", &document(2));

    import_assessment()
        .arg(&path)
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("questions[0].correctAnswerIndex"));
}

#[test]
fn invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.json", "{ \"title\": ");

    import_assessment()
        .arg(&path)
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();

    import_assessment()
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[tokio::test(flavor = "multi_thread")]
async fn imports_into_running_server() {
    let address = spawn_app().await;
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "assessment.json", &document(0));
    let api_url = format!("{}/api", address);

    tokio::task::spawn_blocking(move || {
        import_assessment()
            .arg(&path)
            .arg("--api-url")
            .arg(api_url)
            .assert()
            .success();
    })
    .await
    .unwrap();

    let listed: Vec<serde_json::Value> = reqwest::get(format!("{}/api/assessments", address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Cargo Basics");
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_import_fails() {
    let address = spawn_app().await;
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "assessment.json", &document(0));
    // No server route here, so the import is rejected with 404.
    let api_url = format!("{}/missing", address);

    tokio::task::spawn_blocking(move || {
        import_assessment()
            .arg(&path)
            .arg("--api-url")
            .arg(api_url)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Import rejected (404"));
    })
    .await
    .unwrap();
}
