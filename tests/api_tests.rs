// tests/api_tests.rs

use std::sync::Arc;
use std::time::Duration;

use promptjudge::{
    auth::LocalAuthProvider,
    catalog::Catalog,
    config::{AuthBackend, AuthConfig, Config, ServerConfig, SessionConfig, SimulationConfig},
    simulation::Pipeline,
    state::AppState,
};
use serde_json::{json, Value};

/// Spawn the app on a random port with an instant, seeded pipeline.
/// Returns the API base URL (e.g., "http://127.0.0.1:12345/api/v1").
async fn spawn_app() -> String {
    let simulation = SimulationConfig {
        generation_delay: Duration::ZERO,
        test_run_delay: Duration::ZERO,
        seed: Some(42),
    };

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "error".to_string(),
            json_logs: false,
        },
        simulation: simulation.clone(),
        sessions: SessionConfig::default(),
        auth: AuthConfig {
            backend: AuthBackend::Local {
                jwt_secret: "test_secret_for_integration_tests".to_string(),
                expiry_hours: 1,
            },
            redirect_url: "http://localhost:8080/".to_string(),
        },
    };

    let state = AppState::new(
        Catalog::bundled().expect("Bundled catalog must parse"),
        Pipeline::simulated(&simulation),
        Arc::new(LocalAuthProvider::new("test_secret_for_integration_tests", 1)),
        config,
    );

    let app = promptjudge::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}/api/v1", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn create_session(client: &reqwest::Client, address: &str) -> String {
    let response = client
        .post(format!("{}/sessions", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    body["session_id"].as_str().unwrap().to_string()
}

/// Poll the session until it leaves the given phase
async fn wait_until_not(
    client: &reqwest::Client,
    address: &str,
    session_id: &str,
    phase: &str,
) -> Value {
    for _ in 0..200 {
        let body: Value = client
            .get(format!("{}/sessions/{}", address, session_id))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .unwrap();

        if body["phase"]["state"] != phase {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("session {} stuck in phase {}", session_id, phase);
}

#[tokio::test]
async fn health_check_works() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["problems"], 3);
}

#[tokio::test]
async fn unknown_path_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn problems_are_listed_in_catalog_order() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/problems", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["total"], 3);
    assert_eq!(body["problems"][0]["title"], "Two Sum");
    assert_eq!(body["problems"][2]["category_icon"], "list");

    let response = client
        .get(format!("{}/problems/2", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Valid Parentheses");
    let templates = body["test_cases"].as_array().unwrap();
    assert!(!templates.is_empty());
    assert_eq!(templates[0]["id"], 1);
    assert!(templates[0]["expected_output"].is_string());

    let response = client
        .get(format!("{}/problems/99", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn generate_run_submit_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let session_id = create_session(&client, &address).await;

    // Submitting before anything ran is rejected with a notice
    let response = client
        .post(format!("{}/sessions/{}/submit", address, session_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "TESTS_NOT_PASSED");
    assert_eq!(body["error"]["details"]["title"], "Cannot Submit");

    // Generate
    let response = client
        .post(format!("{}/sessions/{}/generate", address, session_id))
        .json(&json!({ "prompt": "Use a hash map to track elements and their indices" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 202);

    let body = wait_until_not(&client, &address, &session_id, "generating").await;
    assert_eq!(body["phase"]["state"], "generated");
    assert!(body["code"].as_str().unwrap().starts_with("function twoSum"));
    assert_eq!(body["notice"]["title"], "Code Generated!");

    // Run
    let response = client
        .post(format!("{}/sessions/{}/run", address, session_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 202);

    let body = wait_until_not(&client, &address, &session_id, "running").await;
    assert_eq!(body["phase"]["state"], "run_complete");
    assert_eq!(body["phase"]["all_passed"], true);
    assert_eq!(body["test_cases"]["passed"], 3);
    assert!(body["controls"]["submit_enabled"].as_bool().unwrap());

    // Submit
    let response = client
        .post(format!("{}/sessions/{}/submit", address, session_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["phase"]["state"], "submitted");

    let result = &body["submission_result"];
    assert_eq!(result["all_tests_passed"], true);
    assert_eq!(result["user_complexity"]["time"], "O(n)");
    assert_eq!(result["user_complexity"]["space"], "O(n)");
    let ms = result["execution_time_ms"].as_u64().unwrap();
    assert!((10..60).contains(&ms));
    assert_eq!(body["submission"]["headline"], "Solution Accepted!");
}

#[tokio::test]
async fn run_without_code_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let session_id = create_session(&client, &address).await;

    let response = client
        .post(format!("{}/sessions/{}/run", address, session_id))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NO_CODE_TO_TEST");
    assert_eq!(body["error"]["details"]["title"], "No Code to Test");

    let body = wait_until_not(&client, &address, &session_id, "running").await;
    assert_eq!(body["phase"]["state"], "idle");
}

#[tokio::test]
async fn problem_navigation_resets_session() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let session_id = create_session(&client, &address).await;

    client
        .put(format!("{}/sessions/{}/code", address, session_id))
        .json(&json!({ "code": "return [0, 1];" }))
        .send()
        .await
        .unwrap();

    let body: Value = client
        .put(format!("{}/sessions/{}/problem", address, session_id))
        .json(&json!({ "problem_id": 3 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["problem_id"], 3);
    assert_eq!(body["code"], "");
    assert_eq!(body["notice"]["description"], "Switched to: Reverse Linked List");

    // Next wraps back to the first problem
    let body: Value = client
        .post(format!("{}/sessions/{}/next", address, session_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["problem_id"], 1);
    assert_eq!(body["phase"]["state"], "idle");
}

#[tokio::test]
async fn oversized_prompt_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let session_id = create_session(&client, &address).await;

    let response = client
        .post(format!("{}/sessions/{}/generate", address, session_id))
        .json(&json!({ "prompt": "a".repeat(4001) }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn deleted_session_is_gone() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let session_id = create_session(&client, &address).await;

    let response = client
        .delete(format!("{}/sessions/{}", address, session_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .get(format!("{}/sessions/{}", address, session_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn sign_up_then_sign_in() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);
    let credentials = json!({ "email": email, "password": "password123" });

    let response = client
        .post(format!("{}/auth/sign-up", address))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["notice"]["title"], "Check your email");

    let response = client
        .post(format!("{}/auth/sign-up", address))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["notice"]["title"], "Sign up failed");
    assert_eq!(body["notice"]["description"], "User already registered");

    let body: Value = client
        .get(format!("{}/auth/session", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["authenticated"], false);

    let response = client
        .post(format!("{}/auth/sign-in", address))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["notice"]["title"], "Welcome back");
    assert_eq!(body["redirect_to"], "/");

    let body: Value = client
        .get(format!("{}/auth/session", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["redirect_to"], "/");
}

#[tokio::test]
async fn sign_in_with_wrong_password_fails() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/auth/sign-in", address))
        .json(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["notice"]["title"], "Login failed");
    assert_eq!(body["notice"]["description"], "Invalid login credentials");
}

/// Read SSE bytes until `needle` shows up, or give up after a few seconds
async fn read_events_until(response: &mut reqwest::Response, needle: &str) -> String {
    let mut received = String::new();
    let read = async {
        while let Some(chunk) = response.chunk().await.expect("Failed to read event stream") {
            received.push_str(&String::from_utf8_lossy(&chunk));
            if received.contains(needle) {
                break;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(5), read)
        .await
        .expect("Timed out waiting for event");
    received
}

#[tokio::test]
async fn events_stream_redirects_after_sign_in() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let credentials = json!({ "email": "events@example.com", "password": "password123" });

    let response = client
        .post(format!("{}/auth/sign-up", address))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let mut events = client
        .get(format!("{}/auth/events", address))
        .send()
        .await
        .unwrap();
    assert_eq!(events.status().as_u16(), 200);
    assert!(events.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let response = client
        .post(format!("{}/auth/sign-in", address))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let received = read_events_until(&mut events, "data: /").await;
    assert!(received.contains("event: redirect"));
    assert!(received.contains("data: /"));
}

#[tokio::test]
async fn events_stream_starts_with_existing_session() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let credentials = json!({ "email": "early@example.com", "password": "password123" });

    for path in ["sign-up", "sign-in"] {
        let response = client
            .post(format!("{}/auth/{}", address, path))
            .json(&credentials)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    let mut events = client
        .get(format!("{}/auth/events", address))
        .send()
        .await
        .unwrap();

    let received = read_events_until(&mut events, "data: /").await;
    assert!(received.contains("event: redirect"));
}

#[tokio::test]
async fn sign_out_ends_session() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let credentials = json!({ "email": "leaving@example.com", "password": "password123" });

    for path in ["sign-up", "sign-in"] {
        client
            .post(format!("{}/auth/{}", address, path))
            .json(&credentials)
            .send()
            .await
            .unwrap();
    }

    let response = client
        .post(format!("{}/auth/sign-out", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["notice"]["title"], "Signed out");

    let body: Value = client
        .get(format!("{}/auth/session", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["authenticated"], false);
}
