//! CLI integration tests against a mock gateway API.

mod common;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::run_cli_with_env;

/// Run the CLI off the async runtime so the mock server keeps serving.
async fn run(args: Vec<String>, home: TempDir) -> (std::process::Output, TempDir) {
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        (run_cli_with_env(&args, home.path()), home)
    })
    .await
    .unwrap()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_from_api_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/members"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "M-1", "name": "Somsak", "createdAt": "2024-01-05T10:00:00Z", "pin": "9876"},
                {"id": "M-2", "name": "Malee", "createdAt": "2024-02-05T10:00:00Z"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = server.uri();
    let (output, _home) = run(
        args(&["list", "members", "--source", &source, "--token", "t0ken", "--json"]),
        TempDir::new().unwrap(),
    )
    .await;
    assert!(output.status.success());

    let page: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total"], 2);
    assert_eq!(page["items"][0]["id"], "M-2");
    assert_eq!(page["items"][1]["pin"], "****");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_token_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transfers"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Unauthorized",
            "message": "token expired"
        })))
        .mount(&server)
        .await;

    let source = server.uri();

    // list degrades to an empty page but still names the token.
    let (output, home) = run(
        args(&["list", "transfers", "--source", &source, "--json"]),
        TempDir::new().unwrap(),
    )
    .await;
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("credentials rejected"));
    assert!(stderr.contains("PAYDESK_TOKEN"));
    let page: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total"], 0);

    // show fails outright.
    let (output, _home) = run(args(&["show", "transfers", "T-1", "--source", &source]), home).await;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("credentials rejected"));
}
