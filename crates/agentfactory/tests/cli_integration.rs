//! CLI integration tests for the `agentfactory` binary.
//!
//! Parsing tests need no service. The remaining tests point the binary at a
//! wiremock server and check what it prints.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get a command for the agentfactory binary, isolated from the caller's
/// environment and config files.
fn agentfactory(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("agentfactory").unwrap();
    cmd.current_dir(workdir.path())
        .env("AGENTFACTORY_CONFIG_DIR", workdir.path())
        .env_remove("AGENTFACTORY_API_KEY")
        .env_remove("AGENTFACTORY_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Agent Factory"));
}

#[test]
fn test_version_displays() {
    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agentfactory"));
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("agents"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("kb"))
        .stdout(predicate::str::contains("webhooks"))
        .stdout(predicate::str::contains("errors"))
        .stdout(predicate::str::contains("tour"));
}

#[test]
fn test_kb_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .args(["kb", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("add-doc"));
}

#[test]
fn test_agents_create_requires_name() {
    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .args(["agents", "create", "--blueprint", "bp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn test_webhook_create_requires_event() {
    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .args([
            "webhooks",
            "create",
            "--name",
            "hook",
            "--url",
            "https://example.com/hook",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--event"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Against a mock service
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_errors_reports_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents/invalid_agent_id"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "agent_not_found",
            "message": "No agent with id invalid_agent_id"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .args(["--base-url", &server.uri(), "errors"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Agent not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_errors_reports_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents/agt_1"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "code": "maintenance",
            "message": "down for maintenance"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .args(["--base-url", &server.uri(), "errors", "agt_1"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "API Error: down for maintenance (Status: 503)",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_chat_prints_agent_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents/agt_42"))
        .and(header("authorization", "Bearer your_api_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "agt_42",
            "name": "Support",
            "blueprint_id": "support_bot_blueprint"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/agents/agt_42/conversations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "conv_1",
            "agent_id": "agt_42"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/agents/agt_42/conversations/conv_1/messages"))
        .and(body_json(json!({"text": "Hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "Hi, I can help with orders.",
            "role": "assistant",
            "timestamp": "2024-05-01T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .args(["--base-url", &server.uri(), "chat", "agt_42", "Hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Agent response: Hi, I can help with orders.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_agents_list_uses_config_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents"))
        .and(header("authorization", "Bearer key_from_file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "agt_1", "name": "First", "blueprint_id": "bp"},
                {"id": "agt_2", "name": "Second", "blueprint_id": "bp"}
            ]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!("base_url = \"{}\"\napi_key = \"key_from_file\"\n", server.uri()),
    )
    .unwrap();

    agentfactory(&dir)
        .args(["agents", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 agents:"))
        .stdout(predicate::str::contains("- First (agt_1)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_config_file_is_skipped_with_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[retry]\nmax_attempts = 0\n",
    )
    .unwrap();

    agentfactory(&dir)
        .args(["--base-url", &server.uri(), "agents", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 agents:"))
        .stderr(predicate::str::contains("Failed to load"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_agents_get_json_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents/agt_7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "agt_7",
            "name": "Seven",
            "blueprint_id": "bp"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .args(["--json", "--base-url", &server.uri(), "agents", "get", "agt_7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"agt_7\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_agents_get_not_found_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "agent_not_found",
            "message": "no such agent"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .args(["--base-url", &server.uri(), "agents", "get", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error getting agent"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tour_completes_when_every_call_fails() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": "internal",
            "message": "boom"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .args(["--base-url", &server.uri(), "tour"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Creating agent..."))
        .stdout(predicate::str::contains("2. Getting agent").not())
        .stdout(predicate::str::contains("5. Querying knowledge base").not())
        .stdout(predicate::str::contains("9. Error handling..."))
        .stdout(predicate::str::contains("API Error: boom (Status: 500)"))
        .stdout(predicate::str::contains("Examples completed!"))
        .stderr(predicate::str::contains("error creating agent"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tour_runs_every_step_against_healthy_service() {
    let server = MockServer::start().await;
    let agent = json!({
        "id": "agt_1",
        "name": "Customer Support Bot",
        "blueprint_id": "support_bot_blueprint",
        "knowledge_base_id": "kb_123"
    });
    let kb = json!({"id": "kb_1", "name": "Product Knowledge Base", "document_count": 1});

    Mock::given(method("POST"))
        .and(path("/api/v1/agents"))
        .and(body_json(json!({
            "name": "Customer Support Bot",
            "blueprint_id": "support_bot_blueprint",
            "knowledge_base_id": "kb_123",
            "description": "AI-powered customer support agent"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(&agent))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents/agt_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&agent))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/agents/agt_1/conversations"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "conv_1", "agent_id": "agt_1"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/agents/agt_1/conversations/conv_1/messages"))
        .and(body_json(json!({"text": "Hello, how can you help me?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "I can help with orders and returns.",
            "role": "assistant",
            "timestamp": "2024-05-01T12:00:00Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/knowledge-bases"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&kb))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/knowledge-bases/kb_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&kb))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/knowledge-bases/kb_1/documents"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": "doc_1", "knowledge_base_id": "kb_1"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/knowledge-bases/kb_1/query"))
        .and(body_json(json!({"query": "What is Product X?", "limit": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"title": "Pricing", "snippet": "Plans start at $10", "score": 0.4},
                {
                    "title": "Product X Overview",
                    "snippet": "Product X is our flagship product",
                    "score": 0.9
                }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/webhooks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "wh_1",
            "name": "My Webhook",
            "url": "https://example.com/webhooks/agentfactory",
            "events": ["agent.created", "conversation.message"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [agent]})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents/invalid_agent_id"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "agent_not_found",
            "message": "No agent with id invalid_agent_id"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    agentfactory(&dir)
        .args(["--base-url", &server.uri(), "tour"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Agent created: agt_1"))
        .stdout(predicate::str::contains("2. Getting agent..."))
        .stdout(predicate::str::contains("Agent: Customer Support Bot"))
        .stdout(predicate::str::contains(
            "Agent response: I can help with orders and returns.",
        ))
        .stdout(predicate::str::contains("Knowledge base created: kb_1"))
        .stdout(predicate::str::contains("Document added to knowledge base"))
        .stdout(predicate::str::contains("5. Querying knowledge base..."))
        .stdout(predicate::str::contains(
            "Found 2 results:\n\
             - Product X Overview: Product X is our flagship product (0.90)\n\
             - Pricing:",
        ))
        .stdout(predicate::str::contains("Webhook created: wh_1"))
        .stdout(predicate::str::contains("Found 1 agents:"))
        .stdout(predicate::str::contains("- Customer Support Bot (agt_1)"))
        .stdout(predicate::str::contains("Agent not found"))
        .stdout(predicate::str::contains("Examples completed!"))
        .stderr(predicate::str::contains("Error:").not());
}
