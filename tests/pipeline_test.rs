//! Integration tests for the document pipeline using MockLLMClient
//!
//! These tests exercise the full five-step run without a real backend.

use memorybank::llm::{BackendError, MessageRole, MockLLMClient, MockResponse};
use memorybank::pipeline::{FailureKind, StepStatus};
use memorybank::{
    DocumentKind, GenerationRequest, GenerationService, MemoryBank, ProviderError, ServiceError,
};
use std::sync::Arc;

fn scripted_client(responses: Vec<MockResponse>) -> Arc<MockLLMClient> {
    let client = Arc::new(MockLLMClient::new());
    client.add_responses(responses);
    client
}

fn stub_all() -> Vec<MockResponse> {
    DocumentKind::ALL
        .iter()
        .map(|kind| MockResponse::document(kind.response_key(), "S", "D"))
        .collect()
}

fn request() -> GenerationRequest {
    GenerationRequest::new(
        "A recipe sharing site",
        "SvelteKit, Postgres",
        "search, favourites",
        "gpt-4o-mini:openai",
    )
}

#[tokio::test]
async fn test_full_run_produces_five_documents_and_lines() {
    let client = scripted_client(stub_all());
    let outcome = GenerationService::default()
        .run_with_client(client.clone(), request())
        .await
        .unwrap();

    let state = &outcome.state;
    for kind in DocumentKind::ALL {
        assert_eq!(state.document(kind), "D");
    }

    let lines: Vec<&str> = state.summary.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Project Brief: S",
            "Product Context: S",
            "Active Context: S",
            "System Patterns: S",
            "Tech Context: S",
        ]
    );
    assert!(!state.summary.starts_with('\n'));
    assert_eq!(client.call_count(), 5);
    assert_eq!(outcome.failed_steps(), 0);
}

#[tokio::test]
async fn test_third_step_failure_does_not_abort() {
    let mut responses = stub_all();
    responses[2] = MockResponse::error(BackendError::ApiError {
        message: "upstream exploded".to_string(),
        status_code: Some(500),
    });
    let client = scripted_client(responses);

    let outcome = GenerationService::default()
        .run_with_client(client.clone(), request())
        .await
        .unwrap();

    let state = &outcome.state;
    assert_eq!(state.project_brief, "D");
    assert_eq!(state.product_context, "D");
    assert_eq!(state.active_context, "");
    assert_eq!(state.system_patterns, "D");
    assert_eq!(state.tech_context, "D");

    let error_lines: Vec<&str> = state
        .summary
        .lines()
        .filter(|l| l.contains("Error generating"))
        .collect();
    assert_eq!(error_lines, vec!["Active Context: Error generating active context"]);
    assert_eq!(state.summary.lines().count(), 5);

    let failed = &outcome.reports[2];
    assert_eq!(failed.status, StepStatus::Failed);
    assert_eq!(failed.failure.as_ref().map(|f| f.kind), Some(FailureKind::Backend));
    assert_eq!(client.call_count(), 5);
}

#[tokio::test]
async fn test_malformed_response_is_recorded_like_backend_failure() {
    let mut responses = stub_all();
    responses[0] = MockResponse::text("I'm sorry, I can't produce JSON today.");
    responses[4] = MockResponse::document("projectbrief", "S", "wrong key");
    let client = scripted_client(responses);

    let outcome = GenerationService::default()
        .run_with_client(client, request())
        .await
        .unwrap();

    let lines: Vec<&str> = outcome.state.summary.lines().collect();
    assert_eq!(lines[0], "Project Brief: Error generating project brief");
    assert_eq!(lines[4], "Tech Context: Error generating tech context");
    assert!(outcome.state.project_brief.is_empty());
    assert!(outcome.state.tech_context.is_empty());

    for index in [0, 4] {
        assert_eq!(
            outcome.reports[index].failure.as_ref().map(|f| f.kind),
            Some(FailureKind::Response)
        );
    }
}

#[tokio::test]
async fn test_bodies_with_code_blocks_are_kept() {
    let body = "## Setup\n```sh\nnpm install\n```\nThen run it.";
    let responses: Vec<MockResponse> = DocumentKind::ALL
        .iter()
        .map(|kind| MockResponse::document(kind.response_key(), "S", body))
        .collect();
    let client = scripted_client(responses);

    let outcome = GenerationService::default()
        .run_with_client(client, request())
        .await
        .unwrap();

    for kind in DocumentKind::ALL {
        assert_eq!(outcome.state.document(kind), body);
    }
    assert!(!outcome.state.summary.contains("Error generating"));
    assert_eq!(outcome.failed_steps(), 0);
}

#[tokio::test]
async fn test_later_steps_see_running_summary() {
    let client = scripted_client(vec![
        MockResponse::document("projectbrief", "Brief summary.", "B"),
        MockResponse::document("productcontext", "Product summary.", "P"),
        MockResponse::document("activecontext", "S", "D"),
        MockResponse::document("systempatterns", "S", "D"),
        MockResponse::document("techcontext", "S", "D"),
    ]);

    GenerationService::default()
        .run_with_client(client.clone(), request())
        .await
        .unwrap();

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 5);

    let first_user = &requests[0].messages[1];
    assert_eq!(first_user.role, MessageRole::User);
    assert!(first_user.content.contains("overview: \n"));
    assert!(first_user.content.contains("Idea: A recipe sharing site"));

    let third_user = &requests[2].messages[1].content;
    assert!(third_user.contains("overview: Project Brief: Brief summary.\nProduct Context: Product summary.\n"));

    for request in &requests {
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.temperature, Some(0.5));
    }
}

#[tokio::test]
async fn test_runs_are_idempotent_against_deterministic_stub() {
    let first = GenerationService::default()
        .run_with_client(scripted_client(stub_all()), request())
        .await
        .unwrap();
    let second = GenerationService::default()
        .run_with_client(scripted_client(stub_all()), request())
        .await
        .unwrap();

    assert_eq!(
        MemoryBank::from_state(&first.state),
        MemoryBank::from_state(&second.state)
    );
}

#[tokio::test]
async fn test_unsupported_provider_makes_no_calls() {
    let client = scripted_client(stub_all());
    let mut req = request();
    req.provider = "mistral-large:mistral".to_string();

    let err = GenerationService::default()
        .run_with_client(client.clone(), req)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Provider(ProviderError::Unsupported(ref id)) if id == "mistral"
    ));
    assert_eq!(client.call_count(), 0);
    assert_eq!(client.remaining_responses(), 5);
}

#[tokio::test]
async fn test_empty_inputs_pass_through() {
    let client = scripted_client(stub_all());
    let req = GenerationRequest::new("", "", "", "groq");

    let outcome = GenerationService::default()
        .run_with_client(client.clone(), req)
        .await
        .unwrap();

    assert_eq!(outcome.state.provider, "llama3-70b-8192:groq");
    let prompt = &client.recorded_requests()[0].messages[1].content;
    assert!(prompt.contains("Idea: \nTech Stack: \nFeatures: \n"));
}

#[tokio::test]
async fn test_api_key_not_exposed() {
    let client = scripted_client(stub_all());
    let req = request().with_api_key(memorybank::SecretString::new("sk-proj-topsecret"));

    let outcome = GenerationService::default()
        .run_with_client(client, req)
        .await
        .unwrap();

    assert_eq!(outcome.state.api_key.expose(), "sk-proj-topsecret");
    assert!(!format!("{:?}", outcome).contains("sk-proj-topsecret"));

    let report = memorybank::GenerationReport::from_outcome(&outcome);
    let json = serde_json::to_string(&report).unwrap();
    assert!(!json.contains("sk-proj-topsecret"));
    let state_json = serde_json::to_string(&outcome.state).unwrap();
    assert!(!state_json.contains("sk-proj-topsecret"));
}
