use super::*;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};
use tokio::net::TcpListener;

struct StubEngine {
    reply: Option<String>,
    calls: AtomicU32,
}

impl StubEngine {
    fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicU32::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdvisoryEngine for StubEngine {
    async fn generate(&self, _prompt: AdvisoryPrompt) -> Result<String, AdvisoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(AdvisoryError::Unavailable),
        }
    }
}

fn test_context() -> UserContext {
    shared::mock::default_user_context()
}

#[tokio::test]
async fn unavailable_engine_yields_orientation_fallback() {
    let client = AdvisoryClient::offline();
    let path = client.assess_life_orientation(&test_context()).await;
    assert_eq!(path, fallback_orientation());
    assert!(!path.immediate_steps.is_empty());
}

#[tokio::test]
async fn unavailable_engine_yields_alert_fallback() {
    let client = AdvisoryClient::offline();
    let steps = client.translate_official_alert("ALERTA: chuvas extremas").await;
    assert_eq!(steps, fallback_alert_steps());
    assert!(!steps.is_empty());
}

#[tokio::test]
async fn unavailable_engine_yields_need_fallback() {
    let client = AdvisoryClient::offline();
    let action = client
        .process_human_need("preciso de companhia", &test_context())
        .await;
    assert_eq!(action, fallback_action_response());
    assert_eq!(action.detected_need, ServiceCategory::Help);
    assert_eq!(action.urgency_level, UrgencyLevel::Low);
}

#[tokio::test]
async fn unavailable_engine_accepts_credentials() {
    let client = AdvisoryClient::offline();
    let check = client
        .validate_professional_credential("CRM-12345", "Brasil")
        .await;
    assert!(check.valid);
}

#[tokio::test]
async fn malformed_payload_yields_fallback_not_error() {
    let engine = Arc::new(StubEngine::replying("this is not json"));
    let client = AdvisoryClient::new(engine.clone());
    let path = client.assess_life_orientation(&test_context()).await;
    assert_eq!(path, fallback_orientation());
    assert_eq!(engine.call_count(), 1);
}

#[tokio::test]
async fn well_formed_orientation_is_parsed() {
    let engine = Arc::new(StubEngine::replying(
        r#"{
            "primary_goal": "Reinforce social contact",
            "immediate_steps": ["Call a neighbour", "Open the curtains"],
            "network_signals": ["Contact frequency dropping"],
            "ethical_justification": "Supports autonomy without pressure."
        }"#,
    ));
    let client = AdvisoryClient::new(engine);
    let path = client.assess_life_orientation(&test_context()).await;
    assert_eq!(path.primary_goal, "Reinforce social contact");
    assert_eq!(path.immediate_steps.len(), 2);
}

#[tokio::test]
async fn alert_steps_are_extracted_from_steps_object() {
    let engine = Arc::new(StubEngine::replying(
        r#"{ "steps": ["Stay home", "Check supplies", "Wait for the guide"] }"#,
    ));
    let client = AdvisoryClient::new(engine);
    let steps = client.translate_official_alert("OFFICIAL NOTICE LEVEL 3").await;
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0], "Stay home");
}

#[tokio::test]
async fn critical_need_classification_is_parsed() {
    let engine = Arc::new(StubEngine::replying(
        r#"{
            "detected_need": "health_reinforcement",
            "urgency_level": "critical",
            "recommended_action": "Dispatch professional care",
            "service_type": "nurse",
            "notify_family": true,
            "notify_provider": true,
            "explanation": "Possible fall reported."
        }"#,
    ));
    let client = AdvisoryClient::new(engine);
    let action = client.process_human_need("cai no banheiro", &test_context()).await;
    assert_eq!(action.detected_need, ServiceCategory::HealthReinforcement);
    assert!(action.urgency_level.escalates());
    assert!(action.notify_provider);
}

#[derive(Clone)]
struct ServerBehavior {
    status: StatusCode,
    body: serde_json::Value,
    hits: Arc<AtomicU32>,
}

async fn handle_generate(
    State(behavior): State<ServerBehavior>,
) -> (StatusCode, Json<serde_json::Value>) {
    behavior.hits.fetch_add(1, Ordering::SeqCst);
    (behavior.status, Json(behavior.body.clone()))
}

async fn spawn_stub_endpoint(behavior: ServerBehavior) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/v1beta/models/:model", post(handle_generate))
        .with_state(behavior);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn gemini_engine_extracts_first_candidate_text() {
    let hits = Arc::new(AtomicU32::new(0));
    let base_url = spawn_stub_endpoint(ServerBehavior {
        status: StatusCode::OK,
        body: serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"valid\": false}" }] }
            }]
        }),
        hits: hits.clone(),
    })
    .await;

    let engine = GeminiEngine::with_base_url(base_url, "test-key");
    let client = AdvisoryClient::new(Arc::new(engine));
    let check = client
        .validate_professional_credential("NOPE", "Brasil")
        .await;
    assert!(!check.valid);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn gemini_engine_http_failure_routes_to_fallback_with_single_call() {
    let hits = Arc::new(AtomicU32::new(0));
    let base_url = spawn_stub_endpoint(ServerBehavior {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: serde_json::json!({ "error": "boom" }),
        hits: hits.clone(),
    })
    .await;

    let engine = GeminiEngine::with_base_url(base_url, "test-key");
    let client = AdvisoryClient::new(Arc::new(engine));
    let path = client.assess_life_orientation(&test_context()).await;
    assert_eq!(path, fallback_orientation());
    // No retry: exactly one transport attempt per invocation.
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_candidates_yield_fallback() {
    let hits = Arc::new(AtomicU32::new(0));
    let base_url = spawn_stub_endpoint(ServerBehavior {
        status: StatusCode::OK,
        body: serde_json::json!({ "candidates": [] }),
        hits: hits.clone(),
    })
    .await;

    let engine = GeminiEngine::with_base_url(base_url, "test-key");
    let client = AdvisoryClient::new(Arc::new(engine));
    let steps = client.translate_official_alert("ALERTA").await;
    assert_eq!(steps, fallback_alert_steps());
}
