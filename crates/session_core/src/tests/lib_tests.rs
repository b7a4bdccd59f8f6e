use super::*;

use std::{
    collections::HashSet,
    sync::atomic::{AtomicU32, Ordering},
};

use advisory::{AdvisoryEngine, AdvisoryError, AdvisoryPrompt};
use async_trait::async_trait;
use shared::domain::Language;

/// Deterministic engine: replays one canned payload, or fails when none is
/// configured, and counts how often it was consulted.
struct StubEngine {
    reply: Option<String>,
    calls: AtomicU32,
}

impl StubEngine {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicU32::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicU32::new(0),
        })
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdvisoryEngine for StubEngine {
    async fn generate(&self, _prompt: AdvisoryPrompt) -> Result<String, AdvisoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or(AdvisoryError::Unavailable)
    }
}

fn fast_tuning() -> SessionTuning {
    SessionTuning {
        refresh_interval: Duration::from_millis(25),
        analyzing_delay: Duration::from_millis(1),
        matching_delay: Duration::from_millis(1),
        quick_match_delay: Duration::from_millis(1),
    }
}

async fn controller_with(engine: Arc<StubEngine>) -> Arc<SessionController> {
    let advisory = Arc::new(AdvisoryClient::new(engine));
    let storage = Storage::new("sqlite::memory:").await.expect("open storage");
    SessionController::new(advisory, storage, fast_tuning())
}

const ORIENTATION_REPLY: &str = r#"{
    "primary_goal": "Reforçar vínculos",
    "immediate_steps": ["Ligar para a filha"],
    "network_signals": ["Rotina estável"],
    "ethical_justification": "Apoio sem intrusão."
}"#;

const ALERT_REPLY: &str = r#"{
    "steps": ["Fique em casa", "Feche as janelas", "Aguarde contato"]
}"#;

const CRITICAL_NEED_REPLY: &str = r#"{
    "detected_need": "health_reinforcement",
    "urgency_level": "critical",
    "recommended_action": "Dispatch professional care",
    "service_type": "provider_presential",
    "notify_family": true,
    "notify_provider": true,
    "explanation": "Queda detectada, ajuda a caminho."
}"#;

#[tokio::test]
async fn navigation_tracks_latest_view() {
    let controller = controller_with(StubEngine::failing()).await;
    controller.navigate(ActiveView::Orders).await;
    controller.navigate(ActiveView::Profile).await;

    let state = controller.snapshot().await;
    assert_eq!(state.active_view, ActiveView::Profile);
    assert_eq!(state.visible_screen(), Screen::Profile);
}

#[tokio::test]
async fn crisis_overlay_preempts_only_the_end_user_role() {
    let controller = controller_with(StubEngine::failing()).await;
    controller.navigate(ActiveView::Orders).await;
    controller.trigger_mass_alert("EVACUATE ZONE 4").await;

    let state = controller.snapshot().await;
    assert_eq!(state.visible_screen(), Screen::CrisisOverlay);

    controller.set_role(UserRole::Network).await;
    let state = controller.snapshot().await;
    assert_eq!(state.visible_screen(), Screen::Orders);
}

#[tokio::test]
async fn mass_alert_flips_both_axes_and_is_idempotent_on_them() {
    let engine = StubEngine::replying(ALERT_REPLY);
    let controller = controller_with(Arc::clone(&engine)).await;

    controller.trigger_mass_alert("flood warning").await;
    controller.trigger_mass_alert("flood warning update").await;

    let state = controller.snapshot().await;
    assert_eq!(state.mode, SystemMode::Crisis);
    assert_eq!(state.life_state, LifeState::MassAlert);
    // Axes converge, but every alert gets its own translation.
    assert_eq!(engine.call_count(), 2);
}

#[tokio::test]
async fn mass_alert_installs_an_official_disaster_event() {
    let engine = StubEngine::replying(ALERT_REPLY);
    let controller = controller_with(engine).await;
    controller.accept_consent().await.expect("consent");

    controller.trigger_mass_alert("DAM BREACH IMMINENT").await;

    let state = controller.snapshot().await;
    let disaster = state.active_disaster.expect("disaster installed");
    assert_eq!(disaster.kind, DisasterType::OfficialAlert);
    assert_eq!(disaster.guidance.len(), 3);
    assert_eq!(disaster.guidance[0], "Fique em casa");
    assert_eq!(
        disaster.location,
        ui_strings(Language::PtBr).default_region
    );
    assert_eq!(disaster.translated_by.as_deref(), Some("guide"));
    assert!(disaster.official_source.is_some());
}

#[tokio::test]
async fn alert_translation_failure_still_yields_guidance() {
    let controller = controller_with(StubEngine::failing()).await;
    controller.trigger_mass_alert("garbled ##data##").await;

    let state = controller.snapshot().await;
    let disaster = state.active_disaster.expect("disaster installed");
    assert!(!disaster.guidance.is_empty());
}

#[tokio::test]
async fn confirm_safety_restores_the_calm_baseline() {
    let engine = StubEngine::replying(ALERT_REPLY);
    let controller = controller_with(engine).await;

    controller.trigger_mass_alert("storm").await;
    controller.confirm_safety().await;

    let state = controller.snapshot().await;
    assert!(state.active_disaster.is_none());
    assert_eq!(state.mode, SystemMode::Normal);
    assert_eq!(state.life_state, LifeState::Stable);
    assert_eq!(state.visible_screen(), Screen::Home);
}

#[tokio::test]
async fn confirm_safety_without_disaster_changes_nothing() {
    let controller = controller_with(StubEngine::failing()).await;
    controller.simulate_infrastructure_failure().await;

    let before = controller.snapshot().await;
    controller.confirm_safety().await;
    let after = controller.snapshot().await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn fresh_storage_opens_the_consent_prompt() {
    let controller = controller_with(StubEngine::failing()).await;
    let mut events = controller.subscribe_events();

    controller.start().await.expect("start");

    let state = controller.snapshot().await;
    assert!(state.consent_prompt_open);
    assert!(!state.consent_given);
    assert!(matches!(
        events.recv().await.expect("event"),
        SessionEvent::ConsentRequired
    ));
}

#[tokio::test]
async fn declining_consent_keeps_the_refresh_disabled() {
    let engine = StubEngine::replying(ORIENTATION_REPLY);
    let controller = controller_with(Arc::clone(&engine)).await;

    controller.start().await.expect("start");
    controller.decline_consent().await;

    tokio::time::sleep(Duration::from_millis(120)).await;
    let state = controller.snapshot().await;
    assert!(!state.consent_prompt_open);
    assert!(state.orientation.is_none());
    assert_eq!(engine.call_count(), 0);
    assert!(!controller.refresh_active().await);
}

#[tokio::test]
async fn accepting_consent_starts_the_periodic_orientation_refresh() {
    let engine = StubEngine::replying(ORIENTATION_REPLY);
    let controller = controller_with(engine).await;

    controller.start().await.expect("start");
    controller.accept_consent().await.expect("consent");
    assert!(controller.refresh_active().await);

    tokio::time::sleep(Duration::from_millis(150)).await;
    let state = controller.snapshot().await;
    let orientation = state.orientation.expect("orientation refreshed");
    assert_eq!(orientation.primary_goal, "Reforçar vínculos");
}

#[tokio::test]
async fn stored_consent_resumes_the_refresh_on_start() {
    let engine = StubEngine::replying(ORIENTATION_REPLY);
    let advisory = Arc::new(AdvisoryClient::new(engine));
    let storage = Storage::new("sqlite::memory:").await.expect("open storage");
    storage.record_consent().await.expect("persist");

    let controller = SessionController::new(advisory, storage, fast_tuning());
    controller.start().await.expect("start");

    let state = controller.snapshot().await;
    assert!(state.consent_given);
    assert!(!state.consent_prompt_open);
    assert!(controller.refresh_active().await);
}

#[tokio::test]
async fn crisis_suspends_the_refresh_until_safety_is_confirmed() {
    let engine = StubEngine::replying(ORIENTATION_REPLY);
    let controller = controller_with(engine).await;
    controller.accept_consent().await.expect("consent");
    assert!(controller.refresh_active().await);

    controller.trigger_mass_alert("quake").await;
    assert!(!controller.refresh_active().await);

    controller.confirm_safety().await;
    assert!(controller.refresh_active().await);
}

#[tokio::test]
async fn quick_companionship_order_is_emotional_and_awaits_family() {
    let controller = controller_with(StubEngine::failing()).await;
    let order = controller
        .create_quick_order(ServiceCategory::Companionship)
        .await;

    assert_eq!(order.status, OrderStatus::Matching);
    assert_eq!(order.urgency, Urgency::Emotional);
    assert!(!order.family_approved);
    assert_eq!(
        order.matched_provider.expect("provider").name,
        "Dra. Helena"
    );

    let state = controller.snapshot().await;
    assert_eq!(state.orders.len(), 1);
    assert_eq!(state.intake_phase, IntakePhase::Result);
    let confirmation = state.intake_result.expect("confirmation");
    assert!(confirmation.explanation.contains("Dra. Helena"));
}

#[tokio::test]
async fn quick_pharmacy_order_stays_routine() {
    let controller = controller_with(StubEngine::failing()).await;
    let order = controller.create_quick_order(ServiceCategory::Pharmacy).await;

    assert_eq!(order.urgency, Urgency::Routine);
    assert_eq!(order.description, "Necessidade de pharmacy");
}

#[tokio::test]
async fn critical_need_escalates_and_routes_to_matching() {
    let controller = controller_with(StubEngine::replying(CRITICAL_NEED_REPLY)).await;
    let order = controller
        .submit_need("caí no banheiro e não consigo levantar")
        .await
        .expect("order created");

    assert_eq!(order.category, ServiceCategory::Help);
    assert_eq!(order.status, OrderStatus::Matching);
    assert_eq!(order.urgency, Urgency::Urgent);
    assert!(!order.family_approved);
    assert!(order.matched_provider.is_none());

    let state = controller.snapshot().await;
    assert_eq!(state.intake_phase, IntakePhase::Result);
    assert_eq!(
        state.intake_result.expect("classification").urgency_level,
        UrgencyLevel::Critical
    );
}

#[tokio::test]
async fn classification_failure_falls_back_to_a_calm_received_order() {
    let controller = controller_with(StubEngine::failing()).await;
    let order = controller
        .submit_need("queria companhia hoje")
        .await
        .expect("order created");

    // Fallback classification: routine, family notified, no provider dispatch.
    assert_eq!(order.status, OrderStatus::Received);
    assert_eq!(order.urgency, Urgency::Routine);
    assert!(!order.family_approved);
}

#[tokio::test]
async fn blank_need_creates_nothing() {
    let controller = controller_with(StubEngine::failing()).await;
    assert!(controller.submit_need("   ").await.is_none());

    let state = controller.snapshot().await;
    assert!(state.orders.is_empty());
    assert_eq!(state.intake_phase, IntakePhase::Idle);
}

#[tokio::test]
async fn reset_intake_clears_the_sub_flow() {
    let controller = controller_with(StubEngine::failing()).await;
    controller.create_quick_order(ServiceCategory::Market).await;
    controller.reset_intake().await;

    let state = controller.snapshot().await;
    assert_eq!(state.intake_phase, IntakePhase::Idle);
    assert!(state.intake_result.is_none());
    // The order itself survives the reset.
    assert_eq!(state.orders.len(), 1);
}

#[tokio::test]
async fn order_status_updates_by_id_and_ignores_unknown_ids() {
    let controller = controller_with(StubEngine::failing()).await;
    let order = controller.create_quick_order(ServiceCategory::Market).await;

    assert!(
        controller
            .update_order_status(order.id, OrderStatus::InProgress)
            .await
    );
    assert!(
        !controller
            .update_order_status(OrderId::generate(), OrderStatus::Completed)
            .await
    );

    let state = controller.snapshot().await;
    assert_eq!(state.orders[0].status, OrderStatus::InProgress);
}

#[tokio::test]
async fn family_approval_marks_the_order_without_touching_status() {
    let controller = controller_with(StubEngine::failing()).await;
    let order = controller
        .create_quick_order(ServiceCategory::Companionship)
        .await;

    assert!(controller.approve_order(order.id).await);
    assert!(!controller.approve_order(OrderId::generate()).await);

    let state = controller.snapshot().await;
    assert!(state.orders[0].family_approved);
    assert_eq!(state.orders[0].status, OrderStatus::Matching);
}

#[tokio::test]
async fn credential_check_accepts_when_the_service_is_down() {
    let controller = controller_with(StubEngine::failing()).await;
    assert!(controller.verify_credential("CRM-12345", "Brasil").await);
}

#[tokio::test]
async fn credential_check_honours_a_rejection() {
    let controller = controller_with(StubEngine::replying(r#"{"valid": false}"#)).await;
    assert!(!controller.verify_credential("???", "Brasil").await);
}

#[test]
fn order_ids_do_not_collide() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(OrderId::generate()));
    }
}
