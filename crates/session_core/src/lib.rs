//! Session controller: owns the single mutable application state and every
//! transition rule. Presentation emits intents, the controller mutates state
//! and/or consults the advisory client, and re-derives which screen is
//! visible. State is mutated only inside the named intent handlers; there is
//! no concurrent writer.

use std::{sync::Arc, time::Duration};

use advisory::AdvisoryClient;
use anyhow::Result;
use chrono::Utc;
use shared::{
    domain::{
        ActiveView, AiActionResponse, DisasterEvent, DisasterType, LifeState, Order, OrderId,
        OrderStatus, OrientationPath, ServiceCategory, SystemMode, Urgency, UrgencyLevel,
        UserContext, UserRole,
    },
    mock,
    strings::ui_strings,
};
use storage::Storage;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

/// Fixed stage delays of the order-intake sub-flow and the advisory refresh
/// period. Tests shrink these; production uses the defaults.
#[derive(Debug, Clone)]
pub struct SessionTuning {
    pub refresh_interval: Duration,
    /// ANALYZING -> MATCHING, free-text path.
    pub analyzing_delay: Duration,
    /// MATCHING -> RESULT, free-text path.
    pub matching_delay: Duration,
    /// MATCHING -> RESULT, quick-category path.
    pub quick_match_delay: Duration,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(60),
            analyzing_delay: Duration::from_millis(1200),
            matching_delay: Duration::from_millis(1500),
            quick_match_delay: Duration::from_millis(2000),
        }
    }
}

/// Stage of the order-intake sub-flow inside the easy-order view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakePhase {
    Idle,
    Analyzing,
    Matching,
    Result,
}

/// What the presentation layer must render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    CrisisOverlay,
    Home,
    EasyOrder,
    Orders,
    Profile,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    ConsentRequired,
    ConsentRecorded(bool),
    ViewChanged(ActiveView),
    RoleChanged(UserRole),
    ModeChanged {
        mode: SystemMode,
        life_state: LifeState,
    },
    DisasterDeclared(DisasterEvent),
    DisasterCleared,
    OrientationUpdated,
    IntakePhaseChanged(IntakePhase),
    OrderCreated(Order),
    OrderUpdated {
        id: OrderId,
        status: OrderStatus,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub active_role: UserRole,
    pub active_view: ActiveView,
    pub mode: SystemMode,
    pub life_state: LifeState,
    pub consent_given: bool,
    pub consent_prompt_open: bool,
    pub active_disaster: Option<DisasterEvent>,
    pub orientation: Option<OrientationPath>,
    pub orders: Vec<Order>,
    pub intake_phase: IntakePhase,
    pub intake_result: Option<AiActionResponse>,
    pub user: UserContext,
    pub patient_name: String,
}

impl SessionState {
    fn initial() -> Self {
        Self {
            active_role: UserRole::User,
            active_view: ActiveView::Home,
            mode: SystemMode::Normal,
            life_state: LifeState::Stable,
            consent_given: false,
            consent_prompt_open: false,
            active_disaster: None,
            orientation: None,
            orders: Vec::new(),
            intake_phase: IntakePhase::Idle,
            intake_result: None,
            user: mock::default_user_context(),
            patient_name: mock::ELDERLY_USER_NAME.to_string(),
        }
    }

    /// Read-only context handed to presentation and to the advisory service;
    /// recomposed on every read so the mode/life axes are never stale.
    pub fn user_context(&self) -> UserContext {
        let mut ctx = self.user.clone();
        ctx.mode = self.mode;
        ctx.life_state = self.life_state;
        ctx.orientation = self.orientation.clone();
        ctx
    }

    /// View-selection policy: an active disaster preempts everything for the
    /// primary end-user role; every other role keeps its dashboards.
    pub fn visible_screen(&self) -> Screen {
        if self.active_disaster.is_some() && self.active_role == UserRole::User {
            return Screen::CrisisOverlay;
        }
        match self.active_view {
            ActiveView::Home => Screen::Home,
            ActiveView::EasyOrder => Screen::EasyOrder,
            ActiveView::Orders => Screen::Orders,
            ActiveView::Profile => Screen::Profile,
        }
    }
}

pub struct SessionController {
    advisory: Arc<AdvisoryClient>,
    storage: Storage,
    tuning: SessionTuning,
    inner: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionController {
    pub fn new(advisory: Arc<AdvisoryClient>, storage: Storage, tuning: SessionTuning) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            advisory,
            storage,
            tuning,
            inner: Mutex::new(SessionState::initial()),
            events,
            refresh_task: Mutex::new(None),
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.lock().await.clone()
    }

    /// App start: read the consent flag once. Absence opens the prompt;
    /// a recorded grant enables the periodic advisory refresh.
    pub async fn start(self: &Arc<Self>) -> Result<()> {
        match self.storage.consent_granted().await? {
            None => {
                self.inner.lock().await.consent_prompt_open = true;
                let _ = self.events.send(SessionEvent::ConsentRequired);
                info!("session: no stored consent, opening trust pact prompt");
            }
            Some(true) => {
                self.inner.lock().await.consent_given = true;
                self.spawn_refresh_task().await;
                info!("session: stored consent found, advisory refresh enabled");
            }
            Some(false) => {
                debug!("session: consent previously declined, advisory refresh stays disabled");
            }
        }
        Ok(())
    }

    pub async fn accept_consent(self: &Arc<Self>) -> Result<()> {
        self.storage.record_consent().await?;
        {
            let mut state = self.inner.lock().await;
            state.consent_given = true;
            state.consent_prompt_open = false;
        }
        let _ = self.events.send(SessionEvent::ConsentRecorded(true));
        self.spawn_refresh_task().await;
        Ok(())
    }

    /// Declining closes the prompt but persists nothing; the refresh stays
    /// disabled for the whole session.
    pub async fn decline_consent(&self) {
        self.inner.lock().await.consent_prompt_open = false;
        let _ = self.events.send(SessionEvent::ConsentRecorded(false));
    }

    pub async fn navigate(&self, view: ActiveView) {
        self.inner.lock().await.active_view = view;
        let _ = self.events.send(SessionEvent::ViewChanged(view));
    }

    pub async fn set_role(&self, role: UserRole) {
        self.inner.lock().await.active_role = role;
        let _ = self.events.send(SessionEvent::RoleChanged(role));
    }

    /// Mass orientation alert: flip both axes to crisis immediately, then
    /// translate the raw official message into calm guidance. Repeated calls
    /// leave the axes unchanged but always issue a fresh translation.
    pub async fn trigger_mass_alert(self: &Arc<Self>, raw_message: &str) {
        let language = {
            let mut state = self.inner.lock().await;
            state.mode = SystemMode::Crisis;
            state.life_state = LifeState::MassAlert;
            state.user.language
        };
        let _ = self.events.send(SessionEvent::ModeChanged {
            mode: SystemMode::Crisis,
            life_state: LifeState::MassAlert,
        });
        // Advisory refresh must not compete with crisis-driven state.
        self.stop_refresh_task().await;

        info!("session: mass alert triggered, translating official message");
        let guidance = self.advisory.translate_official_alert(raw_message).await;
        let labels = ui_strings(language);
        let disaster = DisasterEvent {
            kind: DisasterType::OfficialAlert,
            location: labels.default_region.to_string(),
            guidance,
            official_source: Some(labels.official_source.to_string()),
            translated_by: Some("guide".to_string()),
        };
        self.inner.lock().await.active_disaster = Some(disaster.clone());
        let _ = self.events.send(SessionEvent::DisasterDeclared(disaster));
    }

    /// Clears the disaster and restores both axes, whatever the disaster type
    /// was. Calling without an active disaster is a no-op, not an error.
    pub async fn confirm_safety(self: &Arc<Self>) {
        let consented = {
            let mut state = self.inner.lock().await;
            if state.active_disaster.is_none() {
                debug!("session: confirm_safety without active disaster, ignoring");
                return;
            }
            state.active_disaster = None;
            state.mode = SystemMode::Normal;
            state.life_state = LifeState::Stable;
            state.consent_given
        };
        let _ = self.events.send(SessionEvent::DisasterCleared);
        let _ = self.events.send(SessionEvent::ModeChanged {
            mode: SystemMode::Normal,
            life_state: LifeState::Stable,
        });
        if consented {
            self.spawn_refresh_task().await;
        }
    }

    /// Debug action from the profile screen.
    pub async fn simulate_infrastructure_failure(&self) {
        let life_state = {
            let mut state = self.inner.lock().await;
            state.mode = SystemMode::Offline;
            state.life_state
        };
        let _ = self.events.send(SessionEvent::ModeChanged {
            mode: SystemMode::Offline,
            life_state,
        });
    }

    /// Debug action from the profile screen.
    pub async fn simulate_isolation_decline(&self) {
        let mode = {
            let mut state = self.inner.lock().await;
            state.life_state = LifeState::IsolationRisk;
            state.mode
        };
        let _ = self.events.send(SessionEvent::ModeChanged {
            mode,
            life_state: LifeState::IsolationRisk,
        });
    }

    /// Debug action: back to the calm baseline.
    pub async fn restore_coherence(self: &Arc<Self>) {
        let (had_disaster, consented) = {
            let mut state = self.inner.lock().await;
            let had_disaster = state.active_disaster.take().is_some();
            state.mode = SystemMode::Normal;
            state.life_state = LifeState::Stable;
            (had_disaster, state.consent_given)
        };
        if had_disaster {
            let _ = self.events.send(SessionEvent::DisasterCleared);
        }
        let _ = self.events.send(SessionEvent::ModeChanged {
            mode: SystemMode::Normal,
            life_state: LifeState::Stable,
        });
        if consented {
            self.spawn_refresh_task().await;
        }
    }

    /// Quick-category path of the order intake: fixed matching delay, then an
    /// order with a synthesized provider and a canned confirmation.
    pub async fn create_quick_order(&self, category: ServiceCategory) -> Order {
        self.set_intake_phase(IntakePhase::Matching).await;
        tokio::time::sleep(self.tuning.quick_match_delay).await;

        let provider = mock::matched_provider();
        let order = {
            let mut state = self.inner.lock().await;
            let order = Order {
                id: OrderId::generate(),
                category,
                description: format!("Necessidade de {}", category.token()),
                status: OrderStatus::Matching,
                created_at: Utc::now(),
                patient_name: state.patient_name.clone(),
                family_approved: false,
                urgency: if category == ServiceCategory::Companionship {
                    Urgency::Emotional
                } else {
                    Urgency::Routine
                },
                matched_provider: Some(provider.clone()),
            };
            state.orders.push(order.clone());
            state.intake_result = Some(AiActionResponse {
                detected_need: category,
                urgency_level: UrgencyLevel::Low,
                recommended_action: "Matching provider".to_string(),
                service_type: "provider_presential".to_string(),
                notify_family: true,
                notify_provider: true,
                explanation: format!(
                    "Oi Maria! Já encontrei a {} para te ajudar. Ela está a caminho e seu \
                     filho já autorizou.",
                    provider.name
                ),
            });
            state.intake_phase = IntakePhase::Result;
            order
        };
        let _ = self
            .events
            .send(SessionEvent::IntakePhaseChanged(IntakePhase::Result));
        let _ = self.events.send(SessionEvent::OrderCreated(order.clone()));
        order
    }

    /// Free-text path of the order intake: classify the need, then walk the
    /// staged matching delays. Blank input creates nothing.
    pub async fn submit_need(&self, free_text: &str) -> Option<Order> {
        let free_text = free_text.trim();
        if free_text.is_empty() {
            return None;
        }

        self.set_intake_phase(IntakePhase::Analyzing).await;
        let context = self.inner.lock().await.user_context();
        let action = self.advisory.process_human_need(free_text, &context).await;
        self.inner.lock().await.intake_result = Some(action.clone());

        tokio::time::sleep(self.tuning.analyzing_delay).await;
        self.set_intake_phase(IntakePhase::Matching).await;
        tokio::time::sleep(self.tuning.matching_delay).await;

        let order = {
            let mut state = self.inner.lock().await;
            let order = Order {
                id: OrderId::generate(),
                category: ServiceCategory::Help,
                description: free_text.to_string(),
                status: if action.notify_provider {
                    OrderStatus::Matching
                } else {
                    OrderStatus::Received
                },
                created_at: Utc::now(),
                patient_name: state.patient_name.clone(),
                family_approved: !action.notify_family,
                urgency: if action.urgency_level.escalates() {
                    Urgency::Urgent
                } else {
                    Urgency::Routine
                },
                matched_provider: None,
            };
            state.orders.push(order.clone());
            state.intake_phase = IntakePhase::Result;
            order
        };
        let _ = self
            .events
            .send(SessionEvent::IntakePhaseChanged(IntakePhase::Result));
        let _ = self.events.send(SessionEvent::OrderCreated(order.clone()));
        Some(order)
    }

    /// Leaving the easy-order view resets the sub-flow.
    pub async fn reset_intake(&self) {
        {
            let mut state = self.inner.lock().await;
            state.intake_phase = IntakePhase::Idle;
            state.intake_result = None;
        }
        let _ = self
            .events
            .send(SessionEvent::IntakePhaseChanged(IntakePhase::Idle));
    }

    /// Status-only mutation; legality of the progression is a UI convention,
    /// not enforced here.
    pub async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> bool {
        let updated = {
            let mut state = self.inner.lock().await;
            match state.orders.iter_mut().find(|order| order.id == id) {
                Some(order) => {
                    order.status = status;
                    true
                }
                None => false,
            }
        };
        if updated {
            let _ = self.events.send(SessionEvent::OrderUpdated { id, status });
        } else {
            warn!(order_id = %id, "session: status update for unknown order ignored");
        }
        updated
    }

    /// Family dashboard approval; the order itself is never deleted.
    pub async fn approve_order(&self, id: OrderId) -> bool {
        let approved = {
            let mut state = self.inner.lock().await;
            match state.orders.iter_mut().find(|order| order.id == id) {
                Some(order) => {
                    order.family_approved = true;
                    Some(order.status)
                }
                None => None,
            }
        };
        match approved {
            Some(status) => {
                let _ = self.events.send(SessionEvent::OrderUpdated { id, status });
                true
            }
            None => false,
        }
    }

    /// Provider onboarding: advisory-backed format check, never blocking.
    pub async fn verify_credential(&self, credential_id: &str, country: &str) -> bool {
        self.advisory
            .validate_professional_credential(credential_id, country)
            .await
            .valid
    }

    /// Whether the periodic advisory refresh task is currently installed.
    pub async fn refresh_active(&self) -> bool {
        self.refresh_task
            .lock()
            .await
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    async fn set_intake_phase(&self, phase: IntakePhase) {
        self.inner.lock().await.intake_phase = phase;
        let _ = self.events.send(SessionEvent::IntakePhaseChanged(phase));
    }

    /// One refresh: consult the advisory service and merge the orientation.
    /// Last write wins; there is no sequencing guard because only the latest
    /// orientation matters.
    async fn refresh_orientation(&self) {
        let context = {
            let state = self.inner.lock().await;
            if !state.consent_given || state.mode == SystemMode::Crisis {
                return;
            }
            state.user_context()
        };
        let orientation = self.advisory.assess_life_orientation(&context).await;
        self.inner.lock().await.orientation = Some(orientation);
        let _ = self.events.send(SessionEvent::OrientationUpdated);
    }

    /// (Re)installs the periodic refresh task. The handle is kept so teardown
    /// is deterministic instead of a fire-and-forget timer.
    async fn spawn_refresh_task(self: &Arc<Self>) {
        let controller = Arc::clone(self);
        let period = self.tuning.refresh_interval;
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick of a tokio interval completes immediately; the
            // refresh cadence starts one full period after installation.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                controller.refresh_orientation().await;
            }
        });

        let previous = self.refresh_task.lock().await.replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    async fn stop_refresh_task(&self) {
        if let Some(task) = self.refresh_task.lock().await.take() {
            task.abort();
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(task) = self.refresh_task.get_mut().take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
