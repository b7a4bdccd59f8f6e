//! Backend worker: a dedicated thread owning a tokio runtime, the storage
//! handle, the advisory client, and the session controller. Commands arrive
//! over a crossbeam channel from the egui thread; every resulting session
//! event goes back as a fresh full snapshot.

use std::{sync::Arc, thread, time::Duration};

use advisory::{AdvisoryClient, AdvisoryEngine, GeminiEngine, MissingAdvisoryEngine};
use crossbeam_channel::{Receiver, Sender};
use session_core::{SessionController, SessionTuning};
use storage::Storage;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn spawn_backend_thread(
    settings: Settings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let storage = match Storage::new(&settings.database_url).await {
                Ok(storage) => storage,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("failed to open sqlite settings database: {err}"),
                    )));
                    tracing::error!("failed to open settings database: {err}");
                    return;
                }
            };

            let engine: Arc<dyn AdvisoryEngine> = match settings.gemini_api_key.as_deref() {
                Some(api_key) => match settings.advisory_base_url.as_deref() {
                    Some(base_url) => Arc::new(GeminiEngine::with_base_url(base_url, api_key)),
                    None => Arc::new(GeminiEngine::new(api_key)),
                },
                None => {
                    tracing::warn!("no gemini api key configured; advisory runs on fallbacks");
                    Arc::new(MissingAdvisoryEngine)
                }
            };
            let advisory = Arc::new(AdvisoryClient::new(engine));

            let tuning = SessionTuning {
                refresh_interval: Duration::from_secs(settings.refresh_interval_secs),
                ..SessionTuning::default()
            };
            let controller = SessionController::new(advisory, storage, tuning);

            // Forward every session event plus a fresh snapshot so the UI
            // never reconstructs state incrementally.
            let mut events = controller.subscribe_events();
            let event_controller = Arc::clone(&controller);
            let event_tx = ui_tx.clone();
            let event_task = tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    let _ = event_tx.try_send(UiEvent::Session(event));
                    let snapshot = event_controller.snapshot().await;
                    let _ = event_tx.try_send(UiEvent::StateRefreshed(snapshot));
                }
            });

            if let Err(err) = controller.start().await {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::Consent,
                    format!("failed to read consent flag: {err}"),
                )));
            }
            let _ = ui_tx.try_send(UiEvent::BackendReady);
            let _ = ui_tx.try_send(UiEvent::StateRefreshed(controller.snapshot().await));

            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(&controller, &ui_tx, cmd).await;
            }

            event_task.abort();
        });
    });
}

/// Staged intake flows and alert translation run as their own tasks so the
/// command loop stays responsive while they sleep through their delays.
async fn handle_command(
    controller: &Arc<SessionController>,
    ui_tx: &Sender<UiEvent>,
    cmd: BackendCommand,
) {
    match cmd {
        BackendCommand::AcceptConsent => {
            if let Err(err) = controller.accept_consent().await {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::Consent,
                    format!("failed to persist consent: {err}"),
                )));
            }
        }
        BackendCommand::DeclineConsent => controller.decline_consent().await,
        BackendCommand::Navigate { view } => controller.navigate(view).await,
        BackendCommand::SetRole { role } => controller.set_role(role).await,
        BackendCommand::TriggerMassAlert { raw_message } => {
            let controller = Arc::clone(controller);
            tokio::spawn(async move {
                controller.trigger_mass_alert(&raw_message).await;
            });
        }
        BackendCommand::ConfirmSafety => controller.confirm_safety().await,
        BackendCommand::SimulateInfrastructureFailure => {
            controller.simulate_infrastructure_failure().await
        }
        BackendCommand::SimulateIsolationDecline => {
            controller.simulate_isolation_decline().await
        }
        BackendCommand::RestoreCoherence => controller.restore_coherence().await,
        BackendCommand::CreateQuickOrder { category } => {
            let controller = Arc::clone(controller);
            tokio::spawn(async move {
                controller.create_quick_order(category).await;
            });
        }
        BackendCommand::SubmitNeed { text } => {
            let controller = Arc::clone(controller);
            tokio::spawn(async move {
                controller.submit_need(&text).await;
            });
        }
        BackendCommand::ResetIntake => controller.reset_intake().await,
        BackendCommand::UpdateOrderStatus { id, status } => {
            controller.update_order_status(id, status).await;
        }
        BackendCommand::ApproveOrder { id } => {
            controller.approve_order(id).await;
        }
        BackendCommand::VerifyCredential {
            credential_id,
            country,
        } => {
            let controller = Arc::clone(controller);
            let ui_tx = ui_tx.clone();
            tokio::spawn(async move {
                let valid = controller.verify_credential(&credential_id, &country).await;
                let _ = ui_tx.try_send(UiEvent::CredentialChecked { valid });
            });
        }
    }
}
