//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::AcceptConsent => "accept_consent",
        BackendCommand::DeclineConsent => "decline_consent",
        BackendCommand::Navigate { .. } => "navigate",
        BackendCommand::SetRole { .. } => "set_role",
        BackendCommand::TriggerMassAlert { .. } => "trigger_mass_alert",
        BackendCommand::ConfirmSafety => "confirm_safety",
        BackendCommand::SimulateInfrastructureFailure => "simulate_infrastructure_failure",
        BackendCommand::SimulateIsolationDecline => "simulate_isolation_decline",
        BackendCommand::RestoreCoherence => "restore_coherence",
        BackendCommand::CreateQuickOrder { .. } => "create_quick_order",
        BackendCommand::SubmitNeed { .. } => "submit_need",
        BackendCommand::ResetIntake => "reset_intake",
        BackendCommand::UpdateOrderStatus { .. } => "update_order_status",
        BackendCommand::ApproveOrder { .. } => "approve_order",
        BackendCommand::VerifyCredential { .. } => "verify_credential",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}
