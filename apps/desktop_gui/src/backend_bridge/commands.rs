//! Backend commands queued from UI to backend worker.

use shared::domain::{ActiveView, OrderId, OrderStatus, ServiceCategory, UserRole};

pub enum BackendCommand {
    AcceptConsent,
    DeclineConsent,
    Navigate {
        view: ActiveView,
    },
    SetRole {
        role: UserRole,
    },
    TriggerMassAlert {
        raw_message: String,
    },
    ConfirmSafety,
    SimulateInfrastructureFailure,
    SimulateIsolationDecline,
    RestoreCoherence,
    CreateQuickOrder {
        category: ServiceCategory,
    },
    SubmitNeed {
        text: String,
    },
    ResetIntake,
    UpdateOrderStatus {
        id: OrderId,
        status: OrderStatus,
    },
    ApproveOrder {
        id: OrderId,
    },
    VerifyCredential {
        credential_id: String,
        country: String,
    },
}
