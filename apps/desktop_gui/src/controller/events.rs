//! UI/backend events and error modeling for the desktop GUI controller.

use session_core::{SessionEvent, SessionState};

pub enum UiEvent {
    BackendReady,
    Info(String),
    /// Full state snapshot; the UI replaces its copy wholesale.
    StateRefreshed(SessionState),
    Session(SessionEvent),
    CredentialChecked {
        valid: bool,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Storage,
    Advisory,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Consent,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("sqlite")
            || message_lower.contains("database")
            || message_lower.contains("persist")
            || message_lower.contains("setting")
        {
            UiErrorCategory::Storage
        } else if message_lower.contains("advisory")
            || message_lower.contains("gemini")
            || message_lower.contains("candidate")
        {
            UiErrorCategory::Advisory
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn classify_startup_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("failed to build backend runtime") {
        "Backend worker startup failure; verify local app environment and retry.".to_string()
    } else if lower.contains("sqlite") || lower.contains("database") {
        "Could not open the local settings database; check the data directory is writable."
            .to_string()
    } else {
        format!("Startup error: {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_failures_are_classified_as_storage() {
        let err = UiError::from_message(UiErrorContext::Consent, "sqlite ping failed");
        assert_eq!(err.category(), UiErrorCategory::Storage);
    }

    #[test]
    fn startup_failures_mention_the_data_directory() {
        let message = classify_startup_failure("database file locked");
        assert!(message.contains("data directory"));
    }
}
