//! Client for the external generative-AI orientation service.
//!
//! The transport lives behind the [`AdvisoryEngine`] capability so the session
//! controller never sees the external protocol: one production adapter speaks
//! HTTP ([`GeminiEngine`]), one deterministic adapter always fails
//! ([`MissingAdvisoryEngine`]), and the [`AdvisoryClient`] wrapper substitutes
//! a fixed calm fallback for every failure. No retries, no caching; at most
//! one external call per invocation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::domain::{
    AiActionResponse, CredentialCheck, OrientationPath, ServiceCategory, UrgencyLevel, UserContext,
};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Reasoning tier, used for orientation assessment and need classification.
pub const MODEL_PRO: &str = "gemini-3-pro-preview";
/// Fast tier, used for alert translation and credential format checks.
pub const MODEL_FLASH: &str = "gemini-3-flash-preview";

const GUIDE_SYSTEM_MANDATE: &str = "\
You are guide.
In the VitaCare interface, you identify as 'Luiza' to provide a human anchor.
You are a global orientation authority, not a chatbot.

CORE DIRECTIVES:
1. AMBER VISION: See the future to protect the present without breaking the human.
2. DETECT LIFE STATES: Focus on silent transitions (isolation, decline, network fatigue).
3. CALM AUTHORITY: Especially in CRISIS or COLLAPSE. Reduce panic.
4. TRANSLATE OFFICIALS: Turn complex alerts into simple, actionable orientation.
5. ETHICAL OATH: Prioritize dignity. Never manipulate. Value silence.

CONDUCT:
- speak calmly. use simple, clear language.
- orient, do not dictate.
- explain actions when they happen.
- allow human override always.
";

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("advisory transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("advisory response malformed: {0}")]
    MalformedResponse(String),
    #[error("advisory response contained no candidates")]
    EmptyCandidates,
    #[error("advisory engine unavailable")]
    Unavailable,
}

/// One prompt for the external text-generation endpoint. The response contract
/// is always "a single JSON object as text".
#[derive(Debug, Clone)]
pub struct AdvisoryPrompt {
    pub model: &'static str,
    pub system_instruction: String,
    pub contents: String,
}

#[async_trait]
pub trait AdvisoryEngine: Send + Sync {
    async fn generate(&self, prompt: AdvisoryPrompt) -> Result<String, AdvisoryError>;
}

/// Adapter used when no API key is configured (and in tests): every call
/// fails, which routes the caller onto the fallback path.
pub struct MissingAdvisoryEngine;

#[async_trait]
impl AdvisoryEngine for MissingAdvisoryEngine {
    async fn generate(&self, _prompt: AdvisoryPrompt) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::Unavailable)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: ContentBlock,
    contents: Vec<ContentBlock>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentBlock {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentBlock,
}

fn extract_candidate_text(response: GenerateContentResponse) -> Result<String, AdvisoryError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or(AdvisoryError::EmptyCandidates)
}

/// Production adapter: one POST per invocation against a Gemini-style
/// `generateContent` endpoint, JSON response mime type requested.
pub struct GeminiEngine {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiEngine {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl AdvisoryEngine for GeminiEngine {
    async fn generate(&self, prompt: AdvisoryPrompt) -> Result<String, AdvisoryError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, prompt.model
        );
        let body = GenerateContentRequest {
            system_instruction: ContentBlock {
                parts: vec![TextPart {
                    text: prompt.system_instruction,
                }],
            },
            contents: vec![ContentBlock {
                parts: vec![TextPart {
                    text: prompt.contents,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response: GenerateContentResponse = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        extract_candidate_text(response)
    }
}

#[derive(Debug, Deserialize)]
struct AlertSteps {
    steps: Vec<String>,
}

/// Typed, infallible surface consumed by the session controller. Each
/// operation performs at most one engine call and substitutes its documented
/// fallback on any failure; no error ever crosses this boundary.
pub struct AdvisoryClient {
    engine: Arc<dyn AdvisoryEngine>,
}

impl AdvisoryClient {
    pub fn new(engine: Arc<dyn AdvisoryEngine>) -> Self {
        Self { engine }
    }

    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::new(Arc::new(GeminiEngine::new(api_key)))
    }

    /// Fallback-only client for offline operation.
    pub fn offline() -> Self {
        Self::new(Arc::new(MissingAdvisoryEngine))
    }

    async fn generate_json<T: serde::de::DeserializeOwned>(
        &self,
        prompt: AdvisoryPrompt,
    ) -> Result<T, AdvisoryError> {
        let text = self.engine.generate(prompt).await?;
        serde_json::from_str(&text).map_err(|err| AdvisoryError::MalformedResponse(err.to_string()))
    }

    /// Determine whether a silent transition is occurring and what the
    /// orientation path should be.
    pub async fn assess_life_orientation(&self, context: &UserContext) -> OrientationPath {
        let prompt = AdvisoryPrompt {
            model: MODEL_PRO,
            system_instruction: format!(
                "{GUIDE_SYSTEM_MANDATE}\n\
                 ACT AS: guide Sentinel.\n\
                 TASK: Determine if there's a silent transition occurring and define the \
                 Orientation Path.\n\
                 Return a JSON object with keys: primary_goal (string), immediate_steps \
                 (array of strings), network_signals (array of strings), \
                 ethical_justification (string)."
            ),
            contents: format!(
                "Current Life State: {:?}. Behavioral Pattern: {}. Resilience: {}%.",
                context.life_state, context.twin.behavioral_pattern, context.twin.resilience_score
            ),
        };

        match self.generate_json(prompt).await {
            Ok(path) => path,
            Err(err) => {
                warn!("advisory: life orientation unavailable, using fallback: {err}");
                fallback_orientation()
            }
        }
    }

    /// Turn a raw official alert into short, calm guidance steps.
    pub async fn translate_official_alert(&self, raw_alert: &str) -> Vec<String> {
        let prompt = AdvisoryPrompt {
            model: MODEL_FLASH,
            system_instruction: format!(
                "{GUIDE_SYSTEM_MANDATE}\n\
                 TASK: Translate this complex/panic-inducing alert into 3 simple, calm, \
                 actionable orientation steps.\n\
                 Tone: \"⚠️ orientação do guide\".\n\
                 Return a JSON object: {{ \"steps\": [string] }}."
            ),
            contents: format!("Raw Official Alert: \"{raw_alert}\""),
        };

        match self.generate_json::<AlertSteps>(prompt).await {
            Ok(parsed) => parsed.steps,
            Err(err) => {
                warn!("advisory: alert translation unavailable, using fallback: {err}");
                fallback_alert_steps()
            }
        }
    }

    /// Classify a free-text need into the most dignified support path.
    pub async fn process_human_need(&self, input: &str, context: &UserContext) -> AiActionResponse {
        let prompt = AdvisoryPrompt {
            model: MODEL_PRO,
            system_instruction: format!(
                "{GUIDE_SYSTEM_MANDATE}\n\
                 TASK: Orient the user's need toward the most dignified and safe support path.\n\
                 Return a JSON object with keys: detected_need (one of vital_logistics, \
                 health_reinforcement, dignified_presence, orientation, market, pharmacy, \
                 companionship, professional_care, help), urgency_level (one of low, medium, \
                 high, critical), recommended_action (string), service_type (string), \
                 notify_family (bool), notify_provider (bool), explanation (string)."
            ),
            contents: format!(
                "User Input: \"{input}\" in context of Life State {:?}",
                context.life_state
            ),
        };

        match self.generate_json(prompt).await {
            Ok(action) => action,
            Err(err) => {
                warn!("advisory: need classification unavailable, using fallback: {err}");
                fallback_action_response()
            }
        }
    }

    /// Check whether a professional credential has a plausible format for the
    /// given country. Onboarding is never blocked by advisory outage, so the
    /// fallback accepts.
    pub async fn validate_professional_credential(
        &self,
        credential_id: &str,
        country: &str,
    ) -> CredentialCheck {
        let prompt = AdvisoryPrompt {
            model: MODEL_FLASH,
            system_instruction: "Validate health/care registration format. Return a JSON \
                                 object: { \"valid\": bool }."
                .to_string(),
            contents: format!("Credential: {credential_id}, Country: {country}. Is this format valid?"),
        };

        match self.generate_json(prompt).await {
            Ok(check) => check,
            Err(err) => {
                warn!("advisory: credential validation unavailable, accepting by fallback: {err}");
                CredentialCheck { valid: true }
            }
        }
    }
}

/// Calm generic orientation used whenever the assessment call fails.
pub fn fallback_orientation() -> OrientationPath {
    OrientationPath {
        primary_goal: "Preservar rotina de coerência".to_string(),
        immediate_steps: vec![
            "Hidratação".to_string(),
            "Verificar rede".to_string(),
            "Acompanhamento calmo".to_string(),
        ],
        network_signals: vec!["Sinal de estabilidade".to_string()],
        ethical_justification: "Orientação de segurança para manutenção da dignidade.".to_string(),
    }
}

/// Safe guidance used whenever alert translation fails; never empty.
pub fn fallback_alert_steps() -> Vec<String> {
    vec![
        "Mantenha a calma em casa".to_string(),
        "Verifique seus suprimentos básicos".to_string(),
        "Aguarde novo sinal do guide".to_string(),
    ]
}

/// Low-urgency companionship routing used whenever need classification fails.
pub fn fallback_action_response() -> AiActionResponse {
    AiActionResponse {
        detected_need: ServiceCategory::Help,
        urgency_level: UrgencyLevel::Low,
        recommended_action: "General orientation".to_string(),
        service_type: "companion".to_string(),
        notify_family: true,
        notify_provider: false,
        explanation: "Luiza está aqui para te ouvir. Vamos organizar sua orientação com calma."
            .to_string(),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
