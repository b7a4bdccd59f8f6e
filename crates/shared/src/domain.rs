use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generated per order; unique within a session (and, with v4 uuids, well
/// beyond it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Network,
    Infrastructure,
    Protection,
    Strategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Minimal,
    Balanced,
    Advanced,
}

/// Operating posture of the whole app. Independent from [`LifeState`]; any
/// combination of the two axes is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemMode {
    Normal,
    Crisis,
    Offline,
    Humanitarian,
}

/// Inferred wellbeing trajectory of the monitored person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeState {
    Stable,
    IsolationRisk,
    CognitiveTransition,
    CaregiverOverload,
    GriefSupport,
    UrbanVulnerability,
    MassAlert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterType {
    InfrastructureFailure,
    ClimateDisaster,
    PandemicIsolation,
    SocietalCollapse,
    Tsunami,
    Earthquake,
    Cyclone,
    Flood,
    Wildfire,
    Volcano,
    Blizzard,
    Heatwave,
    Epidemic,
    HumanitarianIsolation,
    OfficialAlert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    VitalLogistics,
    HealthReinforcement,
    DignifiedPresence,
    Orientation,
    Market,
    Pharmacy,
    Companionship,
    ProfessionalCare,
    Help,
}

impl ServiceCategory {
    /// Stable token used in prompts and descriptions; matches the serde
    /// representation.
    pub fn token(self) -> &'static str {
        match self {
            ServiceCategory::VitalLogistics => "vital_logistics",
            ServiceCategory::HealthReinforcement => "health_reinforcement",
            ServiceCategory::DignifiedPresence => "dignified_presence",
            ServiceCategory::Orientation => "orientation",
            ServiceCategory::Market => "market",
            ServiceCategory::Pharmacy => "pharmacy",
            ServiceCategory::Companionship => "companionship",
            ServiceCategory::ProfessionalCare => "professional_care",
            ServiceCategory::Help => "help",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Synchronizing,
    Organizing,
    ActiveCare,
    Sustained,
    Matching,
    Received,
    Delivered,
    Preparing,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Routine,
    Urgent,
    Emotional,
}

/// Urgency as classified by the advisory service for a free-text need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    /// High and critical needs escalate the created order.
    pub fn escalates(self) -> bool {
        matches!(self, UrgencyLevel::High | UrgencyLevel::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Health,
    Care,
    Support,
    Volunteer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    Validated,
    Pending,
    Rejected,
}

/// Navigation target for the normal (non-crisis) screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    Home,
    EasyOrder,
    Orders,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "ja-JP")]
    JaJp,
    #[serde(rename = "de-DE")]
    DeDe,
}

/// Static behavioural snapshot of the monitored person. All three numeric
/// metrics are bounded in 0..=100; construct through [`CareDigitalTwin::new`]
/// to keep them there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareDigitalTwin {
    pub last_known_mood: String,
    pub behavioral_pattern: String,
    pub vital_coherence: u8,
    pub social_density: u8,
    pub resilience_score: u8,
}

impl CareDigitalTwin {
    pub fn new(
        last_known_mood: impl Into<String>,
        behavioral_pattern: impl Into<String>,
        vital_coherence: u8,
        social_density: u8,
        resilience_score: u8,
    ) -> Self {
        Self {
            last_known_mood: last_known_mood.into(),
            behavioral_pattern: behavioral_pattern.into(),
            vital_coherence: vital_coherence.min(100),
            social_density: social_density.min(100),
            resilience_score: resilience_score.min(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustScores {
    pub trust: u8,
    pub stability: u8,
    pub social_engagement: u8,
    pub vulnerability: u8,
}

/// Orientation suggested by the advisory service for the current life state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationPath {
    pub primary_goal: String,
    pub immediate_steps: Vec<String>,
    pub network_signals: Vec<String>,
    pub ethical_justification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedProvider {
    pub name: String,
    pub provider_type: ProviderType,
    pub rating: f32,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub category: ServiceCategory,
    pub description: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub patient_name: String,
    pub family_approved: bool,
    pub urgency: Urgency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_provider: Option<MatchedProvider>,
}

/// Structured suggestion returned by the advisory service for a free-text
/// need. Field names match the external response contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiActionResponse {
    pub detected_need: ServiceCategory,
    pub urgency_level: UrgencyLevel,
    pub recommended_action: String,
    pub service_type: String,
    pub notify_family: bool,
    pub notify_provider: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialCheck {
    pub valid: bool,
}

/// Read-only context handed down to presentation and to the advisory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub language: Language,
    pub country: String,
    pub complexity: ComplexityLevel,
    pub mode: SystemMode,
    pub life_state: LifeState,
    pub twin: CareDigitalTwin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<OrientationPath>,
    pub scores: TrustScores,
}

impl UserContext {
    /// The two axes are independent; urgency is derived, never stored.
    pub fn is_urgent(&self) -> bool {
        self.mode == SystemMode::Crisis || self.life_state == LifeState::MassAlert
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterEvent {
    pub kind: DisasterType,
    pub location: String,
    pub guidance: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twin_metrics_are_clamped_to_100() {
        let twin = CareDigitalTwin::new("Balanced", "Routine Coherence", 250, 78, 101);
        assert_eq!(twin.vital_coherence, 100);
        assert_eq!(twin.social_density, 78);
        assert_eq!(twin.resilience_score, 100);
    }

    #[test]
    fn urgency_is_derived_from_either_axis() {
        let mut ctx = crate::mock::default_user_context();
        assert!(!ctx.is_urgent());
        ctx.mode = SystemMode::Crisis;
        assert!(ctx.is_urgent());
        ctx.mode = SystemMode::Normal;
        ctx.life_state = LifeState::MassAlert;
        assert!(ctx.is_urgent());
    }

    #[test]
    fn action_response_uses_external_field_names() {
        let raw = r#"{
            "detected_need": "companionship",
            "urgency_level": "critical",
            "recommended_action": "Call the family network",
            "service_type": "companion",
            "notify_family": true,
            "notify_provider": false,
            "explanation": "Silent isolation pattern detected."
        }"#;
        let parsed: AiActionResponse = serde_json::from_str(raw).expect("valid contract");
        assert_eq!(parsed.detected_need, ServiceCategory::Companionship);
        assert!(parsed.urgency_level.escalates());
    }

    #[test]
    fn language_codes_round_trip_as_bcp47() {
        let json = serde_json::to_string(&Language::PtBr).expect("serialize");
        assert_eq!(json, "\"pt-BR\"");
    }
}
