//! Seed data for the mock deployment: the monitored elderly user, the
//! synthesized provider used by quick matching, and the territory roster shown
//! on the public dashboards.

use crate::domain::{
    CareDigitalTwin, ComplexityLevel, DisasterType, Language, LifeState, MatchedProvider,
    ProviderType, RiskLevel, SystemMode, TrustScores, UserContext,
};

pub const ELDERLY_USER_NAME: &str = "Maria Silva";
pub const ELDERLY_USER_ID: &str = "VITA-G-001";
pub const ELDERLY_USER_COUNTRY: &str = "Brasil";
pub const ELDERLY_USER_LANGUAGE: Language = Language::PtBr;
pub const ELDERLY_USER_COMPLEXITY: ComplexityLevel = ComplexityLevel::Balanced;

pub fn default_twin() -> CareDigitalTwin {
    CareDigitalTwin::new("Balanced", "Routine Coherence", 94, 78, 90)
}

pub fn default_scores() -> TrustScores {
    TrustScores {
        trust: 98,
        stability: 92,
        social_engagement: 76,
        vulnerability: 8,
    }
}

pub fn default_user_context() -> UserContext {
    UserContext {
        language: ELDERLY_USER_LANGUAGE,
        country: ELDERLY_USER_COUNTRY.to_string(),
        complexity: ELDERLY_USER_COMPLEXITY,
        mode: SystemMode::Normal,
        life_state: LifeState::Stable,
        twin: default_twin(),
        orientation: None,
        scores: default_scores(),
    }
}

/// Provider synthesized for quick-category matches.
pub fn matched_provider() -> MatchedProvider {
    MatchedProvider {
        name: "Dra. Helena".to_string(),
        provider_type: ProviderType::Health,
        rating: 4.9,
        avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=Helena".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritoryResident {
    pub id: &'static str,
    pub name: &'static str,
    pub risk: RiskLevel,
}

pub const MOCK_TERRITORY: &[TerritoryResident] = &[
    TerritoryResident {
        id: "VITA-G-001",
        name: "Maria Silva",
        risk: RiskLevel::Low,
    },
    TerritoryResident {
        id: "VITA-G-002",
        name: "João Souza",
        risk: RiskLevel::Medium,
    },
    TerritoryResident {
        id: "VITA-G-003",
        name: "Ana Oliveira",
        risk: RiskLevel::Critical,
    },
];

pub fn disaster_label(kind: DisasterType) -> &'static str {
    match kind {
        DisasterType::Tsunami => "Alerta de Tsunami",
        DisasterType::Earthquake => "Evento Sísmico",
        DisasterType::Cyclone => "Tempestade Severa",
        DisasterType::Flood => "Inundação na Área",
        DisasterType::Wildfire => "Incêndio em Proximidade",
        DisasterType::Volcano => "Atividade Vulcânica",
        DisasterType::Blizzard => "Condição de Nevasca",
        DisasterType::Heatwave => "Onda de Calor Extremo",
        DisasterType::Epidemic => "Protocolo Sanitário",
        DisasterType::HumanitarianIsolation => "Apoio em Isolamento",
        DisasterType::InfrastructureFailure => "Falha de Infraestrutura",
        DisasterType::ClimateDisaster => "Evento Climático Extremo",
        DisasterType::PandemicIsolation => "Isolamento Sanitário",
        DisasterType::SocietalCollapse => "Ruptura Societal",
        DisasterType::OfficialAlert => "ORIENTAÇÃO OFICIAL",
    }
}
