//! Localized UI labels. Pure lookup; pt-BR and en-US are populated, every
//! other language code falls back to en-US.

use crate::domain::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStrings {
    pub app_name: &'static str,
    pub presence: &'static str,
    pub orientation: &'static str,
    pub survival: &'static str,
    pub coherence: &'static str,
    pub infrastructure: &'static str,
    pub ask_guide: &'static str,
    pub need_support: &'static str,
    pub privacy: &'static str,
    pub ai_warning: &'static str,
    pub consent_request: &'static str,
    pub consent_explain: &'static str,
    pub crisis_title: &'static str,
    pub crisis_desc: &'static str,
    pub mass_alert: &'static str,
    pub default_region: &'static str,
    pub official_source: &'static str,
}

const PT_BR: UiStrings = UiStrings {
    app_name: "VitaCare Global",
    presence: "Luiza está acompanhando.",
    orientation: "Orientação de Vida",
    survival: "Segurança Prioritária Ativa",
    coherence: "Coerência Humana Sustentada",
    infrastructure: "Infraestrutura de Apoio",
    ask_guide: "Consultar Luiza",
    need_support: "Necessidade Imediata",
    privacy: "Proteção Ética GUIDE Ativa",
    ai_warning: "Este sistema é uma infraestrutura de orientação ética. Luiza \
                 (orientada por guide) acompanha sua autonomia, nunca a substitui.",
    consent_request: "Pacto de Confiança",
    consent_explain: "Para que Luiza possa te orientar com segurança e dignidade, \
                      precisamos monitorar seu contexto de vida de forma ética.",
    crisis_title: "ORIENTAÇÃO DO GUIDE",
    crisis_desc: "Siga estes passos com calma. Sua proteção é nossa prioridade absoluta.",
    mass_alert: "URGÊNCIA SOCIETAL DETECTADA",
    default_region: "Sua região local",
    official_source: "Defesa Civil / Governo Central",
};

const EN_US: UiStrings = UiStrings {
    app_name: "VitaCare Global",
    presence: "Luiza is accompanying.",
    orientation: "Life Orientation",
    survival: "Priority Safety Active",
    coherence: "Sustained Human Coherence",
    infrastructure: "Support Infrastructure",
    ask_guide: "Consult Luiza",
    need_support: "Immediate Need",
    privacy: "GUIDE Ethical Protection Active",
    ai_warning: "This system is an ethical orientation infrastructure. Luiza \
                 (powered by guide) accompanies your autonomy, never replaces it.",
    consent_request: "Trust Pact",
    consent_explain: "For Luiza to guide you with safety and dignity, we need to \
                      ethically monitor your life context.",
    crisis_title: "GUIDE ORIENTATION",
    crisis_desc: "Follow these steps calmly. Your protection is our absolute priority.",
    mass_alert: "SOCIETAL URGENCY DETECTED",
    default_region: "Your local region",
    official_source: "Civil Defense / Central Government",
};

pub fn ui_strings(language: Language) -> &'static UiStrings {
    match language {
        Language::PtBr => &PT_BR,
        _ => &EN_US,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlocalized_languages_fall_back_to_english() {
        assert_eq!(ui_strings(Language::JaJp), ui_strings(Language::EnUs));
        assert_ne!(
            ui_strings(Language::PtBr).presence,
            ui_strings(Language::EnUs).presence
        );
    }
}
