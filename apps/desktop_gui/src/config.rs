//! App settings: defaults, then `vitacare.toml`, then environment variables.

use std::{collections::HashMap, fs, path::PathBuf};

use shared::domain::Language;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub gemini_api_key: Option<String>,
    pub advisory_base_url: Option<String>,
    pub language: Language,
    pub refresh_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            gemini_api_key: None,
            advisory_base_url: None,
            language: Language::PtBr,
            refresh_interval_secs: 60,
        }
    }
}

fn default_database_url() -> String {
    dirs::data_dir()
        .map(|dir| {
            format!(
                "sqlite://{}",
                dir.join("vitacare")
                    .join("vitacare.db")
                    .display()
                    .to_string()
                    .replace('\\', "/")
            )
        })
        .unwrap_or_else(|| "sqlite://./data/vitacare.db".to_string())
}

pub fn load_settings(config_path: Option<&PathBuf>) -> Settings {
    let mut settings = Settings::default();

    let path = config_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("vitacare.toml"));
    if let Ok(raw) = fs::read_to_string(&path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            apply_file_settings(&mut settings, &file_cfg);
        }
    }

    if let Ok(v) = std::env::var("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Ok(v) = std::env::var("VITACARE__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Ok(v) = std::env::var("GEMINI_API_KEY") {
        settings.gemini_api_key = Some(v);
    }
    if let Ok(v) = std::env::var("VITACARE__GEMINI_API_KEY") {
        settings.gemini_api_key = Some(v);
    }

    if let Ok(v) = std::env::var("VITACARE__ADVISORY_BASE_URL") {
        settings.advisory_base_url = Some(v);
    }

    if let Ok(v) = std::env::var("VITACARE__LANGUAGE") {
        if let Some(language) = parse_language(&v) {
            settings.language = language;
        }
    }

    if let Ok(v) = std::env::var("VITACARE__REFRESH_INTERVAL_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.refresh_interval_secs = parsed.max(1);
        }
    }

    settings
}

fn apply_file_settings(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("database_url") {
        settings.database_url = v.clone();
    }
    if let Some(v) = file_cfg.get("gemini_api_key") {
        settings.gemini_api_key = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("advisory_base_url") {
        settings.advisory_base_url = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("language") {
        if let Some(language) = parse_language(v) {
            settings.language = language;
        }
    }
    if let Some(v) = file_cfg.get("refresh_interval_secs") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.refresh_interval_secs = parsed.max(1);
        }
    }
}

fn parse_language(raw: &str) -> Option<Language> {
    match raw {
        "pt-BR" => Some(Language::PtBr),
        "en-US" => Some(Language::EnUs),
        "es-ES" => Some(Language::EsEs),
        "ja-JP" => Some(Language::JaJp),
        "de-DE" => Some(Language::DeDe),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_settings_override_defaults() {
        let mut settings = Settings::default();
        let mut file_cfg = HashMap::new();
        file_cfg.insert("database_url".to_string(), "sqlite::memory:".to_string());
        file_cfg.insert("language".to_string(), "en-US".to_string());
        file_cfg.insert("refresh_interval_secs".to_string(), "120".to_string());

        apply_file_settings(&mut settings, &file_cfg);
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.language, Language::EnUs);
        assert_eq!(settings.refresh_interval_secs, 120);
    }

    #[test]
    fn unknown_language_codes_are_ignored() {
        assert_eq!(parse_language("xx-XX"), None);
        assert_eq!(parse_language("pt-BR"), Some(Language::PtBr));
    }
}
