use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const SERP_API_KEY_VAR: &str = "SERP_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub input_path: String,
    pub output_path: String,
    pub max_concurrent_companies: usize,
    pub search: SearchSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub ner: NerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub engine: String,
    pub location: String,
    pub google_domain: String,
    pub gl: String,
    pub hl: String,
    pub nfpr: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpSettings {
    pub timeout_secs: Option<u64>,
}

/// Entity recognizer selection: a local GLiNER model wins over a remote endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NerSettings {
    pub model_path: Option<String>,
    pub tokenizer_path: Option<String>,
    pub min_confidence: Option<f32>,
    pub endpoint: Option<String>,
}

impl HttpSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            base_url: "https://serpapi.com".to_string(),
            api_key: None,
            engine: "google".to_string(),
            location: "Austin, Texas, United States".to_string(),
            google_domain: "google.com".to_string(),
            gl: "us".to_string(),
            hl: "en".to_string(),
            nfpr: "1".to_string(),
        }
    }
}

/// Loads `.env`, then layers defaults, `configuration.yaml` and `APP__*` variables.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    _ = dotenvy::dotenv();

    let search = SearchSettings::default();
    let settings = Config::builder()
        .set_default("input_path", "companies.txt")?
        .set_default("output_path", "founders_output.json")?
        .set_default("max_concurrent_companies", 1)?
        .set_default("search.base_url", search.base_url)?
        .set_default("search.engine", search.engine)?
        .set_default("search.location", search.location)?
        .set_default("search.google_domain", search.google_domain)?
        .set_default("search.gl", search.gl)?
        .set_default("search.hl", search.hl)?
        .set_default("search.nfpr", search.nfpr)?
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut settings: Settings = settings.try_deserialize()?;
    if settings.search.api_key.is_none() {
        settings.search.api_key = std::env::var(SERP_API_KEY_VAR).ok();
    }
    settings.max_concurrent_companies = settings.max_concurrent_companies.max(1);

    Ok(settings)
}
