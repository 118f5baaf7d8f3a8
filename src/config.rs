use log::info;

use crate::errors::{AppError, Result};
use crate::validation::ValidationRules;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Settings of the HTTP service.
///
/// Values come from a key lookup so the same code reads shuttle secrets in
/// deployment and plain environment variables elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Restrict `category` to the known list instead of free text.
    pub strict_categories: bool,
    /// Insert the sample catalog when the products table is empty.
    pub seed_on_startup: bool,
    /// Single origin allowed by CORS; any origin when unset.
    pub cors_allowed_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            strict_categories: true,
            seed_on_startup: false,
            cors_allowed_origin: None,
        }
    }
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let config = AppConfig {
            strict_categories: parse_flag(
                "STRICT_CATEGORIES",
                lookup("STRICT_CATEGORIES"),
                defaults.strict_categories,
            )?,
            seed_on_startup: parse_flag(
                "SEED_ON_STARTUP",
                lookup("SEED_ON_STARTUP"),
                defaults.seed_on_startup,
            )?,
            cors_allowed_origin: non_blank(lookup("CORS_ALLOWED_ORIGIN")),
        };
        info!("Configuración cargada: {:?}", config);
        Ok(config)
    }

    pub fn validation_rules(&self) -> ValidationRules {
        if self.strict_categories {
            ValidationRules::strict()
        } else {
            ValidationRules::free_text()
        }
    }
}

/// Settings of the terminal client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix for every request, used verbatim.
    pub api_url: String,
    /// Show the sample catalog when the API cannot be reached.
    pub sample_fallback: bool,
}

impl ClientConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(ClientConfig {
            api_url: non_blank(lookup("PRODUCT_API_URL"))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            sample_fallback: parse_flag("SAMPLE_FALLBACK", lookup("SAMPLE_FALLBACK"), true)?,
        })
    }

    /// Reads the environment after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(key: &str, value: Option<String>, default: bool) -> Result<bool> {
    let Some(value) = non_blank(value) else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "Valor no válido para {}: {}",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.validation_rules(), ValidationRules::strict());
    }

    #[test]
    fn reads_flags_and_origin() {
        let config = AppConfig::from_lookup(lookup(&[
            ("STRICT_CATEGORIES", "false"),
            ("SEED_ON_STARTUP", "YES"),
            ("CORS_ALLOWED_ORIGIN", " http://localhost:3000 "),
        ]))
        .unwrap();
        assert!(!config.strict_categories);
        assert!(config.seed_on_startup);
        assert_eq!(
            config.cors_allowed_origin.as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(config.validation_rules(), ValidationRules::free_text());
    }

    #[test]
    fn invalid_flag_is_a_config_error() {
        let err = AppConfig::from_lookup(lookup(&[("SEED_ON_STARTUP", "maybe")])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("SEED_ON_STARTUP")));
    }

    #[test]
    fn client_config_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.sample_fallback);

        let config = ClientConfig::from_lookup(lookup(&[
            ("PRODUCT_API_URL", "https://catalogo.example.com/api"),
            ("SAMPLE_FALLBACK", "0"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://catalogo.example.com/api");
        assert!(!config.sample_fallback);
    }
}
