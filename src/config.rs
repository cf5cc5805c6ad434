// ⚙️ Configuration
// Loaded from EXPENSE_TRACKER_* environment variables, with defaults

use crate::currency::DEFAULT_RATES_URL;
use std::env;
use std::path::PathBuf;

const ENV_PREFIX: &str = "EXPENSE_TRACKER_";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite file holding the key-value store
    pub db_path: PathBuf,
    /// Base URL of the exchange-rate service
    pub rates_url: String,
    /// OCR executable
    pub tesseract: String,
    /// OCR language pack
    pub ocr_language: String,
    /// Listen address for the API server
    pub server_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from("expenses.db"),
            rates_url: DEFAULT_RATES_URL.to_string(),
            tesseract: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            server_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, suffix)).filter(|v| !v.trim().is_empty())
        };
        let defaults = Config::default();

        Config {
            db_path: var("DB").map(PathBuf::from).unwrap_or(defaults.db_path),
            rates_url: var("RATES_URL").unwrap_or(defaults.rates_url),
            tesseract: var("TESSERACT").unwrap_or(defaults.tesseract),
            ocr_language: var("OCR_LANG").unwrap_or(defaults.ocr_language),
            server_addr: var("ADDR").unwrap_or(defaults.server_addr),
        }
    }
}
