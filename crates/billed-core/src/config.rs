//! Configuration module
//!
//! Client settings are read from the environment (a `.env` file is loaded
//! first when present) and validated before use.

use std::env;
use std::path::PathBuf;

use crate::error::BilledError;
use crate::models::Session;
use crate::validation::ALLOWED_RECEIPT_EXTENSIONS;

const DEFAULT_API_URL: &str = "http://localhost:5678";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings shared by the store adapters and the command-line client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout_secs: u64,
    /// Inline session JSON (`BILLED_USER`), preferred over `session_file`.
    pub session_json: Option<String>,
    pub session_file: Option<PathBuf>,
    pub receipt_extensions: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_json: None,
            session_file: None,
            receipt_extensions: ALLOWED_RECEIPT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("BILLED_API_URL")
            .or_else(|| lookup("API_URL"))
            .unwrap_or(defaults.api_url);

        let timeout_secs = match lookup("BILLED_API_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("BILLED_API_TIMEOUT_SECS must be a positive integer, got '{}'", raw)
            })?,
            None => defaults.timeout_secs,
        };

        let receipt_extensions = match lookup("BILLED_RECEIPT_EXTENSIONS") {
            Some(raw) => raw
                .split(',')
                .map(|ext| ext.trim().trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect(),
            None => defaults.receipt_extensions,
        };

        let config = Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout_secs,
            session_json: lookup("BILLED_USER").filter(|s| !s.trim().is_empty()),
            session_file: lookup("BILLED_SESSION_FILE").map(PathBuf::from),
            receipt_extensions,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "BILLED_API_URL must start with http:// or https://, got '{}'",
                self.api_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!("BILLED_API_TIMEOUT_SECS must be greater than 0"));
        }
        if self.receipt_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "BILLED_RECEIPT_EXTENSIONS must list at least one extension"
            ));
        }
        Ok(())
    }

    /// Resolve the signed-in session from `BILLED_USER` or `BILLED_SESSION_FILE`.
    pub fn load_session(&self) -> Result<Session, BilledError> {
        if let Some(json) = &self.session_json {
            return Session::from_json(json);
        }
        match &self.session_file {
            Some(path) => Session::from_file(path),
            None => Err(BilledError::Config(
                "No session configured. Set BILLED_USER or BILLED_SESSION_FILE".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_vars(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:5678");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.receipt_extensions, vec!["jpg", "jpeg", "png"]);
        assert!(config.session_file.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_vars(lookup_from(&[
            ("BILLED_API_URL", "https://api.billed.test/"),
            ("BILLED_API_TIMEOUT_SECS", "5"),
            ("BILLED_RECEIPT_EXTENSIONS", ".jpg, pdf"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://api.billed.test");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.receipt_extensions, vec!["jpg", "pdf"]);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ClientConfig::from_vars(lookup_from(&[("BILLED_API_URL", "ftp://x")])).is_err());
        assert!(
            ClientConfig::from_vars(lookup_from(&[("BILLED_API_TIMEOUT_SECS", "0")])).is_err()
        );
        assert!(
            ClientConfig::from_vars(lookup_from(&[("BILLED_API_TIMEOUT_SECS", "soon")])).is_err()
        );
        assert!(
            ClientConfig::from_vars(lookup_from(&[("BILLED_RECEIPT_EXTENSIONS", " , ")])).is_err()
        );
    }

    #[test]
    fn inline_session_wins_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type":"Admin","email":"admin@test.tld"}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = ClientConfig::from_vars(lookup_from(&[
            ("BILLED_USER", r#"{"type":"Employee","email":"employee@test.tld"}"#),
            ("BILLED_SESSION_FILE", path.as_str()),
        ]))
        .unwrap();
        let session = config.load_session().unwrap();
        assert_eq!(session.user_type, UserType::Employee);

        let config = ClientConfig::from_vars(lookup_from(&[("BILLED_SESSION_FILE", path.as_str())]))
            .unwrap();
        assert_eq!(config.load_session().unwrap().user_type, UserType::Admin);
    }

    #[test]
    fn missing_session_is_a_config_error() {
        let config = ClientConfig::default();
        assert!(matches!(config.load_session(), Err(BilledError::Config(_))));
    }
}
