//! Dashboard configuration loaded from `sheetdash.toml`.
//!
//! The [`DashboardConfig`] struct carries the credentials and the fixed
//! request target. Values missing from the file fall back to defaults.
//! The `SHEETS_API_KEY`, `GOOGLE_CLIENT_ID` and `SPREADSHEET_ID` environment
//! variables take precedence over the file.

use anyhow::{Result, bail};
use serde::Deserialize;
use std::path::Path;

const CONFIG_FILE: &str = "sheetdash.toml";

/// Top-level configuration loaded from `sheetdash.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// API key appended to every Sheets request.
    #[serde(default)]
    pub api_key: String,

    /// OAuth client id used for the consent prompt.
    #[serde(default)]
    pub client_id: String,

    /// Spreadsheet to read.
    #[serde(default)]
    pub spreadsheet_id: String,

    /// A1-notation range fetched on every load.
    #[serde(default = "default_range")]
    pub range: String,

    /// OAuth scope requested at consent.
    #[serde(default = "default_scope")]
    pub scope: String,

    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,

    #[serde(default = "default_discovery_url")]
    pub discovery_url: String,

    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,

    #[serde(default = "default_revoke_url")]
    pub revoke_url: String,

    /// Where the provider sends the browser after consent.
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

fn default_range() -> String {
    "BD!A:AX".to_string()
}

fn default_scope() -> String {
    "https://www.googleapis.com/auth/spreadsheets.readonly".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com/v4/spreadsheets".to_string()
}

fn default_discovery_url() -> String {
    "https://sheets.googleapis.com/$discovery/rest?version=v4".to_string()
}

fn default_authorize_url() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

fn default_revoke_url() -> String {
    "https://oauth2.googleapis.com/revoke".to_string()
}

fn default_redirect_uri() -> String {
    "http://localhost".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            client_id: String::new(),
            spreadsheet_id: String::new(),
            range: default_range(),
            scope: default_scope(),
            sheets_base_url: default_sheets_base_url(),
            discovery_url: default_discovery_url(),
            authorize_url: default_authorize_url(),
            revoke_url: default_revoke_url(),
            redirect_uri: default_redirect_uri(),
        }
    }
}

impl DashboardConfig {
    /// Loads `sheetdash.toml` from the current directory, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<DashboardConfig>(&contents)?
        } else {
            Self::default()
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    // Non-empty environment values override whatever the file said.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let overrides = [
            ("SHEETS_API_KEY", &mut self.api_key),
            ("GOOGLE_CLIENT_ID", &mut self.client_id),
            ("SPREADSHEET_ID", &mut self.spreadsheet_id),
        ];
        for (name, slot) in overrides {
            if let Some(value) = lookup(name)
                && !value.is_empty()
            {
                *slot = value;
            }
        }
    }

    /// Fails when a credential needed to run the dashboard is missing.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("api_key", &self.api_key),
            ("client_id", &self.client_id),
            ("spreadsheet_id", &self.spreadsheet_id),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            bail!(
                "missing configuration: {} (set them in {CONFIG_FILE} or the environment)",
                missing.join(", ")
            );
        }
        Ok(())
    }

    /// Human-readable summary with secrets masked.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("api_key", mask(&self.api_key)),
            ("client_id", self.client_id.clone()),
            ("spreadsheet_id", self.spreadsheet_id.clone()),
            ("range", self.range.clone()),
            ("scope", self.scope.clone()),
            ("sheets_base_url", self.sheets_base_url.clone()),
            ("discovery_url", self.discovery_url.clone()),
        ]
    }
}

fn mask(secret: &str) -> String {
    match secret.chars().count() {
        0 => "(unset)".to_string(),
        n if n <= 4 => "****".to_string(),
        n => {
            let tail: String = secret.chars().skip(n - 4).collect();
            format!("****{tail}")
        }
    }
}
