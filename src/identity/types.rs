//! Token request and response types shared by every [`TokenClient`](super::TokenClient).

use std::fmt;

use serde::Deserialize;

/// An OAuth access token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

/// How the provider is asked for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Show the consent screen.
    Consent,
    /// Reacquire silently for an already-consented user.
    None,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::Consent => write!(f, "consent"),
            Prompt::None => write!(f, "silent"),
        }
    }
}

/// What the provider hands back for one token request.
///
/// Mirrors the fields of an implicit-grant redirect; `error` is set when the
/// user denied consent or the provider refused the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    pub fn granted(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Default::default()
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            error: Some(reason.into()),
            ..Default::default()
        }
    }

    /// The token, or the provider's reason for not issuing one.
    pub fn into_result(self) -> Result<AccessToken, String> {
        if let Some(error) = self.error {
            return Err(error);
        }
        match self.access_token {
            Some(token) if !token.is_empty() => Ok(AccessToken(token)),
            _ => Err("missing_access_token".to_string()),
        }
    }
}
