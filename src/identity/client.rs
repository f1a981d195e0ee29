//! The identity seam: who holds the OAuth token and how a new one is obtained.
//!
//! [`TokenClient`] is what the session controller talks to. The
//! [`TerminalTokenClient`] implementation shows Google's consent URL and reads
//! the resulting token back from the terminal; revocation goes straight to
//! Google's revoke endpoint.

use console::{Style, Term};
use reqwest::{Client, Url};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::types::{AccessToken, Prompt, TokenResponse};
use crate::config::DashboardConfig;
use crate::error::DashboardError;

/// Holder of the session token.
///
/// `request_access_token` answers through a fresh one-shot channel per call,
/// so a response can only ever reach the request that asked for it.
pub trait TokenClient {
    fn token(&self) -> Option<AccessToken>;
    fn set_token(&mut self, token: AccessToken);
    fn clear_token(&mut self);
    fn request_access_token(&mut self, prompt: Prompt) -> oneshot::Receiver<TokenResponse>;
    /// Best-effort; the outcome is never reported back.
    fn revoke(&mut self, token: &AccessToken);
}

pub struct TerminalTokenClient {
    http: Client,
    consent_url: Url,
    revoke_url: String,
    token: Option<AccessToken>,
}

impl TerminalTokenClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let consent_url = Url::parse_with_params(
            &config.authorize_url,
            &[
                ("client_id", config.client_id.as_str()),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("response_type", "token"),
                ("scope", config.scope.as_str()),
                ("include_granted_scopes", "true"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| DashboardError::Config(format!("invalid authorize_url: {e}")))?;

        Ok(Self {
            http: Client::new(),
            consent_url,
            revoke_url: config.revoke_url.clone(),
            token: None,
        })
    }

    pub fn consent_url(&self) -> &Url {
        &self.consent_url
    }
}

impl TokenClient for TerminalTokenClient {
    fn token(&self) -> Option<AccessToken> {
        self.token.clone()
    }

    fn set_token(&mut self, token: AccessToken) {
        self.token = Some(token);
    }

    fn clear_token(&mut self) {
        self.token = None;
    }

    fn request_access_token(&mut self, prompt: Prompt) -> oneshot::Receiver<TokenResponse> {
        let (tx, rx) = oneshot::channel();
        match prompt {
            Prompt::None => {
                let response = match &self.token {
                    Some(token) => TokenResponse::granted(token.secret()),
                    None => TokenResponse::denied("interaction_required"),
                };
                let _ = tx.send(response);
            }
            Prompt::Consent => {
                let url = self.consent_url.to_string();
                tokio::task::spawn_blocking(move || {
                    let _ = tx.send(prompt_for_token(&url));
                });
            }
        }
        rx
    }

    fn revoke(&mut self, token: &AccessToken) {
        let request = self
            .http
            .post(&self.revoke_url)
            .form(&[("token", token.secret())]);
        tokio::spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => info!("token revoked"),
                Ok(response) => warn!(status = response.status().as_u16(), "token revocation rejected"),
                Err(e) => warn!(error = %e, "token revocation failed"),
            }
        });
    }
}

// Blocking: shows the consent URL and waits for the user to paste the result.
fn prompt_for_token(url: &str) -> TokenResponse {
    let term = Term::stderr();
    let bold = Style::new().bold();
    let _ = term.write_line(&format!(
        "{} Open this URL, grant access, then paste the redirected URL or the access token:",
        bold.apply_to("›")
    ));
    let _ = term.write_line(url);
    match term.read_line() {
        Ok(line) => parse_pasted_response(&line),
        Err(e) => {
            debug!(error = %e, "consent prompt could not read the terminal");
            TokenResponse::denied("popup_closed")
        }
    }
}

/// Accepts a bare token, or a redirect URL / fragment carrying
/// `access_token=…` or `error=…`. Blank input counts as a denial.
pub fn parse_pasted_response(input: &str) -> TokenResponse {
    let input = input.trim();
    if input.is_empty() {
        return TokenResponse::denied("access_denied");
    }
    if !input.contains("access_token=") && !input.contains("error=") {
        return TokenResponse::granted(input);
    }

    let params = input
        .rsplit_once('#')
        .or_else(|| input.rsplit_once('?'))
        .map_or(input, |(_, tail)| tail);

    let Ok(url) = Url::parse(&format!("http://localhost/?{params}")) else {
        return TokenResponse::denied("invalid_request");
    };

    let mut response = TokenResponse::default();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "access_token" => response.access_token = Some(value.into_owned()),
            "error" => response.error = Some(value.into_owned()),
            "expires_in" => response.expires_in = value.parse().ok(),
            "scope" => response.scope = Some(value.into_owned()),
            _ => {}
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TerminalTokenClient {
        let config = DashboardConfig {
            client_id: "client-1.apps.googleusercontent.com".into(),
            ..Default::default()
        };
        TerminalTokenClient::new(&config).unwrap()
    }

    #[test]
    fn consent_url_requests_implicit_grant() {
        let client = client();
        let pairs: Vec<(String, String)> = client
            .consent_url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("response_type".into(), "token".into())));
        assert!(pairs.contains(&("prompt".into(), "consent".into())));
        assert!(pairs.contains(&(
            "client_id".into(),
            "client-1.apps.googleusercontent.com".into()
        )));
    }

    #[test]
    fn invalid_authorize_url_is_config_error() {
        let config = DashboardConfig {
            authorize_url: "::nope".into(),
            ..Default::default()
        };
        assert!(matches!(
            TerminalTokenClient::new(&config),
            Err(DashboardError::Config(_))
        ));
    }

    #[tokio::test]
    async fn silent_request_without_token_needs_interaction() {
        let mut client = client();
        let response = client.request_access_token(Prompt::None).await.unwrap();
        assert_eq!(response, TokenResponse::denied("interaction_required"));
    }

    #[tokio::test]
    async fn silent_request_reissues_held_token() {
        let mut client = client();
        client.set_token(AccessToken::new("ya29.held"));
        let response = client.request_access_token(Prompt::None).await.unwrap();
        assert_eq!(response, TokenResponse::granted("ya29.held"));
    }

    #[test]
    fn clear_token_forgets_it() {
        let mut client = client();
        client.set_token(AccessToken::new("ya29.held"));
        client.clear_token();
        assert!(client.token().is_none());
    }

    #[test]
    fn pasted_bare_token() {
        assert_eq!(
            parse_pasted_response("  ya29.abc \n"),
            TokenResponse::granted("ya29.abc")
        );
    }

    #[test]
    fn pasted_blank_is_denial() {
        assert_eq!(
            parse_pasted_response("\n"),
            TokenResponse::denied("access_denied")
        );
    }

    #[test]
    fn pasted_redirect_url_with_token() {
        let response = parse_pasted_response(
            "http://localhost/#access_token=ya29.xyz&token_type=Bearer&expires_in=3599",
        );
        assert_eq!(response.access_token.as_deref(), Some("ya29.xyz"));
        assert_eq!(response.expires_in, Some(3599));
        assert!(response.error.is_none());
    }

    #[test]
    fn pasted_redirect_url_with_error() {
        let response = parse_pasted_response("http://localhost/?error=access_denied");
        assert_eq!(response.into_result(), Err("access_denied".to_string()));
    }

    #[test]
    fn pasted_redirect_values_are_percent_decoded() {
        let response = parse_pasted_response(
            "http://localhost/#access_token=ya29.a%2Fb&scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fspreadsheets.readonly+openid",
        );
        assert_eq!(response.access_token.as_deref(), Some("ya29.a/b"));
        assert_eq!(
            response.scope.as_deref(),
            Some("https://www.googleapis.com/auth/spreadsheets.readonly openid")
        );
    }

    #[test]
    fn pasted_bare_fragment_is_parsed() {
        let response = parse_pasted_response("access_token=ya29.q%3D%3D&expires_in=60");
        let token = response.into_result().unwrap();
        assert_eq!(token.secret(), "ya29.q==");
    }
}
