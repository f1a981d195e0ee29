use std::fmt;

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::dashboard::table::{render_error, render_rows};
use crate::dashboard::{AUTHORIZE_LABEL, ChartSpec, DashboardView, REFRESH_LABEL};
use crate::error::DashboardError;
use crate::identity::{Prompt, TokenClient, TokenResponse};
use crate::sheets::{LoadError, RowSource};

/// Authorization lifecycle of the dashboard session.
///
/// Unauthenticated → Authorizing → Authenticated → (sign-out) → Unauthenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authorizing,
    Authenticated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            SessionState::Authorizing => write!(f, "AUTHORIZING"),
            SessionState::Authenticated => write!(f, "AUTHENTICATED"),
        }
    }
}

/// What a single data load did to the page.
#[derive(Debug)]
pub enum LoadOutcome {
    Rendered {
        rows: usize,
        charted: bool,
        loaded_at: DateTime<Utc>,
    },
    /// The table now shows a single error row; the chart was left as it was.
    Failed(LoadError),
}

/// Result of completing one authorization request.
#[derive(Debug)]
pub enum AuthOutcome {
    Authorized(LoadOutcome),
    Denied(String),
    /// The response belonged to a superseded request and was dropped.
    Stale,
}

/// An in-flight token request. Owns the only receiver for its response.
pub struct PendingAuthorization {
    id: u64,
    prompt: Prompt,
    response: oneshot::Receiver<TokenResponse>,
}

impl PendingAuthorization {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    /// Waits for the provider. A prompt that went away without answering
    /// counts as closed by the user.
    pub async fn response(self) -> (u64, TokenResponse) {
        let response = self
            .response
            .await
            .unwrap_or_else(|_| TokenResponse::denied("popup_closed"));
        (self.id, response)
    }
}

/// Sequences authorization, data loads and sign-out against the view.
pub struct SessionController<T, S, V> {
    identity: T,
    source: S,
    view: V,
    state: SessionState,
    // Id of the only request whose response may still change state.
    latest_request: u64,
}

impl<T, S, V> SessionController<T, S, V>
where
    T: TokenClient,
    S: RowSource,
    V: DashboardView,
{
    pub fn new(identity: T, source: S, view: V) -> Self {
        Self {
            identity,
            source,
            view,
            state: SessionState::Unauthenticated,
            latest_request: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn identity(&self) -> &T {
        &self.identity
    }

    /// Starts a token request: consent when no token is held, silent
    /// reacquisition otherwise. Supersedes any request still in flight.
    pub fn request_authorization(&mut self) -> PendingAuthorization {
        let prompt = if self.identity.token().is_some() {
            Prompt::None
        } else {
            Prompt::Consent
        };

        if self.state == SessionState::Authorizing {
            debug!(superseded = self.latest_request, "authorization already in flight");
        }
        self.latest_request += 1;
        self.state = SessionState::Authorizing;

        info!(request = self.latest_request, %prompt, "requesting access token");
        let response = self.identity.request_access_token(prompt);
        PendingAuthorization {
            id: self.latest_request,
            prompt,
            response,
        }
    }

    /// Applies the provider's answer for request `id`, loading data on success.
    pub async fn complete_authorization(&mut self, id: u64, response: TokenResponse) -> AuthOutcome {
        if id != self.latest_request {
            warn!(request = id, latest = self.latest_request, "ignoring stale token response");
            return AuthOutcome::Stale;
        }

        match response.into_result() {
            // A failed silent refresh also lands here. The held token, the
            // Refresh label and sign-out are left as they were.
            Err(reason) => {
                error!(request = id, %reason, "authorization failed");
                self.state = SessionState::Unauthenticated;
                let message = DashboardError::Authorization(reason.clone()).to_string();
                self.view.show_error(&message);
                AuthOutcome::Denied(reason)
            }
            Ok(token) => {
                info!(request = id, "authorization succeeded");
                self.identity.set_token(token);
                self.state = SessionState::Authenticated;
                self.view.set_signout_visible(true);
                self.view.set_authorize_label(REFRESH_LABEL);
                AuthOutcome::Authorized(self.load().await)
            }
        }
    }

    /// Request, wait, complete.
    pub async fn authorize(&mut self) -> AuthOutcome {
        let pending = self.request_authorization();
        let (id, response) = pending.response().await;
        self.complete_authorization(id, response).await
    }

    /// Revokes and forgets the token and resets the page. Returns `false`
    /// (and changes nothing) when no token is held.
    pub fn sign_out(&mut self) -> bool {
        let Some(token) = self.identity.token() else {
            debug!("sign-out without a token, nothing to do");
            return false;
        };

        self.identity.revoke(&token);
        self.identity.clear_token();
        // Answers to requests issued before sign-out must not log back in.
        self.latest_request += 1;
        self.state = SessionState::Unauthenticated;

        self.view.clear_content();
        self.view.set_authorize_label(AUTHORIZE_LABEL);
        self.view.set_signout_visible(false);
        info!("signed out");
        true
    }

    async fn load(&mut self) -> LoadOutcome {
        match self.source.load().await {
            Ok(dataset) => {
                self.view.set_table_body(render_rows(&dataset));
                let charted = match ChartSpec::from_dataset(&dataset) {
                    Some(chart) => {
                        self.view.draw_chart(chart);
                        true
                    }
                    None => {
                        warn!("not enough rows to draw the chart");
                        false
                    }
                };
                info!(rows = dataset.len(), charted, loaded_at = %dataset.loaded_at, "dashboard rendered");
                LoadOutcome::Rendered {
                    rows: dataset.len(),
                    charted,
                    loaded_at: dataset.loaded_at,
                }
            }
            Err(err) => {
                error!(error = %err, "failed to load sheet data");
                self.view.set_table_body(render_error(&err.to_string()));
                LoadOutcome::Failed(err)
            }
        }
    }
}
