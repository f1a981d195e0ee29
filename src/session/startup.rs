use tracing::error;

use super::readiness::{Readiness, ReadinessTracker};
use crate::config::DashboardConfig;
use crate::dashboard::DashboardView;
use crate::error::DashboardError;
use crate::identity::TerminalTokenClient;
use crate::sheets::SheetsClient;

/// Persistent page message when either client fails to come up.
pub const INIT_FAILED_MESSAGE: &str =
    "Failed to initialize the application. Please try again later.";

/// Brings both clients up concurrently and offers authorization once both are
/// ready. On failure the page keeps [`INIT_FAILED_MESSAGE`] and authorize
/// stays hidden.
pub async fn initialize_clients<V: DashboardView>(
    config: &DashboardConfig,
    sheets: &SheetsClient,
    tracker: &ReadinessTracker,
    view: &mut V,
) -> Result<TerminalTokenClient, DashboardError> {
    let (api, identity) = tokio::join!(
        async { sheets.init().await.map(|()| tracker.mark_api_client_ready()) },
        async {
            TerminalTokenClient::new(config)
                .map(|client| (client, tracker.mark_identity_client_ready()))
        },
    );

    match (api, identity) {
        (Ok(api_ready), Ok((identity, identity_ready))) => {
            if [api_ready, identity_ready].contains(&Readiness::BecameReady) {
                view.enable_authorize();
            }
            Ok(identity)
        }
        (Err(e), _) | (_, Err(e)) => {
            error!(error = %e, "client initialization failed");
            view.show_error(INIT_FAILED_MESSAGE);
            Err(e)
        }
    }
}
