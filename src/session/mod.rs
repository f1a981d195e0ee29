mod controller;
mod readiness;
mod startup;

pub use controller::{AuthOutcome, LoadOutcome, PendingAuthorization, SessionController, SessionState};
pub use readiness::{InitState, Readiness, ReadinessTracker};
pub use startup::{INIT_FAILED_MESSAGE, initialize_clients};
