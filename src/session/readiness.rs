use tokio::sync::watch;
use tracing::{debug, info};

/// Initialization flags of the two external clients. Only ever go false → true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitState {
    pub api_client_ready: bool,
    pub identity_client_ready: bool,
}

impl InitState {
    pub fn both_ready(&self) -> bool {
        self.api_client_ready && self.identity_client_ready
    }
}

/// What a single mark did to overall readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Still waiting on the other client.
    Pending,
    /// This mark completed readiness. Returned exactly once per tracker.
    BecameReady,
    /// Both clients were already ready before this mark.
    AlreadyReady,
}

/// Tracks the two independently initializing clients.
///
/// Marks take `&self` so both initialization futures can share the tracker
/// while running concurrently. Arrival order does not matter.
pub struct ReadinessTracker {
    state: watch::Sender<InitState>,
}

impl Default for ReadinessTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessTracker {
    pub fn new() -> Self {
        let (state, _) = watch::channel(InitState::default());
        Self { state }
    }

    pub fn mark_api_client_ready(&self) -> Readiness {
        debug!("sheets client ready");
        self.mark(|state| &mut state.api_client_ready)
    }

    pub fn mark_identity_client_ready(&self) -> Readiness {
        debug!("identity client ready");
        self.mark(|state| &mut state.identity_client_ready)
    }

    pub fn state(&self) -> InitState {
        *self.state.borrow()
    }

    pub fn both_ready(&self) -> bool {
        self.state().both_ready()
    }

    fn mark(&self, flag: impl FnOnce(&mut InitState) -> &mut bool) -> Readiness {
        let mut readiness = Readiness::Pending;
        self.state.send_if_modified(|state| {
            let was_ready = state.both_ready();
            let slot = flag(state);
            let changed = !*slot;
            *slot = true;
            readiness = match (was_ready, state.both_ready()) {
                (true, _) => Readiness::AlreadyReady,
                (false, true) => Readiness::BecameReady,
                (false, false) => Readiness::Pending,
            };
            changed
        });
        if readiness == Readiness::BecameReady {
            info!("all clients initialized");
        }
        readiness
    }
}
