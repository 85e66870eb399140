use rizz_api::ApiError;
use std::collections::VecDeque;
use std::sync::Mutex;
use thiserror::Error;
use tokio::sync::oneshot;

/// Why a credential refresh did not produce a new access token.
///
/// Cloned out to every request that was waiting on the same refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("no refresh token available")]
    MissingRefreshToken,

    #[error("refresh rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("refresh request failed: {0}")]
    Transport(String),

    #[error("invalid refresh response: {0}")]
    InvalidResponse(String),

    #[error("could not persist refreshed credentials: {0}")]
    Storage(String),

    /// The task driving the refresh went away before finishing.
    #[error("refresh abandoned before completion")]
    Abandoned,
}

impl From<ApiError> for RefreshError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { status, body } => RefreshError::Rejected {
                status: status.as_u16(),
                body,
            },
            ApiError::Transport(e) => RefreshError::Transport(e.to_string()),
            e => RefreshError::InvalidResponse(e.to_string()),
        }
    }
}

pub(crate) type RefreshOutcome = Result<String, RefreshError>;

/// Single-flight bookkeeping for one client: the in-flight flag and the
/// requests parked behind it, in arrival order.
#[derive(Default)]
pub(crate) struct RefreshState {
    refreshing: bool,
    waiters: VecDeque<oneshot::Sender<RefreshOutcome>>,
}

pub(crate) enum Turn {
    /// This caller performs the refresh.
    Lead,
    /// A refresh is already running; wait for its outcome.
    Wait(oneshot::Receiver<RefreshOutcome>),
}

impl RefreshState {
    pub fn join(&mut self) -> Turn {
        if self.refreshing {
            let (tx, rx) = oneshot::channel();
            self.waiters.push_back(tx);
            Turn::Wait(rx)
        } else {
            self.refreshing = true;
            Turn::Lead
        }
    }

    fn finish(&mut self) -> VecDeque<oneshot::Sender<RefreshOutcome>> {
        self.refreshing = false;
        std::mem::take(&mut self.waiters)
    }

    #[cfg(test)]
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    #[cfg(test)]
    pub fn waiting(&self) -> usize {
        self.waiters.len()
    }
}

/// Held by the leader for the duration of a refresh.
///
/// Completing it releases every waiter with the outcome; dropping it without
/// completing (the leader's future was cancelled) releases them with
/// [`RefreshError::Abandoned`]. Either way the in-flight flag is cleared.
pub(crate) struct RefreshGuard<'a> {
    state: Option<&'a Mutex<RefreshState>>,
}

impl<'a> RefreshGuard<'a> {
    pub fn new(state: &'a Mutex<RefreshState>) -> Self {
        Self { state: Some(state) }
    }

    pub fn complete(mut self, outcome: &RefreshOutcome) {
        self.release(outcome);
    }

    fn release(&mut self, outcome: &RefreshOutcome) {
        let Some(state) = self.state.take() else {
            return;
        };

        // lock released before anyone is woken
        let waiters = state.lock().unwrap().finish();
        if !waiters.is_empty() {
            tracing::debug!(waiters = waiters.len(), "Releasing queued requests");
        }
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.release(&Err(RefreshError::Abandoned));
    }
}
