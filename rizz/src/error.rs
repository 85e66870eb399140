use rizz_auth::AuthError;
use thiserror::Error;

use crate::preferences::PreferencesError;

#[derive(Debug, Error)]
pub enum RizzError {
    #[error("Input must be at least {min} characters (got {actual})")]
    InputTooShort { min: usize, actual: usize },

    /// Free daily generations used up; the paywall takes over from here.
    #[error("Daily limit reached")]
    LimitReached,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}

impl RizzError {
    /// The session has lost its credentials and the user has to sign in again.
    pub fn is_logged_out(&self) -> bool {
        matches!(self, RizzError::Auth(e) if e.is_logged_out())
    }
}
