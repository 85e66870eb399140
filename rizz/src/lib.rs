mod error;
pub mod logging;
pub mod preferences;
mod session;

pub use error::RizzError;
pub use preferences::{Preferences, PreferencesError, UserPreferences};
pub use session::{Session, MIN_INPUT_CHARS};

pub use rizz_api::endpoints::rizz::{Category, RizzResponse, RizzStats, Tone};
pub use rizz_auth::{AuthState, Settings};
