pub mod base_url;
mod client;
pub mod endpoints;
mod error;
mod macros;
pub mod repositories;
mod request;

pub use crate::base_url::BaseUrls;
pub use crate::client::{APP_ID_HEADER, RawClient};
pub use crate::error::{ApiError, ErrorBody};
pub use crate::request::{ApiRequest, RequestData, Visibility};
pub use reqwest::{Method, StatusCode};
use repositories::*;

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn auth() -> AuthRepository {
        AuthRepository::new()
    }

    pub fn config() -> ConfigRepository {
        ConfigRepository::new()
    }

    pub fn rizz() -> RizzRepository {
        RizzRepository::new()
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
