use crate::endpoints::{
    auth::{Login, RefreshToken, Register},
    config::GetConfig,
    rizz::{GenerateRizz, GetStats, SelectResponse},
};

pub struct AuthRepository;

impl AuthRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn refresh(&self, refresh_token: impl Into<String>) -> RefreshToken {
        RefreshToken::new(refresh_token)
    }

    pub fn login(&self, email: impl Into<String>, password: impl Into<String>) -> Login {
        Login::new(email, password)
    }

    pub fn register(&self, email: impl Into<String>, password: impl Into<String>) -> Register {
        Register::new(email, password)
    }
}

pub struct ConfigRepository;

impl ConfigRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(&self) -> GetConfig {
        GetConfig
    }
}

pub struct RizzRepository;

impl RizzRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn generate(&self, input_text: impl Into<String>) -> GenerateRizz {
        GenerateRizz::new(input_text)
    }

    pub fn stats(&self) -> GetStats {
        GetStats
    }

    pub fn select(&self, response_id: impl Into<String>, selected_idx: u8) -> SelectResponse {
        SelectResponse::new(response_id, selected_idx)
    }
}
