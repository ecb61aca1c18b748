//! Auth endpoints: register and login.

use anyhow::Result;

use moyeo_types::user::{AuthResponse, LoginRequest, RegisterRequest};

use super::Api;

impl Api {
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.post_json("/auth/register", request).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.post_json("/auth/login", request).await
    }
}
