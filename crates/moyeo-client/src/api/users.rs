//! Account and profile endpoints.

use anyhow::Result;
use serde_json::json;

use moyeo_types::order::Order;
use moyeo_types::user::{PublicUser, UpdateProfileRequest, UserProfile};

use super::Api;

impl Api {
    pub async fn profile(&self) -> Result<UserProfile> {
        self.expect_data(self.get("/users/me")).await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<()> {
        self.expect_ok(self.put("/users/me").json(request)).await
    }

    /// Deletes the account; requires the current password.
    pub async fn delete_account(&self, password: &str) -> Result<()> {
        self.expect_ok(self.delete("/users/me").json(&json!({ "password": password })))
            .await
    }

    pub async fn order_history(&self, page: u32, limit: u32) -> Result<Vec<Order>> {
        self.expect_data(
            self.get("/users/me/orders")
                .query(&[("page", page.to_string()), ("limit", limit.to_string())]),
        )
        .await
    }

    /// Public profile of another user.
    pub async fn public_profile(&self, id: i64) -> Result<PublicUser> {
        self.expect_data(self.get(&format!("/users/{id}"))).await
    }
}
