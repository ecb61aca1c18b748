//! Notification endpoints.

use anyhow::Result;

use moyeo_types::notification::Notification;

use super::Api;

impl Api {
    pub async fn notifications(&self) -> Result<Vec<Notification>> {
        self.expect_data(self.get("/notifications")).await
    }

    pub async fn mark_notification_read(&self, id: i64) -> Result<()> {
        self.expect_ok(self.put(&format!("/notifications/{id}/read")))
            .await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<()> {
        self.expect_ok(self.put("/notifications/read-all")).await
    }
}
