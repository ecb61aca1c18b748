//! Meeting lifecycle endpoints: list, detail, create, join, order,
//! complete, and menu-item cancellation.

use anyhow::Result;

use moyeo_types::meeting::{
    CompleteSummary, Created, CreateMeetingRequest, JoinMeetingRequest, Meeting, MeetingDetail,
};

use super::Api;

/// Filters for `GET /meetings`.
#[derive(Debug, Clone, Default)]
pub struct MeetingQuery {
    pub campus: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl MeetingQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(campus) = &self.campus {
            params.push(("campus", campus.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(status) = &self.status {
            params.push(("status", status.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

impl Api {
    pub async fn list_meetings(&self, query: &MeetingQuery) -> Result<Vec<Meeting>> {
        self.expect_data(self.get("/meetings").query(&query.params()))
            .await
    }

    pub async fn meeting(&self, id: i64) -> Result<MeetingDetail> {
        self.expect_data(self.get(&format!("/meetings/{id}"))).await
    }

    /// Creates a meeting; returns the new meeting's id.
    pub async fn create_meeting(&self, request: &CreateMeetingRequest) -> Result<i64> {
        let created: Created = self.post_json("/meetings", request).await?;
        Ok(created.id)
    }

    /// Joins a meeting with the selected menu lines.
    pub async fn join_meeting(&self, id: i64, request: &JoinMeetingRequest) -> Result<()> {
        self.expect_ok(self.post(&format!("/meetings/{id}/join")).json(request))
            .await
    }

    /// Leader action: close recruiting and send the pooled order to the store.
    pub async fn process_order(&self, id: i64) -> Result<()> {
        self.expect_ok(self.post(&format!("/meetings/{id}/order")))
            .await
    }

    /// Leader action: mark the meeting completed; returns the per-person refund.
    pub async fn complete_meeting(&self, id: i64) -> Result<CompleteSummary> {
        self.expect_data(self.post(&format!("/meetings/{id}/complete")))
            .await
    }

    /// Cancels one of the caller's own menu lines before ordering.
    pub async fn cancel_order_item(&self, order_item_id: i64) -> Result<()> {
        self.expect_ok(self.delete(&format!("/meetings/order-items/{order_item_id}")))
            .await
    }
}
