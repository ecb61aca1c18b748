//! Customer-support inquiry endpoints.

use anyhow::Result;

use moyeo_types::inquiry::{CreateInquiryRequest, Inquiry};

use super::Api;

impl Api {
    pub async fn create_inquiry(&self, title: &str, content: &str) -> Result<()> {
        self.expect_ok(self.post("/inquiries").json(&CreateInquiryRequest {
            title: title.to_string(),
            content: content.to_string(),
        }))
        .await
    }

    /// The caller's own inquiries.
    pub async fn my_inquiries(&self) -> Result<Vec<Inquiry>> {
        self.expect_data(self.get("/inquiries/my")).await
    }

    pub async fn inquiry(&self, id: i64) -> Result<Inquiry> {
        self.expect_data(self.get(&format!("/inquiries/{id}"))).await
    }
}
