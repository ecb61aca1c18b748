//! Store browsing endpoints.

use anyhow::Result;

use moyeo_types::store::{Store, StoreCategory, StoreDetail};

use super::Api;

/// Filters for `GET /stores`.
#[derive(Debug, Clone, Default)]
pub struct StoreQuery {
    pub category: Option<StoreCategory>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl StoreQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = self.category {
            params.push(("category", category.as_str().to_string()));
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
    pub async fn list_stores(&self, query: &StoreQuery) -> Result<Vec<Store>> {
        self.expect_data(self.get("/stores").query(&query.params()))
            .await
    }

    pub async fn store(&self, id: i64) -> Result<StoreDetail> {
        self.expect_data(self.get(&format!("/stores/{id}"))).await
    }
}
