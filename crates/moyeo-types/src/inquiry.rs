//! Customer-support inquiries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Answered,
}

impl InquiryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InquiryStatus::Pending => "pending",
            InquiryStatus::Answered => "answered",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub status: InquiryStatus,
    pub answer: Option<String>,
    pub answered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// `POST /inquiries` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInquiryRequest {
    pub title: String,
    pub content: String,
}
