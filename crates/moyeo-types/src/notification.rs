//! In-app notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Meeting,
    Order,
    Payment,
    Delivery,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub content: Option<String>,
    pub is_read: bool,
    /// Id of the meeting/order/... this notification points at, if any.
    pub reference_id: Option<i64>,
    pub reference_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
