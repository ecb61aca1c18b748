//! Orders placed on behalf of a meeting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::meeting::DiningType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
    Cooking,
    Cooked,
    Delivering,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Cooking => "cooking",
            OrderStatus::Cooked => "cooked",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Order summary as returned by the order-history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub meeting_id: i64,
    pub store_id: i64,
    pub total_amount: i64,
    pub delivery_fee: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub store_name: String,
    pub store_thumbnail: Option<String>,
    pub meeting_title: Option<String>,
    pub dining_type: DiningType,
}

/// One member's menu line within a meeting order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub user_id: i64,
    pub menu_id: i64,
    pub quantity: u32,
    pub price: i64,
    pub is_shared: bool,
    pub menu_name: String,
    pub orderer_nickname: String,
}
