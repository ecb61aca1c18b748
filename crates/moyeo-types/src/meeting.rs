//! Meetings: group-order sessions led by one user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::order::OrderItem;
use crate::store::StoreCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Recruiting,
    Closed,
    Ordered,
    Cooking,
    Delivering,
    Delivered,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MeetingStatus::Recruiting => "recruiting",
            MeetingStatus::Closed => "closed",
            MeetingStatus::Ordered => "ordered",
            MeetingStatus::Cooking => "cooking",
            MeetingStatus::Delivering => "delivering",
            MeetingStatus::Delivered => "delivered",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiningType {
    /// Everyone orders their own menu items.
    Individual,
    /// The group shares one order.
    Together,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Instant,
    Reservation,
}

/// Meeting summary as listed by `GET /meetings`.
///
/// Includes fields joined in from the store and leader records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    pub leader_id: i64,
    pub store_id: i64,
    pub title: Option<String>,
    pub dining_type: DiningType,
    pub order_type: OrderType,
    pub pickup_location: String,
    pub meeting_location: Option<String>,
    pub min_members: u32,
    pub max_members: u32,
    pub delivery_fee: i64,
    pub allow_early_order: bool,
    pub deadline: DateTime<Utc>,
    pub description: Option<String>,
    pub status: MeetingStatus,
    pub campus: Option<String>,
    pub created_at: DateTime<Utc>,
    pub store_name: String,
    pub store_category: StoreCategory,
    pub store_thumbnail: Option<String>,
    pub current_members: u32,
    pub leader_nickname: String,
}

impl Meeting {
    /// Per-person delivery share shown when joining: the fee divided by the
    /// minimum member count, rounded up so the pool never under-collects.
    pub fn delivery_fee_share(&self) -> i64 {
        delivery_fee_share(self.delivery_fee, self.min_members)
    }
}

/// Ceiling division of a delivery fee across `min_members` people.
pub fn delivery_fee_share(delivery_fee: i64, min_members: u32) -> i64 {
    if min_members == 0 {
        return delivery_fee;
    }
    let members = i64::from(min_members);
    (delivery_fee + members - 1) / members
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingDetail {
    #[serde(flatten)]
    pub meeting: Meeting,
    pub min_order_amount: i64,
    pub members: Vec<MeetingMember>,
    #[serde(rename = "orderItems")]
    pub order_items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingMember {
    pub id: i64,
    pub meeting_id: i64,
    pub user_id: i64,
    pub is_leader: bool,
    pub joined_at: DateTime<Utc>,
    pub nickname: String,
    pub profile_image: Option<String>,
}

/// `POST /meetings` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingRequest {
    pub store_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub dining_type: DiningType,
    pub order_type: OrderType,
    pub pickup_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_location: Option<String>,
    pub min_members: u32,
    pub max_members: u32,
    pub delivery_fee: i64,
    pub allow_early_order: bool,
    pub deadline: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
}

/// One selected menu line inside a join request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinMenuItem {
    pub menu_id: i64,
    pub quantity: u32,
    pub is_shared: bool,
}

/// `POST /meetings/:id/join` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinMeetingRequest {
    pub menu_items: Vec<JoinMenuItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_used: Option<i64>,
}

/// Response of `POST /meetings` — the new meeting's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub id: i64,
}

/// Response of `POST /meetings/:id/complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSummary {
    pub refund_per_person: i64,
}
