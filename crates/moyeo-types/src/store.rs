//! Stores and menus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreCategory {
    Korean,
    Chinese,
    Japanese,
    Western,
    Chicken,
    Pizza,
    Burger,
    Snack,
    Dessert,
    Etc,
}

impl StoreCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreCategory::Korean => "korean",
            StoreCategory::Chinese => "chinese",
            StoreCategory::Japanese => "japanese",
            StoreCategory::Western => "western",
            StoreCategory::Chicken => "chicken",
            StoreCategory::Pizza => "pizza",
            StoreCategory::Burger => "burger",
            StoreCategory::Snack => "snack",
            StoreCategory::Dessert => "dessert",
            StoreCategory::Etc => "etc",
        }
    }
}

impl FromStr for StoreCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "korean" => Ok(StoreCategory::Korean),
            "chinese" => Ok(StoreCategory::Chinese),
            "japanese" => Ok(StoreCategory::Japanese),
            "western" => Ok(StoreCategory::Western),
            "chicken" => Ok(StoreCategory::Chicken),
            "pizza" => Ok(StoreCategory::Pizza),
            "burger" => Ok(StoreCategory::Burger),
            "snack" => Ok(StoreCategory::Snack),
            "dessert" => Ok(StoreCategory::Dessert),
            "etc" => Ok(StoreCategory::Etc),
            other => Err(format!("unknown store category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: StoreCategory,
    pub phone: Option<String>,
    pub address: String,
    /// Opening hours as "HH:MM" strings; display only.
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub closed_days: Option<String>,
    pub delivery_fee: i64,
    pub min_order_amount: i64,
    pub thumbnail: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Store record plus its menu board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDetail {
    #[serde(flatten)]
    pub store: Store,
    pub menus: Vec<Menu>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_available: bool,
}
