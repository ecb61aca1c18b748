//! Cart lines selected while composing a join request.

use serde::{Deserialize, Serialize};

use crate::meeting::JoinMenuItem;

/// One selected menu item with its quantity.
///
/// Client-local state; becomes a [`JoinMenuItem`] on submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub menu_id: i64,
    pub menu_name: String,
    pub price: i64,
    pub quantity: u32,
    pub is_shared: bool,
}

impl CartItem {
    pub fn line_total(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }
}

impl From<&CartItem> for JoinMenuItem {
    fn from(item: &CartItem) -> Self {
        JoinMenuItem {
            menu_id: item.menu_id,
            quantity: item.quantity,
            is_shared: item.is_shared,
        }
    }
}
