//! Cart aggregator for a pending join request.
//!
//! Lines are merged by menu id; totals are recomputed on demand and never
//! cached. No availability or stock validation happens here — the server
//! enforces that at submission.

use moyeo_types::cart::CartItem;
use moyeo_types::meeting::{JoinMeetingRequest, JoinMenuItem};

#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    meeting_id: Option<i64>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn meeting_id(&self) -> Option<i64> {
        self.meeting_id
    }

    /// Pins the cart to the meeting the join request targets.
    pub fn set_meeting(&mut self, meeting_id: i64) {
        self.meeting_id = Some(meeting_id);
    }

    /// Adds a line. If a line for the same menu already exists its
    /// quantity is incremented instead of appending a duplicate.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.menu_id == item.menu_id) {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    /// Removes the line for `menu_id`; no-op when absent.
    pub fn remove_item(&mut self, menu_id: i64) {
        self.items.retain(|i| i.menu_id != menu_id);
    }

    /// Sets the quantity for `menu_id`. A quantity of zero removes the line.
    pub fn update_quantity(&mut self, menu_id: i64, quantity: u32) {
        if quantity == 0 {
            self.remove_item(menu_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.menu_id == menu_id) {
            item.quantity = quantity;
        }
    }

    /// Empties the cart and resets the meeting reference.
    pub fn clear(&mut self) {
        self.items.clear();
        self.meeting_id = None;
    }

    /// Sum of `price × quantity` over all lines. Pure; recomputed on demand.
    pub fn total_price(&self) -> i64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Builds the join-request body from the current lines.
    pub fn to_join_request(&self, points_used: Option<i64>) -> JoinMeetingRequest {
        JoinMeetingRequest {
            menu_items: self.items.iter().map(JoinMenuItem::from).collect(),
            points_used,
        }
    }
}
