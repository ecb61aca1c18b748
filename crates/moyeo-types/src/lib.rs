//! Domain and wire types for the moyeo group-delivery service.

pub mod api;
pub mod cart;
pub mod chat;
pub mod evaluation;
pub mod inquiry;
pub mod meeting;
pub mod notification;
pub mod order;
pub mod store;
pub mod user;
