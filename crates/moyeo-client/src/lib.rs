//! Client library for the moyeo group-delivery service (HTTP API,
//! session store, cart, realtime chat channel).

pub mod api;
pub mod cart;
pub mod chat;
pub mod config;
pub mod realtime;
pub mod session;
