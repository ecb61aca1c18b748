pub mod auth;
pub mod chat;
pub mod config;
pub mod evaluations;
pub mod inquiries;
pub mod meetings;
pub mod notifications;
pub mod stores;
pub mod users;
