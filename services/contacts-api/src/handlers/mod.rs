//! HTTP handlers

mod auth;
mod avatar;
mod contacts;
mod health;

pub use auth::{login, refresh, register, verify_email};
pub use avatar::update_avatar;
pub use contacts::{create_contact, delete_contact, get_contact, list_contacts, update_contact};
pub use health::{health, ready};
