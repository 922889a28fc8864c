//! Application pages

pub mod admin;
pub mod admin_login;
pub mod chat;
