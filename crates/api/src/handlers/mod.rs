//! HTTP request handlers, grouped by resource.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod categories;
pub mod products;
pub mod session;
