//! Request extractors enforcing authentication and the access gates.

pub mod admin;
pub mod auth;
pub mod device;
pub mod gate;
