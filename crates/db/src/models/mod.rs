//! Row structs and DTOs, one submodule per table.

pub mod auth_session;
pub mod category;
pub mod device_session;
pub mod product;
pub mod profile;
pub mod user;
