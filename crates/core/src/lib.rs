//! Domain types and decision logic for the vitrine catalog backend.
//!
//! This crate is I/O-free: the access gate, the admin identity check, and the
//! approval-status rules are plain functions over plain data so they can be
//! unit tested without a database or an HTTP stack.

pub mod admin;
pub mod approval;
pub mod error;
pub mod gate;
pub mod types;
