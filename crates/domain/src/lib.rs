//! Domain layer for the deskbell backend.
//!
//! This crate contains the domain models and the request/response
//! payload types for the HTTP surface.

pub mod models;
