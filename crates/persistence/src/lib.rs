//! Persistence layer for the deskbell backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - The request store abstraction and its implementations

pub mod db;
pub mod entities;
pub mod repositories;
pub mod store;
