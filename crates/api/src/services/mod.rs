//! Application services.

pub mod session;

#[allow(unused_imports)] // Re-exports for downstream use
pub use session::{InMemorySessionStore, Session, SessionStore};
