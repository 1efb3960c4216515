//! HTTP middleware components.

pub mod logging;
pub mod session;

#[allow(unused_imports)] // Re-exports for downstream use
pub use session::{require_session, SessionContext, ACCESS_TOKEN_HEADER, SESSION_TOKEN_HEADER};
