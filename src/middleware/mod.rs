pub mod session;

// Re-export middleware functions
pub use session::{SESSION_COOKIE, session_middleware};
