mod auth;
mod session;

pub use auth::TokenManager;
pub use session::{SESSION_COOKIE, SESSION_IDLE_TIMEOUT, Session, SessionStore};
