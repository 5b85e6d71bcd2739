//! Authentication: login flows and the persisted session

mod service;
mod session;

pub use service::{AuthService, MIN_PASSWORD_LEN};
pub use session::{Session, SessionError, SessionStore};
