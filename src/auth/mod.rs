//! Admin authentication: password hashing, session cookies, route guards,
//! and the client-side unauthorized-error classifier.

pub mod classify;
pub mod guard;
pub mod password;
pub mod session;

pub use classify::{handle_auth_error, is_unauthorized_error, LOGIN_PATH};
pub use guard::{admin_page_gate, require_admin, AdminUser};
pub use session::{SessionClaims, SessionKeys, SESSION_COOKIE};
