//! Authentication: password hashing and the cookie session

pub mod password;
pub mod session;

pub use password::{hash_password, verify_password, PasswordError};
pub use session::{signing_key, Flash, FlashCategory, Session, SESSION_COOKIE};
