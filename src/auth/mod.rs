//! Authentication: token persistence and the admin session
//!
//! Split in two: [`token_store`] owns where the opaque session token lives
//! (OS keyring in production, memory in tests), and [`session`] owns the
//! login/logout/signup/OTP operations plus the permission predicate.

pub mod session;
pub mod token_store;

pub use session::{LoginRequest, Profile, Session, SignupRequest};
pub use token_store::{CredentialStore, KeyringStore, MemoryStore};
