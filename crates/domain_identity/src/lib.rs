//! Identity Domain - Users and credentials
//!
//! Registration rules, Argon2 password hashing, login checks and the
//! one-hour password reset flow.
//!
//! # Example
//!
//! ```rust
//! use domain_identity::password::{hash_password, verify_password};
//!
//! let hash = hash_password("Segredo1").unwrap();
//! assert!(verify_password("Segredo1", &hash));
//! ```

pub mod error;
pub mod password;
pub mod ports;
pub mod reset;
pub mod service;
pub mod user;

pub use error::IdentityError;
pub use password::{hash_password, validate_password_strength, verify_password};
pub use ports::{ResetNotice, ResetNotifier, UserPort};
pub use reset::{NewResetToken, ResetToken};
pub use service::AccountService;
pub use user::{NewUser, User, UserProfile};
