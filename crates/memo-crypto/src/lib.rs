//! # memo-crypto
//!
//! Cryptographic primitives for the memo note service.
//!
//! This crate provides:
//! - **Password hashing**: Argon2id with per-password random salts, encoded
//!   as PHC strings. Verification is constant-time.
//! - **Session tokens**: cryptographically random bearer tokens and the
//!   SHA-256 digest under which they are persisted.
//!
//! ## Examples
//!
//! ```rust
//! use memo_crypto::{hash_password, verify_password};
//!
//! let hash = hash_password("correct horse battery staple").unwrap();
//! assert!(verify_password(&hash, "correct horse battery staple").unwrap());
//! assert!(!verify_password(&hash, "hunter2").unwrap());
//! ```

pub mod error;
pub mod password;
pub mod token;

pub use error::{CryptoError, CryptoResult};
pub use password::{hash_password, verify_password};
pub use token::{generate_token, hash_token};
