//! Authentication module for managing the bearer credential and its claims.
//!
//! This module provides:
//! - `TokenStore`: file-backed persistence of the bearer credential
//! - `claims::decode`: extraction of the credential's embedded claims
//!
//! Tokens are persisted as a JSON envelope and expire after one day.
//! Claims are decoded without signature verification; they are display
//! material only and any authorization decision belongs to the server.

pub mod claims;
pub mod store;

pub use claims::{decode, ClaimsError, Identity};
pub use store::{TokenEnvelope, TokenStore};
