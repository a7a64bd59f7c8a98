//! File-backed persistence for the bearer credential.
//!
//! The credential is wrapped in a small JSON envelope that carries its
//! expiration metadata and a secure-transport flag, and written to a single
//! file in the application cache directory. Writes replace the whole
//! envelope; clears remove it unconditionally.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token file name in cache directory
const TOKEN_FILE: &str = "token.json";

/// Credential validity window in hours.
/// The envelope is treated as absent once it is older than one day.
const TOKEN_TTL_HOURS: i64 = 24;

/// Serialized wrapper persisted alongside the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenEnvelope {
    pub token: String,
    /// Set at write time when the configured endpoint is not plain HTTP.
    /// A secure envelope is withheld from a plain-HTTP store later on.
    pub secure: bool,
    pub created_at: DateTime<Utc>,
}

impl TokenEnvelope {
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.created_at + Duration::hours(TOKEN_TTL_HOURS)
    }
}

/// Store for the persisted credential envelope.
/// Clone is cheap - it carries only the cache path and the transport flag.
#[derive(Debug, Clone)]
pub struct TokenStore {
    cache_dir: PathBuf,
    secure_transport: bool,
}

impl TokenStore {
    pub fn new(cache_dir: PathBuf, secure_transport: bool) -> Self {
        Self {
            cache_dir,
            secure_transport,
        }
    }

    /// Read the stored credential, treating every failure as "no session".
    /// Absent file, unparseable envelope, expired envelope, and a secure
    /// envelope consulted for a plain-HTTP endpoint all return `None`.
    pub fn read(&self) -> Option<String> {
        match self.load() {
            Ok(envelope) => envelope.and_then(|e| self.surface(e)),
            Err(e) => {
                debug!(error = %e, "Treating unreadable token envelope as absent");
                None
            }
        }
    }

    /// Strict read used on the request path. Absent or expired is
    /// `Ok(None)`; an unparseable envelope is an error, so a corrupted
    /// credential blocks the request instead of silently sending an
    /// unauthenticated one.
    pub fn bearer(&self) -> Result<Option<String>> {
        Ok(self.load()?.and_then(|e| self.surface(e)))
    }

    /// Persist a new credential, replacing any previous envelope.
    /// Expiry is stamped at write time (now + 1 day).
    pub fn write(&self, token: &str) -> Result<()> {
        let envelope = TokenEnvelope {
            token: token.to_string(),
            secure: self.secure_transport,
            created_at: Utc::now(),
        };
        let path = self.token_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&envelope)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write token file: {}", path.display()))?;
        Ok(())
    }

    /// Remove the persisted envelope unconditionally.
    pub fn clear(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove token file: {}", path.display()))?;
        }
        Ok(())
    }

    /// Load and parse the envelope without filtering.
    fn load(&self) -> Result<Option<TokenEnvelope>> {
        let path = self.token_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read token file: {}", path.display()))?;
        let envelope: TokenEnvelope =
            serde_json::from_str(&contents).context("Failed to parse token envelope")?;
        Ok(Some(envelope))
    }

    /// Apply the expiry window and the secure-transport gate.
    fn surface(&self, envelope: TokenEnvelope) -> Option<String> {
        if envelope.is_expired() {
            debug!("Stored token is past its validity window");
            return None;
        }
        if envelope.secure && !self.secure_transport {
            debug!("Withholding secure token from insecure transport");
            return None;
        }
        Some(envelope.token)
    }

    fn token_path(&self) -> PathBuf {
        self.cache_dir.join(TOKEN_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str, secure_transport: bool) -> TokenStore {
        let dir = std::env::temp_dir()
            .join("cms-console-tests")
            .join(format!("{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        TokenStore::new(dir, secure_transport)
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let store = temp_store("roundtrip", false);
        store.write("abc123").unwrap();
        assert_eq!(store.read().as_deref(), Some("abc123"));
        assert_eq!(store.bearer().unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_write_replaces_previous_envelope() {
        let store = temp_store("replace", false);
        store.write("first").unwrap();
        store.write("second").unwrap();
        assert_eq!(store.read().as_deref(), Some("second"));
    }

    #[test]
    fn test_clear_then_read_is_none() {
        let store = temp_store("clear", false);
        store.write("abc").unwrap();
        store.clear().unwrap();
        assert_eq!(store.read(), None);
        // Clearing an already-empty store is fine
        store.clear().unwrap();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_malformed_envelope_reads_as_none_but_bearer_errors() {
        let store = temp_store("malformed", false);
        std::fs::create_dir_all(&store.cache_dir).unwrap();
        std::fs::write(store.token_path(), "not json {").unwrap();

        assert_eq!(store.read(), None);
        assert!(store.bearer().is_err());
    }

    #[test]
    fn test_expired_envelope_is_absent() {
        let store = temp_store("expired", false);
        let envelope = TokenEnvelope {
            token: "stale".to_string(),
            secure: false,
            created_at: Utc::now() - Duration::hours(TOKEN_TTL_HOURS + 1),
        };
        std::fs::create_dir_all(&store.cache_dir).unwrap();
        std::fs::write(
            store.token_path(),
            serde_json::to_string(&envelope).unwrap(),
        )
        .unwrap();

        assert_eq!(store.read(), None);
        // Expired is not an error on the strict path, just absent
        assert_eq!(store.bearer().unwrap(), None);
    }

    #[test]
    fn test_secure_envelope_withheld_from_insecure_transport() {
        let secure = temp_store("secure-gate", true);
        secure.write("tls-only").unwrap();
        assert_eq!(secure.read().as_deref(), Some("tls-only"));

        // Same directory, consulted for a plain-HTTP endpoint
        let insecure = TokenStore::new(secure.cache_dir.clone(), false);
        assert_eq!(insecure.read(), None);
        assert_eq!(insecure.bearer().unwrap(), None);
    }

    #[test]
    fn test_expiry_window() {
        let fresh = TokenEnvelope {
            token: "t".to_string(),
            secure: false,
            created_at: Utc::now(),
        };
        assert!(!fresh.is_expired());

        let edge = TokenEnvelope {
            token: "t".to_string(),
            secure: false,
            created_at: Utc::now() - Duration::hours(TOKEN_TTL_HOURS) + Duration::minutes(1),
        };
        assert!(!edge.is_expired());
    }
}
