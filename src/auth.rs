//! Admin credentials and sessions.
//!
//! The operator's password is stored only as an Argon2 PHC string. A
//! successful login mints an opaque random token kept in memory until it
//! expires; restarting the server signs everyone out.

use std::collections::HashMap;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AdminConfig;
use crate::error::{FolioError, Result};

/// Hash a password into an Argon2 PHC string for the config file.
pub fn hash_password(password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(FolioError::validation("password", "is required"));
    }
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| FolioError::PasswordHash(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| FolioError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a password against a PHC string. Malformed hashes never match.
pub fn verify_password(password_hash: &str, password: &str) -> bool {
    let parsed = match PasswordHash::new(password_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "configured admin password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// How long a session token stays valid after login
pub const SESSION_TTL_HOURS: i64 = 12;

/// Verifies admin logins and tracks the resulting sessions.
pub struct AdminGate {
    credentials: Option<AdminConfig>,
    ttl: Duration,
    /// token -> issue time
    sessions: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl AdminGate {
    pub fn new(credentials: Option<AdminConfig>) -> Self {
        Self::with_ttl(credentials, Duration::hours(SESSION_TTL_HOURS))
    }

    pub fn with_ttl(credentials: Option<AdminConfig>, ttl: Duration) -> Self {
        Self {
            credentials,
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Start a session when the credentials match.
    pub async fn login(&self, username: &str, password: &str) -> Option<String> {
        let Some(credentials) = &self.credentials else {
            warn!("login attempted but no admin credentials are configured");
            return None;
        };

        if credentials.username != username
            || !verify_password(&credentials.password_hash, password)
        {
            warn!(username, "admin login rejected");
            return None;
        }

        let now = Utc::now();
        let token = Uuid::new_v4().simple().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, issued| now - *issued < self.ttl);
        sessions.insert(token.clone(), now);
        info!(username, "admin logged in");
        Some(token)
    }

    /// Whether `token` names a session younger than the TTL.
    pub async fn is_valid(&self, token: &str) -> bool {
        match self.sessions.read().await.get(token) {
            Some(issued) => Utc::now() - *issued < self.ttl,
            None => false,
        }
    }

    /// End a session. Returns whether it existed.
    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}
