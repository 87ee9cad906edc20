//! Pluggable credential verification
//!
//! Catalog accounts carry no password material, so what counts as the right
//! password is a deployment decision behind the [`CredentialVerifier`]
//! trait. The stock wiring compares the presented password against one
//! bcrypt-hashed secret shared by the whole deployment, configured at
//! startup.

use bcrypt::DEFAULT_COST;

use crate::store::UserRecord;

/// Decides whether a presented password is valid for a user.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, user: &UserRecord, password: &str) -> bool;
}

/// Verifies every account against a single bcrypt hash.
pub struct SharedSecretVerifier {
    hash: String,
}

impl SharedSecretVerifier {
    /// Hash a plaintext shared secret once at startup.
    pub fn from_password(password: &str) -> anyhow::Result<Self> {
        let hash = bcrypt::hash(password, DEFAULT_COST)?;
        Ok(Self { hash })
    }

    /// Wrap an already-hashed secret.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }
}

impl CredentialVerifier for SharedSecretVerifier {
    fn verify(&self, _user: &UserRecord, password: &str) -> bool {
        // A malformed stored hash reads as a failed check, not a panic.
        bcrypt::verify(password, &self.hash).unwrap_or(false)
    }
}
