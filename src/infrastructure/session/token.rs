//! Session token generation
//!
//! Generates cryptographically secure bearer tokens for sessions. The raw
//! token is handed to the client once at login; only its hash is stored.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Result of generating a new session token
#[derive(Debug, Clone)]
pub struct GeneratedToken {
    /// The full bearer token (only shown once at login)
    pub token: String,
    /// The hashed token used as the stored session key
    pub hash: String,
}

/// Generator for secure session tokens
#[derive(Debug, Clone)]
pub struct SessionTokenGenerator {
    /// Prefix for all generated tokens
    prefix: String,
    /// Number of random bytes to generate
    token_bytes: usize,
}

impl SessionTokenGenerator {
    /// Create a new token generator with a custom prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            token_bytes: 32,
        }
    }

    /// Generate a new session token
    pub fn generate(&self) -> GeneratedToken {
        let mut random_bytes = vec![0u8; self.token_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        let encoded = URL_SAFE_NO_PAD.encode(&random_bytes);
        let token = format!("{}{}", self.prefix, encoded);
        let hash = self.hash_token(&token);

        GeneratedToken { token, hash }
    }

    /// Hash a token for storage and lookup
    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        let result = hasher.finalize();
        format!("sha256${}", URL_SAFE_NO_PAD.encode(result))
    }

    /// Verify a presented token against a stored hash
    pub fn verify_token(&self, token: &str, stored_hash: &str) -> bool {
        let computed_hash = self.hash_token(token);
        constant_time_compare(&computed_hash, stored_hash)
    }
}

impl Default for SessionTokenGenerator {
    fn default() -> Self {
        Self::new("coop_sess_")
    }
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut result = 0u8;

    for i in 0..a.len() {
        result |= a_bytes[i] ^ b_bytes[i];
    }

    result == 0
}
