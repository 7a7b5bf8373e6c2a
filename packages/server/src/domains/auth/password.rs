//! Password hashing for author accounts.
//!
//! Hashes are stored as `<salt>$<hex sha256(salt || password)>` with a fresh
//! random salt per account.

use sha2::{Digest, Sha256};
use uuid::Uuid;

// TODO: move to a memory-hard KDF (argon2) and rehash on next login
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = salted_digest(&salt, password);
    format!("{}${}", salt, digest)
}

/// Check `password` against a hash produced by `hash_password`
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once('$') else {
        return false;
    };
    constant_time_eq(salted_digest(salt, password).as_bytes(), expected.as_bytes())
}

fn salted_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
