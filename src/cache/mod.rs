//! Cache seam and key derivation.
//!
//! Cached values are plain serialized JSON so any backend that can hold a
//! string key and a JSON blob qualifies. The in-memory backend in
//! [`memory`] is the default.

pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

pub use memory::InMemoryCache;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError>;
}

/// Derive a stable storage key from ordered parts.
///
/// The parts are order-sensitive: callers scope their keys by listing every
/// component that must isolate entries (database, user, locale, ...), and two
/// lists differing in any component or position digest differently.
pub fn key_from_parts(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        // Length-free joins would collide ("ab","c" vs "a","bc").
        hasher.update([0x1f]);
    }
    hex::encode(&hasher.finalize()[..16])
}
