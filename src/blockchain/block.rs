use std::fmt;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::payload::Payload;

/// Placeholder used in the hash preimage when a block has no predecessor.
pub const NO_PREVIOUS_HASH: &str = "None";

/// A single block of the chain holding one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block<P> {
    pub(crate) index: u64,
    pub(crate) timestamp: i64, // Unix timestamp (UTC)
    pub(crate) previous_hash: Option<String>,
    pub(crate) data: P,
    pub(crate) nonce: u64,   // Proof-of-Work nonce
    pub(crate) hash: String, // Cached hash of the block
}

impl<P: Payload> Block<P> {
    /// Create a new block (not mined yet). Call `mine()` to perform PoW.
    pub fn new(index: u64, timestamp: i64, previous_hash: Option<String>, data: P) -> Self {
        let mut block = Self {
            index,
            timestamp,
            previous_hash,
            data,
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Same as `new`, stamped with the current time.
    pub fn new_now(index: u64, previous_hash: Option<String>, data: P) -> Self {
        Self::new(index, Utc::now().timestamp(), previous_hash, data)
    }

    /// Fields concatenated as text, no separators, in the order
    /// index, timestamp, previous hash (or `None`), canonical data, nonce.
    fn preimage(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.index,
            self.timestamp,
            self.previous_hash.as_deref().unwrap_or(NO_PREVIOUS_HASH),
            self.data.canonical(),
            self.nonce
        )
    }

    /// Hex SHA-256 of the preimage (the `hash` field itself is excluded).
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.preimage().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Perform Proof-of-Work: bump the nonce until the hash starts with
    /// `difficulty` hex zeros. Blocks the caller until a nonce is found.
    pub fn mine(&mut self, difficulty: u32) {
        let mut attempts: u64 = 0;
        while !meets_difficulty(&self.hash, difficulty) {
            self.nonce = self.nonce.wrapping_add(1);
            self.hash = self.compute_hash();
            attempts += 1;
        }
        debug!(
            "mined block #{} at difficulty {} after {} attempts (nonce={})",
            self.index, difficulty, attempts, self.nonce
        );
    }

    /// Cached hash matches the content.
    pub fn has_consistent_hash(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Consistent hash that also satisfies the PoW target.
    pub fn is_sealed(&self, difficulty: u32) -> bool {
        self.has_consistent_hash() && meets_difficulty(&self.hash, difficulty)
    }
}

impl<P> Block<P> {
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn previous_hash(&self) -> Option<&str> {
        self.previous_hash.as_deref()
    }

    pub fn data(&self) -> &P {
        &self.data
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}

/// True when `hash` has at least `difficulty` leading '0' hex characters.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let needed = difficulty as usize;
    hash.len() >= needed && hash.bytes().take(needed).all(|c| c == b'0')
}

impl<P: Payload> fmt::Display for Block<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let when = DateTime::<Utc>::from_timestamp(self.timestamp, 0)
            .map(|t| t.format("%a %b %e %H:%M:%S %Y").to_string())
            .unwrap_or_else(|| self.timestamp.to_string());
        write!(
            f,
            "Block #{} [previousHash: {}, timestamp: {}, data: {}, hash: {}]",
            self.index,
            self.previous_hash.as_deref().unwrap_or(NO_PREVIOUS_HASH),
            when,
            self.data.canonical(),
            self.hash
        )
    }
}
