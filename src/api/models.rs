use crate::blockchain::{Block, Blockchain, Record};
use crate::error::ChainError;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Shared application state: the chain behind a single writer lock.
pub struct AppState {
    pub blockchain: Mutex<Blockchain<Record>>,
}

impl AppState {
    pub fn new(difficulty: u32) -> Result<Self, ChainError> {
        Ok(Self {
            blockchain: Mutex::new(Blockchain::new(difficulty)?),
        })
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub difficulty: u32,
    pub valid: bool,
    pub chain: &'a [Block<Record>],
    pub rendered: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub sealed: bool,
    pub length: usize,
    pub difficulty: u32,
}

/* ---------- Record API Models ---------- */

#[derive(Deserialize)]
pub struct NewRecordRequest {
    pub data: String,
}

#[derive(Serialize, Deserialize)]
pub struct AppendResponse {
    pub index: u64,
    pub hash: String,
    pub nonce: u64,
    pub difficulty: u32,
}

/* ---------- Fingerprint API Models ---------- */

#[derive(Deserialize)]
pub struct FingerprintQuery {
    #[serde(default)]
    pub person_id: String,
    #[serde(default)]
    pub filename: String,
}

#[derive(Serialize, Deserialize)]
pub struct FingerprintResponse {
    pub success: bool,
    pub message: String,
    pub block_index: u64,
    pub hash: String,
}

#[derive(Serialize, Deserialize)]
pub struct VerifyResponse {
    pub matched: bool,
    pub block_index: Option<u64>,
    pub capture_date: Option<String>,
    pub quality_score: Option<u8>,
    pub hash: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
