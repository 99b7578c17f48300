mod canonical;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::blockchain::{Block, Payload, Record};

pub use canonical::{SpacedAsciiFormatter, to_canonical_json};

/// Image extensions accepted for fingerprint captures.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Quality score assigned to uploaded captures (no scoring model yet).
pub const DEFAULT_QUALITY_SCORE: u8 = 95;

/// A fingerprint capture reduced to the hash of its image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiometricData {
    pub fingerprint_hash: String,
    pub person_id: String,
    pub capture_date: String, // RFC 3339
    pub quality_score: u8,    // 0-100
}

impl BiometricData {
    /// `{"fingerprint_hash": .., "person_id": .., "capture_date": .., "quality_score": ..}`
    /// in field order, `", "`/`": "` separators, non-ASCII escaped.
    pub fn to_json(&self) -> String {
        to_canonical_json(self).expect("serialize biometric data")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Payload for BiometricData {
    fn canonical(&self) -> String {
        self.to_json()
    }
}

/// SHA-256 of the raw image bytes, hex-encoded.
pub fn hash_fingerprint_image(image: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image);
    hex::encode(hasher.finalize())
}

/// First biometric block registered for `person_id` with this image hash.
pub fn find_capture<'a>(
    blocks: &'a [Block<Record>],
    fingerprint_hash: &str,
    person_id: &str,
) -> Option<&'a Block<Record>> {
    blocks.iter().find(|block| match block.data() {
        Record::Biometric(d) => d.fingerprint_hash == fingerprint_hash && d.person_id == person_id,
        Record::Text(_) => false,
    })
}

/// Hash `image` and look it up for `person_id`.
pub fn verify_fingerprint<'a>(
    blocks: &'a [Block<Record>],
    image: &[u8],
    person_id: &str,
) -> Option<&'a Block<Record>> {
    find_capture(blocks, &hash_fingerprint_image(image), person_id)
}

/// Whether `filename` carries one of the accepted image extensions.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}
