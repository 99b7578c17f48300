use serde::{Deserialize, Serialize};

use crate::biometric::BiometricData;

/// Anything stored in a block must render to a stable canonical string.
/// The canonical form feeds the block hash, so it must not depend on
/// wall-clock time or any external state.
pub trait Payload {
    fn canonical(&self) -> String;
}

impl Payload for String {
    fn canonical(&self) -> String {
        self.clone()
    }
}

/// Records accepted by the chain: free text or a biometric capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Record {
    Text(String),
    Biometric(BiometricData),
}

impl Payload for Record {
    fn canonical(&self) -> String {
        match self {
            Record::Text(text) => text.clone(),
            Record::Biometric(data) => data.canonical(),
        }
    }
}

impl From<String> for Record {
    fn from(text: String) -> Self {
        Record::Text(text)
    }
}

impl From<&str> for Record {
    fn from(text: &str) -> Self {
        Record::Text(text.to_string())
    }
}

impl From<BiometricData> for Record {
    fn from(data: BiometricData) -> Self {
        Record::Biometric(data)
    }
}
