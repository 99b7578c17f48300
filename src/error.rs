use thiserror::Error;

/// Failures surfaced by the chain when building, validating or appending blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("the chain holds no blocks (genesis missing)")]
    EmptyChain,

    #[error("difficulty {difficulty} is above the supported maximum ({max})")]
    DifficultyTooHigh { difficulty: u32, max: u32 },

    #[error("candidate index ({found}) is not the expected value ({expected})")]
    InvalidIndex { expected: u64, found: u64 },

    #[error("candidate previous hash ({found}) does not match the tail hash ({expected})")]
    InvalidPreviousHash { expected: String, found: String },

    #[error("block #{index} hash does not match its content")]
    HashMismatch { index: u64 },
}

impl ChainError {
    /// True for rejections of a candidate block (as opposed to chain/config faults).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ChainError::InvalidIndex { .. }
                | ChainError::InvalidPreviousHash { .. }
                | ChainError::HashMismatch { .. }
        )
    }
}
