pub mod block;
pub mod model;
pub mod payload;
pub mod validation;

pub use block::{Block, meets_difficulty};
pub use model::Blockchain;
pub use payload::{Payload, Record};

/// Default Proof-of-Work difficulty (number of leading hex zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Difficulty ceiling (each step multiplies expected mining work by 16).
pub const DIFF_MAX: u32 = 6;

/// Payload sealed into every genesis block.
pub const GENESIS_DATA: &str = "Block gênesis";
