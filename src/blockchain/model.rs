use std::fmt;

use log::{debug, info, warn};

use super::payload::Payload;
use super::validation::{check_pair, validate_chain, validate_proof_of_work};
use super::{Block, DIFF_MAX, GENESIS_DATA};
use crate::error::ChainError;

/// Simple in-memory blockchain with Proof-of-Work.
#[derive(Debug, Clone)]
pub struct Blockchain<P> {
    blocks: Vec<Block<P>>,
    difficulty: u32,
}

impl<P: Payload + From<&'static str>> Blockchain<P> {
    /// Initialize a new blockchain with a mined genesis block.
    pub fn new(difficulty: u32) -> Result<Self, ChainError> {
        if difficulty > DIFF_MAX {
            return Err(ChainError::DifficultyTooHigh {
                difficulty,
                max: DIFF_MAX,
            });
        }

        let mut genesis = Block::new_now(0, None, P::from(GENESIS_DATA));
        genesis.mine(difficulty);
        info!(
            "genesis sealed (difficulty={}, hash={})",
            difficulty, genesis.hash
        );

        Ok(Self {
            blocks: vec![genesis],
            difficulty,
        })
    }
}

impl<P: Payload> Blockchain<P> {
    /// Return the last block in the chain.
    pub fn last_block(&self) -> Result<&Block<P>, ChainError> {
        self.blocks.last().ok_or(ChainError::EmptyChain)
    }

    /// Build an unmined candidate linked to the current tail.
    pub fn prepare_next(&self, data: P) -> Result<Block<P>, ChainError> {
        let tail = self.last_block()?;
        Ok(Block::new_now(tail.index + 1, Some(tail.hash.clone()), data))
    }

    /// Validate `candidate` against the tail, mine it and append it.
    /// A rejected candidate leaves the chain untouched.
    pub fn append(&mut self, mut candidate: Block<P>) -> Result<&Block<P>, ChainError> {
        if let Err(e) = check_pair(&candidate, self.last_block()?) {
            warn!("rejected block #{}: {}", candidate.index, e);
            return Err(e);
        }

        candidate.mine(self.difficulty);
        info!(
            "sealed block #{} (hash={}, nonce={})",
            candidate.index, candidate.hash, candidate.nonce
        );
        self.blocks.push(candidate);
        self.last_block()
    }

    /// Prepare, mine and append a block holding `data`.
    pub fn push(&mut self, data: P) -> Result<&Block<P>, ChainError> {
        let candidate = self.prepare_next(data)?;
        debug!("prepared block #{}", candidate.index);
        self.append(candidate)
    }

    /// Structural validation of the entire chain: genesis, linkage, hashes.
    pub fn is_valid(&self) -> bool {
        validate_chain(&self.blocks)
    }

    /// `is_valid` plus every block meeting the PoW target.
    pub fn is_sealed(&self) -> bool {
        self.is_valid() && validate_proof_of_work(&self.blocks, self.difficulty)
    }
}

impl<P> Blockchain<P> {
    pub fn blocks(&self) -> &[Block<P>] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }
}

impl<P: Payload> fmt::Display for Blockchain<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{GENESIS_DATA, Record};
    use crate::blockchain::validation::validate_genesis;

    #[test]
    fn fresh_chain_holds_valid_genesis() {
        for difficulty in 0..=3 {
            let bc: Blockchain<Record> = Blockchain::new(difficulty).unwrap();
            assert_eq!(bc.len(), 1);
            let genesis = bc.last_block().unwrap();
            assert!(validate_genesis(genesis));
            assert_eq!(genesis.data(), &Record::from(GENESIS_DATA));
            assert!(bc.is_valid());
            assert!(bc.is_sealed());
        }
    }

    #[test]
    fn difficulty_above_max_is_rejected() {
        let err = Blockchain::<String>::new(DIFF_MAX + 1).unwrap_err();
        assert_eq!(
            err,
            ChainError::DifficultyTooHigh {
                difficulty: DIFF_MAX + 1,
                max: DIFF_MAX
            }
        );
    }

    #[test]
    fn prepare_next_links_to_tail_without_mutating() {
        let bc: Blockchain<String> = Blockchain::new(1).unwrap();
        let candidate = bc.prepare_next("A".into()).unwrap();
        let tail = bc.last_block().unwrap();
        assert_eq!(candidate.index(), 1);
        assert_eq!(candidate.previous_hash(), Some(tail.hash()));
        assert_eq!(candidate.nonce(), 0);
        assert_eq!(bc.len(), 1);
    }

    #[test]
    fn each_append_grows_chain_by_one() {
        let mut bc: Blockchain<String> = Blockchain::new(1).unwrap();
        for (i, data) in ["A", "B", "C", "D"].iter().enumerate() {
            let prev_index = bc.last_block().unwrap().index();
            let candidate = bc.prepare_next(data.to_string()).unwrap();
            let appended = bc.append(candidate).unwrap();
            assert_eq!(appended.index(), prev_index + 1);
            assert!(appended.hash().starts_with('0'));
            assert_eq!(bc.len(), i + 2);
        }
        assert!(bc.is_valid());
        assert!(bc.is_sealed());
    }

    #[test]
    fn stale_candidate_is_rejected() {
        let mut bc: Blockchain<String> = Blockchain::new(1).unwrap();
        let first = bc.prepare_next("A".into()).unwrap();
        let second = bc.prepare_next("B".into()).unwrap();
        bc.append(first).unwrap();

        let err = bc.append(second).unwrap_err();
        assert!(err.is_rejection());
        assert!(matches!(err, ChainError::InvalidIndex { expected: 2, found: 1 }));
        assert_eq!(bc.len(), 2);
        assert!(bc.is_valid());
    }

    #[test]
    fn candidate_with_wrong_link_is_rejected() {
        let mut bc: Blockchain<String> = Blockchain::new(1).unwrap();
        let forged = Block::new(1, 0, Some("f".repeat(64)), "A".to_string());
        let err = bc.append(forged).unwrap_err();
        assert!(matches!(err, ChainError::InvalidPreviousHash { .. }));
        assert_eq!(bc.len(), 1);
    }

    #[test]
    fn tampered_candidate_is_rejected() {
        let mut bc: Blockchain<String> = Blockchain::new(1).unwrap();
        let mut candidate = bc.prepare_next("A".into()).unwrap();
        candidate.data = "X".into();
        let err = bc.append(candidate).unwrap_err();
        assert_eq!(err, ChainError::HashMismatch { index: 1 });
        assert_eq!(bc.len(), 1);
    }

    #[test]
    fn tampering_a_stored_block_breaks_validity() {
        let mut bc: Blockchain<String> = Blockchain::new(1).unwrap();
        bc.push("A".into()).unwrap();
        bc.push("B".into()).unwrap();
        assert!(bc.is_valid());

        bc.blocks[0].data = "rewritten".into();
        assert!(!bc.is_valid());
    }

    #[test]
    fn unmined_block_is_valid_but_not_sealed() {
        let mut bc: Blockchain<String> = Blockchain::new(2).unwrap();
        let mut block = bc.prepare_next("A".into()).unwrap();
        while block.hash.starts_with("00") {
            block.nonce += 1;
            block.hash = block.compute_hash();
        }
        bc.blocks.push(block);
        assert!(bc.is_valid());
        assert!(!bc.is_sealed());
    }

    #[test]
    fn end_to_end_scenario() {
        let mut bc: Blockchain<Record> = Blockchain::new(2).unwrap();
        let a = bc.prepare_next(Record::from("A")).unwrap();
        bc.append(a).unwrap();
        let b = bc.prepare_next(Record::from("B")).unwrap();
        bc.append(b).unwrap();

        let blocks = bc.blocks();
        assert_eq!(bc.len(), 3);
        assert_eq!(blocks[1].previous_hash(), Some(blocks[0].hash()));
        assert_eq!(blocks[2].previous_hash(), Some(blocks[1].hash()));
        assert!(blocks.iter().all(|b| b.hash().starts_with("00")));
        assert!(bc.is_valid());

        bc.blocks[1].data = Record::from("X");
        assert!(!bc.is_valid());
    }

    #[test]
    fn display_renders_one_line_per_block() {
        let mut bc: Blockchain<String> = Blockchain::new(0).unwrap();
        bc.push("A".into()).unwrap();
        let rendered = bc.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Block #0 [previousHash: None"));
        assert!(lines[1].contains("data: A"));
    }
}
