use super::block::{Block, NO_PREVIOUS_HASH, meets_difficulty};
use super::payload::Payload;
use crate::error::ChainError;

/// Genesis must sit at index 0, have no predecessor and a consistent hash.
pub fn validate_genesis<P: Payload>(block: &Block<P>) -> bool {
    block.index == 0 && block.previous_hash.is_none() && block.has_consistent_hash()
}

/// Check `candidate` against `previous`: index step, hash linkage and
/// self-consistency of the candidate's hash. Does not check the PoW target.
pub fn check_pair<P: Payload>(candidate: &Block<P>, previous: &Block<P>) -> Result<(), ChainError> {
    let expected_index = previous.index + 1;
    if candidate.index != expected_index {
        return Err(ChainError::InvalidIndex {
            expected: expected_index,
            found: candidate.index,
        });
    }

    if candidate.previous_hash.as_deref() != Some(previous.hash.as_str()) {
        return Err(ChainError::InvalidPreviousHash {
            expected: previous.hash.clone(),
            found: candidate
                .previous_hash
                .clone()
                .unwrap_or_else(|| NO_PREVIOUS_HASH.to_string()),
        });
    }

    if !candidate.has_consistent_hash() {
        return Err(ChainError::HashMismatch {
            index: candidate.index,
        });
    }

    Ok(())
}

pub fn validate_pair<P: Payload>(candidate: &Block<P>, previous: &Block<P>) -> bool {
    check_pair(candidate, previous).is_ok()
}

/// Structural validation of a whole chain. Empty chains are invalid.
pub fn validate_chain<P: Payload>(blocks: &[Block<P>]) -> bool {
    let Some(genesis) = blocks.first() else {
        return false;
    };
    if !validate_genesis(genesis) {
        return false;
    }
    blocks
        .windows(2)
        .all(|pair| validate_pair(&pair[1], &pair[0]))
}

/// Every stored hash meets the PoW target for `difficulty`.
pub fn validate_proof_of_work<P>(blocks: &[Block<P>], difficulty: u32) -> bool {
    blocks.iter().all(|b| meets_difficulty(&b.hash, difficulty))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genesis() -> Block<String> {
        let mut b = Block::new(0, 1_700_000_000, None, "genesis".to_string());
        b.mine(1);
        b
    }

    fn next(prev: &Block<String>, data: &str) -> Block<String> {
        Block::new(
            prev.index + 1,
            prev.timestamp + 1,
            Some(prev.hash.clone()),
            data.to_string(),
        )
    }

    #[test]
    fn genesis_checks() {
        let g = genesis();
        assert!(validate_genesis(&g));

        let mut linked = g.clone();
        linked.previous_hash = Some("0".into());
        linked.hash = linked.compute_hash();
        assert!(!validate_genesis(&linked));

        let mut shifted = g.clone();
        shifted.index = 1;
        shifted.hash = shifted.compute_hash();
        assert!(!validate_genesis(&shifted));

        let mut stale = g;
        stale.nonce += 1;
        assert!(!validate_genesis(&stale));
    }

    #[test]
    fn pair_accepts_linked_candidate() {
        let g = genesis();
        let b = next(&g, "A");
        assert!(validate_pair(&b, &g));
        assert_eq!(check_pair(&b, &g), Ok(()));
    }

    #[test]
    fn pair_reports_wrong_index() {
        let g = genesis();
        let b = Block::new(5, 0, Some(g.hash.clone()), "A".to_string());
        assert_eq!(
            check_pair(&b, &g),
            Err(ChainError::InvalidIndex {
                expected: 1,
                found: 5
            })
        );
    }

    #[test]
    fn pair_reports_wrong_link() {
        let g = genesis();
        let b = Block::new(1, 0, Some("deadbeef".into()), "A".to_string());
        assert_eq!(
            check_pair(&b, &g),
            Err(ChainError::InvalidPreviousHash {
                expected: g.hash.clone(),
                found: "deadbeef".into()
            })
        );

        let orphan = Block::new(1, 0, None, "A".to_string());
        assert!(!validate_pair(&orphan, &g));
    }

    #[test]
    fn pair_reports_stale_hash() {
        let g = genesis();
        let mut b = next(&g, "A");
        b.data = "X".into();
        assert_eq!(check_pair(&b, &g), Err(ChainError::HashMismatch { index: 1 }));
    }

    #[test]
    fn pair_ignores_pow_target() {
        let g = genesis();
        let b = next(&g, "A");
        // not mined: structurally fine regardless of leading zeros
        assert!(validate_pair(&b, &g));
        assert!(validate_proof_of_work(&[b], 0));
    }

    #[test]
    fn chain_checks() {
        let empty: Vec<Block<String>> = Vec::new();
        assert!(!validate_chain(&empty));

        let g = genesis();
        let a = next(&g, "A");
        let b = next(&a, "B");
        let mut blocks = vec![g, a, b];
        assert!(validate_chain(&blocks));

        blocks[1].data = "X".into();
        assert!(!validate_chain(&blocks));
    }

    #[test]
    fn pow_check_covers_every_block() {
        let g = genesis();
        let mut a = next(&g, "A");
        a.mine(1);
        assert!(validate_proof_of_work(&[g.clone(), a.clone()], 1));

        let mut unmined = next(&a, "B");
        while unmined.hash.starts_with('0') {
            unmined.nonce += 1;
            unmined.hash = unmined.compute_hash();
        }
        assert!(!validate_proof_of_work(&[g, a, unmined], 1));
    }
}
