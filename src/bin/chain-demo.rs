//! Builds a small chain locally, prints it and checks it.

use chrono::Utc;
use log::error;
use std::process::ExitCode;

use biometric_chain::biometric::{
    BiometricData, DEFAULT_QUALITY_SCORE, hash_fingerprint_image, verify_fingerprint,
};
use biometric_chain::blockchain::{Blockchain, DEFAULT_DIFFICULTY, Record};
use biometric_chain::ChainError;

// stand-in for scanner output
const SCAN: &[u8] = b"dados_binarios_da_imagem";

fn run() -> Result<Blockchain<Record>, ChainError> {
    let mut bc: Blockchain<Record> = Blockchain::new(DEFAULT_DIFFICULTY)?;

    for text in [
        "Tout sur le Bitcoin",
        "Sylvain Saurel",
        "https://www.toutsurlebitcoin.fr",
        "https://www.uea.edu.br",
    ] {
        let candidate = bc.prepare_next(Record::from(text))?;
        bc.append(candidate)?;
    }

    let capture = BiometricData {
        fingerprint_hash: hash_fingerprint_image(SCAN),
        person_id: "P123456".to_string(),
        capture_date: Utc::now().to_rfc3339(),
        quality_score: DEFAULT_QUALITY_SCORE,
    };
    bc.push(Record::from(capture))?;

    Ok(bc)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(bc) => {
            println!("{bc}");
            println!(
                "Blockchain is valid? {}",
                if bc.is_valid() { "yes" } else { "no" }
            );
            match verify_fingerprint(bc.blocks(), SCAN, "P123456") {
                Some(block) => println!("P123456 authenticated by block #{}", block.index()),
                None => println!("P123456 not found"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("demo failed: {e}");
            ExitCode::FAILURE
        }
    }
}
