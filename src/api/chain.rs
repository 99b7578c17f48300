use actix_web::{HttpResponse, get, web};

use super::error::ApiError;
use super::models::{AppState, ChainResponse, ValidateResponse};

/// Get the full blockchain, raw and rendered.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let bc = state.blockchain.lock().map_err(|_| ApiError::Poisoned)?;
    let resp = ChainResponse {
        length: bc.len(),
        difficulty: bc.difficulty(),
        valid: bc.is_valid(),
        chain: bc.blocks(),
        rendered: bc.blocks().iter().map(ToString::to_string).collect(),
    };
    Ok(HttpResponse::Ok().json(resp))
}

/// Validate the whole chain (structure, and PoW target separately).
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let bc = state.blockchain.lock().map_err(|_| ApiError::Poisoned)?;
    let resp = ValidateResponse {
        valid: bc.is_valid(),
        sealed: bc.is_sealed(),
        length: bc.len(),
        difficulty: bc.difficulty(),
    };
    Ok(HttpResponse::Ok().json(resp))
}

/// Last block of the chain.
#[get("/tail/")]
pub async fn get_tail(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let bc = state.blockchain.lock().map_err(|_| ApiError::Poisoned)?;
    let tail = bc.last_block()?;
    Ok(HttpResponse::Ok().json(tail))
}
