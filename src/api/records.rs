use actix_web::{HttpResponse, post, web};
use chrono::Utc;
use log::{debug, info, warn};
use std::time::Instant;

use super::error::ApiError;
use super::models::{
    AppState, AppendResponse, FingerprintQuery, FingerprintResponse, NewRecordRequest,
    VerifyResponse,
};
use crate::biometric::{
    BiometricData, DEFAULT_QUALITY_SCORE, allowed_file, find_capture, hash_fingerprint_image,
};
use crate::blockchain::Record;

/// Append a plain text record.
#[post("/records/")]
pub async fn post_record(
    state: web::Data<AppState>,
    body: web::Json<NewRecordRequest>,
) -> Result<HttpResponse, ApiError> {
    let text = body.into_inner().data;
    if text.trim().is_empty() {
        warn!("POST /records/ - rejected: empty data");
        return Err(ApiError::BadRequest("data must not be empty"));
    }

    let resp = append_record(state, Record::Text(text)).await?;
    Ok(HttpResponse::Ok().json(resp))
}

/// Register a fingerprint capture. The request body is the raw image;
/// `person_id` and `filename` come from the query string.
#[post("/fingerprints/")]
pub async fn post_fingerprint(
    state: web::Data<AppState>,
    query: web::Query<FingerprintQuery>,
    image: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let person_id = check_upload("/fingerprints/", query.into_inner(), &image)?;

    let capture = BiometricData {
        fingerprint_hash: hash_fingerprint_image(&image),
        person_id,
        capture_date: Utc::now().to_rfc3339(),
        quality_score: DEFAULT_QUALITY_SCORE,
    };

    let appended = append_record(state, Record::Biometric(capture)).await?;
    Ok(HttpResponse::Ok().json(FingerprintResponse {
        success: true,
        message: "fingerprint registered".to_string(),
        block_index: appended.index,
        hash: appended.hash,
    }))
}

/// Authenticate: is this image registered for `person_id`? Read-only.
#[post("/fingerprints/verify/")]
pub async fn verify_fingerprint(
    state: web::Data<AppState>,
    query: web::Query<FingerprintQuery>,
    image: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let person_id = check_upload("/fingerprints/verify/", query.into_inner(), &image)?;
    let fingerprint_hash = hash_fingerprint_image(&image);

    let bc = state.blockchain.lock().map_err(|_| ApiError::Poisoned)?;
    let resp = match find_capture(bc.blocks(), &fingerprint_hash, &person_id) {
        Some(block) => {
            let capture = match block.data() {
                Record::Biometric(d) => Some(d),
                Record::Text(_) => None,
            };
            info!(
                "POST /fingerprints/verify/ - person_id={} matched block #{}",
                person_id,
                block.index()
            );
            VerifyResponse {
                matched: true,
                block_index: Some(block.index()),
                capture_date: capture.map(|d| d.capture_date.clone()),
                quality_score: capture.map(|d| d.quality_score),
                hash: Some(block.hash().to_string()),
            }
        }
        None => {
            warn!("POST /fingerprints/verify/ - no match for person_id={person_id}");
            VerifyResponse {
                matched: false,
                block_index: None,
                capture_date: None,
                quality_score: None,
                hash: None,
            }
        }
    };
    Ok(HttpResponse::Ok().json(resp))
}

/// Input checks shared by the fingerprint routes; returns the trimmed person id.
fn check_upload(route: &str, query: FingerprintQuery, image: &[u8]) -> Result<String, ApiError> {
    let FingerprintQuery {
        person_id,
        filename,
    } = query;
    debug!(
        "POST {} - received {} bytes (filename={:?}, person_id={:?})",
        route,
        image.len(),
        filename,
        person_id
    );

    if image.is_empty() {
        return Err(ApiError::BadRequest("no file sent"));
    }
    if filename.is_empty() {
        return Err(ApiError::BadRequest("no file selected"));
    }
    if !allowed_file(&filename) {
        return Err(ApiError::BadRequest("file type not allowed"));
    }
    let person_id = person_id.trim().to_string();
    if person_id.is_empty() {
        return Err(ApiError::BadRequest("person_id is required"));
    }
    Ok(person_id)
}

/// Prepare, validate, mine and append under one lock acquisition.
/// Mining runs on the blocking pool so async workers stay responsive.
async fn append_record(
    state: web::Data<AppState>,
    record: Record,
) -> Result<AppendResponse, ApiError> {
    let t0 = Instant::now();
    let resp = web::block(move || -> Result<AppendResponse, ApiError> {
        let mut bc = state.blockchain.lock().map_err(|_| ApiError::Poisoned)?;
        let difficulty = bc.difficulty();
        let block = bc.push(record)?;
        Ok(AppendResponse {
            index: block.index(),
            hash: block.hash().to_string(),
            nonce: block.nonce(),
            difficulty,
        })
    })
    .await
    .map_err(|e| ApiError::Blocking(e.to_string()))??;

    info!(
        "appended block #{} (hash={}, nonce={}) in {} ms",
        resp.index,
        resp.hash,
        resp.nonce,
        t0.elapsed().as_millis()
    );
    Ok(resp)
}
