mod chain;
pub mod error;
mod health;
pub mod models;
mod records;

use actix_web::web::{self, ServiceConfig};

pub use error::ApiError;
pub use models::AppState;

/// Register the `/api/v1` routes. `max_upload_bytes` caps raw request bodies.
pub fn configure(max_upload_bytes: usize) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.service(
            web::scope("/api/v1")
                .app_data(web::PayloadConfig::new(max_upload_bytes))
                .service(health::health_check)
                .service(chain::get_chain)
                .service(chain::validate_chain)
                .service(chain::get_tail)
                .service(records::post_record)
                .service(records::post_fingerprint)
                .service(records::verify_fingerprint),
        );
    }
}
