use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;

use biometric_chain::api::{self, AppState};
use biometric_chain::config::Settings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    info!(
        "mining genesis block at difficulty {} ...",
        settings.difficulty
    );
    let state = AppState::new(settings.difficulty)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let state = web::Data::new(state);

    println!(
        "⛓️ Starting biometric chain API at http://{}:{}",
        settings.host, settings.port
    );

    let max_upload_bytes = settings.max_upload_bytes;
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::configure(max_upload_bytes))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
