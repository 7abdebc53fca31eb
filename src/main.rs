use actix_web::{middleware, web, App, HttpServer};
use log::{error, info};
use std::sync::Arc;

use oprequest::blockchain::{EsploraClient, RequestExtractor};
use oprequest::rest::{configure, AppState};
use oprequest::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    // One client serves both history and raw transactions
    let client = Arc::new(EsploraClient::new(&config).map_err(|e| {
        error!("Failed to build provider client: {}", e);
        std::io::Error::other(e)
    })?);
    let extractor = RequestExtractor::new(client.clone(), client)
        .with_max_concurrent_fetches(config.max_concurrent_fetches);
    let state = web::Data::new(AppState { extractor });

    info!(
        "Serving request lookups on {} ({:?}, up to {} concurrent fetches)",
        config.bind_addr, config.network, config.max_concurrent_fetches
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
