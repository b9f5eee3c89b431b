mod web;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pagecraft::config::AppConfig;

use web::middleware::SecurityHeaders;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    tracing::info!(
        bind = %config.bind_addr,
        api = %config.api_base_url,
        "starting dashboard host"
    );

    let state = Data::new(web::AppState::from_config(&config));
    let static_dir = config.static_dir.clone();
    let pkg_dir = config.pkg_dir.clone();
    let api_base_url = config.api_base_url.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityHeaders::new(&api_base_url))
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(web::handlers::configure)
            .service(Files::new("/static", &static_dir).prefer_utf8(true))
            .service(Files::new("/pkg", &pkg_dir))
            .configure(web::handlers::configure_catch_all)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
