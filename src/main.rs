mod config;
mod models;
mod routes;
mod service;
mod state;
mod store;
mod templates;

use actix_web::{middleware, web, App, HttpServer};

use crate::{config::Config, service::CheckInService, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_failure = config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Some(err) = dotenv_failure {
        log::warn!("Ignoring unreadable .env file: {err}");
    }

    let config = Config::from_env();

    let store = store::open(&config.database_url, config.max_connections).await?;
    log::info!("Check-in store ready ({} backend)", store.backend_name());

    let checkins = CheckInService::new(store);
    let state = AppState::new(checkins.clone());

    let address = config.bind_address();
    log::info!("Starting check-in queue on http://{address}");

    let served = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .configure(routes::public::configure)
            .configure(routes::admin::configure)
    })
    .bind(address)?
    .run()
    .await;

    checkins.close().await;
    log::info!("Check-in store closed");

    served?;
    Ok(())
}
