use std::process::ExitCode;

use catalog::{app, config::ServerConfig, http::Server, logging, state::AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    let state = AppState::in_memory(config.catalog.content_policy(), config.catalog.discount_policy);

    info!(
        discount_policy = ?config.catalog.discount_policy,
        content_default = ?config.catalog.content_default,
        "catalog configured"
    );

    let server = match Server::bind(&config.socket_addr()).await {
        Ok(server) => server,
        Err(e) => {
            error!("failed to bind {}: {e}", config.socket_addr());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.serve(app::router(state)).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
