use hello_inspector::config::ServiceConfig;
use hello_inspector::routes::inspection_routes;
use std::process::ExitCode;
use tokio::net::TcpListener; //TCP listener
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main] // the program entry point using the Tokio async runtime.
async fn main() -> ExitCode {
    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt().init();
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let app = inspection_routes::router(&config);

    let listener = match TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", config.bind, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on http://{}", config.bind);
    info!("  - POST /ja4     - JA4 client fingerprint");
    info!("  - POST /ja4s    - JA4S server fingerprint");
    info!("  - POST /parse   - TLS record breakdown");
    info!("  - GET  /health  - Health check");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
