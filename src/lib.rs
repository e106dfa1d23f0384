pub mod backend; // Care-backend REST client
pub mod config;
pub mod forms; // Enrollment and assessment validation
pub mod models;
pub mod roster; // Roster filter/sort/pagination engine
pub mod scores; // PHQ-9 / GAD-7 instruments
pub mod session; // Bearer-token verification
pub mod shell; // Role and path routing rules
pub mod web; // Router, pages, HTTP server

use tracing_subscriber::EnvFilter;

/// Run the portal until interrupted.
pub async fn run() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let config = config::PortalConfig::from_env();
    tracing::info!(
        backend_url = %config.backend_url,
        "{} starting v{}",
        config::APP_NAME,
        config::APP_VERSION
    );
    if config.uses_dev_secret() {
        tracing::warn!(
            "Using the built-in development session secret; set CARELOOP_SESSION_SECRET"
        );
    }

    let bind_addr = config.bind_addr;
    let app = web::portal_router(config);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Portal listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await
}
