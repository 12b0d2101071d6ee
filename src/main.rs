use site_gateway::{
    AppState, HttpMailer, StaticContentRepository,
    config::{AppConfig, Env},
    create_router,
    mailer::MailerState,
    repository::ContentState,
};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, installs logging, validates the compiled-in content
/// and message bundles, then serves HTTP until the process is stopped.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing production secrets)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "site_gateway=debug,tower_http=info,axum=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON lines for the log aggregator.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);
    if config.local_auth_bypass() {
        tracing::warn!(
            "x-user-id/x-user-role header authentication is ENABLED; set APP_ENV=production for deployed instances"
        );
    }

    // 3. Content: dataset invariants are checked before accepting traffic.
    let content = match StaticContentRepository::bundled() {
        Ok(repo) => Arc::new(repo) as ContentState,
        Err(e) => {
            tracing::error!("FATAL: bundled content is invalid: {}", e);
            std::process::exit(1);
        }
    };

    // 4. Mail delivery
    if config.mail_api_key.is_empty() {
        tracing::warn!("MAIL_API_KEY is not set; contact submissions will fail to deliver");
    }
    let mailer = match HttpMailer::new(
        &config.mail_api_url,
        &config.mail_api_key,
        Duration::from_secs(config.mail_timeout_secs),
    ) {
        Ok(mailer) => Arc::new(mailer) as MailerState,
        Err(e) => {
            tracing::error!("FATAL: mail client could not be built: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Unified state (message catalog is parsed here)
    let bind_addr = config.bind_addr.clone();
    let app_state = match AppState::build(config, content, mailer) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("FATAL: message catalog failed to load: {}", e);
            std::process::exit(1);
        }
    };

    // 6. Router and server
    let app = create_router(app_state);

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("FATAL: failed to bind {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
