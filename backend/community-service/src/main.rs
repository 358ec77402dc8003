use actix_web::{web, App, HttpServer};
use anyhow::Context;
use community_service::config::{LogFormat, DEFAULT_JWT_SECRET};
use community_service::middleware::{
    cors, security_headers, CorrelationIdMiddleware, RateLimitConfig, RateLimitMiddleware,
};
use community_service::{db, handlers, Config};
use crypto_core::jwt;
use db_pool::{create_pool, DbConfig};
use std::time::Duration;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,community_service=debug,actix_web=info,sqlx=warn".into());

    let (json_layer, text_layer) = match format {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Text => (None, Some(tracing_subscriber::fmt::layer())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Community Service
///
/// # Routes
///
/// - `{API_PREFIX}/community/posts` - create and list posts
/// - `{API_PREFIX}/community/posts/{id}` - fetch one post
/// - `{API_PREFIX}/community/posts/{id}/vote` - cast a vote
/// - `{API_PREFIX}/community/posts/{id}/comments` - list and create comments
/// - `{API_PREFIX}/community/activity` - activity timeline
/// - `/health`, `/healthz`, `/metrics` - operational endpoints
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()
        .map_err(anyhow::Error::msg)
        .context("Failed to load configuration")?;

    init_tracing(config.logging.format);

    tracing::info!("Starting community-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    jwt::initialize_jwt_secret(&config.auth.jwt_secret, &config.auth.jwt_algorithm)
        .context("Failed to initialize JWT keys")?;
    if config.auth.jwt_secret == DEFAULT_JWT_SECRET {
        tracing::warn!("JWT_SECRET is the development default; do not use this outside development");
    }

    let mut db_cfg = DbConfig::from_env("community-service");
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }
    db_cfg.log_config();

    let db_pool = create_pool(db_cfg)
        .await
        .context("Failed to create database pool")?;

    if config.database.run_migrations {
        db::run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let rate_limiter = RateLimitMiddleware::new(RateLimitConfig::per_minute(
        config.rate_limit.requests_per_minute,
    ));
    {
        let rate_limiter = rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;
                rate_limiter.retain_recent();
            }
        });
    }

    let bind_address = (config.app.host.clone(), config.app.port);
    tracing::info!(
        "Starting HTTP server at {}:{} (api prefix '{}', {} workers)",
        bind_address.0,
        bind_address.1,
        config.app.api_prefix,
        config.app.workers
    );

    let pool_data = web::Data::new(db_pool);
    let health_data = web::Data::new(config.health.clone());
    let cors_config = config.cors.clone();
    let api_prefix = config.app.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(health_data.clone())
            .wrap(cors(&cors_config))
            .wrap(rate_limiter.clone())
            .wrap(CorrelationIdMiddleware)
            .wrap(security_headers())
            .wrap(TracingLogger::default())
            .configure(|cfg| handlers::configure_routes(cfg, &api_prefix))
    })
    .workers(config.app.workers)
    .shutdown_timeout(30)
    .bind(bind_address)
    .context("Failed to bind HTTP listener")?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    tracing::info!("community-service stopped");
    Ok(())
}
