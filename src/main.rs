use std::sync::Arc;
use std::time::Duration;

use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repostats::config::Config;
use repostats::handlers;
use repostats::services::{GithubClient, StatsService};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "repostats"
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repostats=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    info!(
        "Starting stats API on {}:{}, aggregating {} repositories owned by {}",
        config.host,
        config.port,
        config.repositories.len(),
        config.github_owner
    );

    let github = GithubClient::new(
        &config.github_api_url,
        config.github_token.as_deref(),
        Duration::from_secs(config.upstream_timeout_secs),
    )
    .expect("Failed to build GitHub client");

    let stats = web::Data::new(StatsService::new(
        Arc::new(github),
        config.github_owner.clone(),
        config.repositories.clone(),
    ));

    let server_addr = format!("{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(stats.clone())
            .wrap(middleware::Logger::default())
            .wrap(handlers::api_headers())
            .route("/health", web::get().to(health_check))
            .service(web::scope("/api").configure(handlers::configure_stats_routes))
    })
    .bind(&server_addr)?
    .run()
    .await
}
