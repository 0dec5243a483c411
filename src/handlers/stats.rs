//! Stats handlers
//!
//! HTTP surface for the dashboard statistics aggregation.

use std::panic::AssertUnwindSafe;

use actix_web::middleware::DefaultHeaders;
use actix_web::{web, HttpResponse};
use futures_util::FutureExt;
use tracing::error;

use crate::models::DashboardStats;
use crate::services::StatsService;

/// GET /api/stats
///
/// Always responds 200. Upstream failures have already degraded to zero
/// counts inside the aggregation; a programming error in the aggregation
/// itself surfaces as a panic, which is caught here and answered with the
/// canned fallback record.
pub async fn get_stats(service: web::Data<StatsService>) -> HttpResponse {
    let stats = match AssertUnwindSafe(service.compute()).catch_unwind().await {
        Ok(stats) => stats,
        Err(_) => {
            error!("stats aggregation panicked; serving fallback record");
            DashboardStats::fallback()
        }
    };

    HttpResponse::Ok().json(stats)
}

/// Response headers for the dashboard front-end: wildcard CORS and cache
/// suppression so it never renders a stale snapshot.
pub fn api_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
        .add((
            "Cache-Control",
            "no-store, no-cache, must-revalidate, proxy-revalidate",
        ))
        .add(("Pragma", "no-cache"))
        .add(("Expires", "0"))
}

/// Configure stats routes
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/stats").route(web::get().to(get_stats)));
}
