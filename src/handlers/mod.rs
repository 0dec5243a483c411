pub mod stats;

#[cfg(test)]
mod stats_http_tests;

pub use stats::{api_headers, configure_stats_routes};
