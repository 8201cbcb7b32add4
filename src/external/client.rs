use std::time::Duration;

use anyhow::Context;

use crate::config::settings::ApiConfig;

/// Build the HTTP client used for every call to the player service.
///
/// One client is built per process and cloned into whatever needs it, so
/// connections to the service are pooled.
///
/// # Features
/// - **Timeouts**: request and connect timeouts from `[api]`
/// - **Compression**: gzip, deflate, brotli and zstd responses
/// - **HTTP/2**: adaptive window and keep-alive when the server offers it
/// - **User-Agent**: `roster-dash/<version>`
pub fn build_http_client(config: &ApiConfig) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        // Compression
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(user_agent())
        .build()
        .context("Failed to build HTTP client")
}

fn user_agent() -> String {
    format!("roster-dash/{}", crate::pkg_version())
}
