//! Health-check web server and keep-alive pinger.
//!
//! Free hosting tiers put idle services to sleep. The bot answers `GET /` and
//! `GET /health` with a plain `OK` and, when it knows its own public URL,
//! pings `/health` on itself every few minutes.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::core::config;
use crate::core::error::AppResult;

/// Builds the two-route health router.
pub fn health_router() -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
}

/// Start the health-check server on `0.0.0.0:<port>`.
pub async fn start_web_server(port: u16) -> AppResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Web server started on port {}", port);
    serve(listener).await
}

/// Serve the health router on an already bound listener.
pub async fn serve(listener: TcpListener) -> AppResult<()> {
    axum::serve(listener, health_router()).await?;
    Ok(())
}

/// GET / and GET /health
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Pings `<base_url>/health` once and returns the HTTP status.
pub async fn ping_once(client: &reqwest::Client, base_url: &str) -> AppResult<StatusCode> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let response = client.get(url).send().await?;
    Ok(response.status())
}

/// Runs the keep-alive loop forever.
///
/// Waits `initial_delay`, then pings every `interval`. Failures are logged
/// and never stop the loop.
pub async fn keep_alive_loop(base_url: String, initial_delay: Duration, interval: Duration) {
    let client = match reqwest::Client::builder()
        .timeout(config::network::ping_timeout())
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            log::error!("Keep-alive disabled, failed to build HTTP client: {}", e);
            return;
        }
    };

    tokio::time::sleep(initial_delay).await;
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        match ping_once(&client, &base_url).await {
            Ok(status) => log::info!("Keep-alive ping: {}", status.as_u16()),
            Err(e) => log::warn!("Keep-alive ping failed: {}", e),
        }
    }
}

/// Spawns the keep-alive loop when RENDER_EXTERNAL_URL is configured.
///
/// Returns `None` (and logs a warning) when keep-alive is disabled.
pub fn start_keep_alive() -> Option<tokio::task::JoinHandle<()>> {
    let Some(url) = config::keep_alive::EXTERNAL_URL.clone() else {
        log::warn!("RENDER_EXTERNAL_URL not set, keep-alive disabled");
        return None;
    };

    log::info!(
        "Keep-alive enabled for {} (every {}s)",
        url,
        config::keep_alive::INTERVAL_SECS
    );
    Some(tokio::spawn(keep_alive_loop(
        url,
        config::keep_alive::initial_delay(),
        config::keep_alive::interval(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener));
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_root_and_health_return_ok() {
        let base = spawn_server().await;
        let client = reqwest::Client::new();

        for path in ["/", "/health"] {
            let response = client.get(format!("{}{}", base, path)).send().await.unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::OK);
            assert_eq!(response.text().await.unwrap(), "OK");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let base = spawn_server().await;
        let response = reqwest::get(format!("{}/metrics", base)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ping_once_against_own_server() {
        let base = spawn_server().await;
        let client = reqwest::Client::new();
        // Trailing slash must not produce `//health`
        let status = ping_once(&client, &format!("{}/", base)).await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }
}
