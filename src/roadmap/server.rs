use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::api::{self, AppState};
use super::db::{DbHandle, RoadmapDb};

/// Configuration for the roadmap server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: std::path::PathBuf,
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3142,
            db_path: std::path::PathBuf::from(".feedbackhub/hub.db"),
            dev_mode: false,
        }
    }
}

/// Build the full application router with request tracing.
pub fn build_router(state: Arc<AppState>, dev_mode: bool) -> Router {
    let mut app = api::api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if dev_mode {
        app = app.layer(CorsLayer::permissive());
    }
    app
}

/// Open the database, creating its parent directory when needed.
pub fn open_database(db_path: &std::path::Path) -> Result<RoadmapDb> {
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }
    RoadmapDb::new(db_path).context("Failed to initialize roadmap database")
}

/// Start the roadmap server.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let db = open_database(&config.db_path)?;
    let state = Arc::new(AppState {
        db: DbHandle::new(db),
    });
    let app = build_router(state, config.dev_mode);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!(
        %local_addr,
        db_path = %config.db_path.display(),
        dev_mode = config.dev_mode,
        "FeedbackHub roadmap service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router(dev_mode: bool) -> Router {
        let db = RoadmapDb::new_in_memory().unwrap();
        let state = Arc::new(AppState {
            db: DbHandle::new(db),
        });
        build_router(state, dev_mode)
    }

    #[tokio::test]
    async fn test_health_via_full_router() {
        let app = test_router(false);
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = test_router(false);
        let req = Request::builder()
            .uri("/api/nope")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dev_mode_adds_cors_headers() {
        let app = test_router(true);
        let req = Request::builder()
            .uri("/health")
            .header("origin", "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(
            resp.headers()
                .contains_key("access-control-allow-origin")
        );
    }

    #[tokio::test]
    async fn test_api_create_org_via_full_router() {
        let app = test_router(false);
        let req = Request::builder()
            .method("POST")
            .uri("/api/orgs")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({"name": "server-test"}).to_string(),
            ))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let org: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(org["name"], "server-test");
    }

    #[test]
    fn test_open_database_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/hub.db");
        open_database(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3142);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(
            config.db_path,
            std::path::PathBuf::from(".feedbackhub/hub.db")
        );
        assert!(!config.dev_mode);
    }
}
