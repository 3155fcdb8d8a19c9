use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{http::HeaderValue, Router};
use configs::AppConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{runtime, CartStore, ProductStore};

/// Only the configured origin is echoed back; any header, any method.
pub fn build_cors(allowed_origin: &str) -> Result<CorsLayer, StartupError> {
    let origin = HeaderValue::from_str(allowed_origin)
        .map_err(|e| StartupError::InvalidConfig(format!("cors.allowed_origin: {e}")))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Wire both file stores from the storage section.
pub fn build_state(cfg: &AppConfig) -> AppState {
    AppState {
        products: Arc::new(ProductStore::new(cfg.storage.products_path())),
        cart: Arc::new(CartStore::new(cfg.storage.cart_path())),
    }
}

/// Build the complete app for a validated configuration.
pub fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let cors = build_cors(&cfg.cors.allowed_origin)?;
    Ok(routes::build_router(build_state(cfg), cors))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: build the app and serve until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime::ensure_env(&cfg.storage.data_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let app = build_app(&cfg)?;

    let addr = bind_addr(&cfg)?;
    info!(
        %addr,
        products = %cfg.storage.products_path().display(),
        cart = %cfg.storage.cart_path().display(),
        allowed_origin = %cfg.cors.allowed_origin,
        "starting shop api"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("shop api stopped");
    Ok(())
}
