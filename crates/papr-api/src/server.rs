//! HTTP server setup and configuration

use std::net::{IpAddr, SocketAddr};

use axum::Router;
use papr_core::ApiConfig;
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::create_router;
use crate::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Create the full application router with middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Resolve the socket address the server listens on
pub fn socket_addr(config: &ApiConfig) -> Result<SocketAddr, ServerError> {
    let ip: IpAddr = config
        .bind_address
        .parse()
        .map_err(|_| ServerError::InvalidBindAddress(config.bind_address.clone()))?;
    Ok(SocketAddr::new(ip, config.port))
}

/// Start the HTTP server
pub async fn start_server(state: AppState) -> Result<(), ServerError> {
    let addr = socket_addr(&state.config().await.api)?;
    let app = create_app(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr_from_config() {
        let addr = socket_addr(&ApiConfig::default()).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:19054");
    }

    #[test]
    fn test_invalid_bind_address() {
        let config = ApiConfig {
            bind_address: "localhost:80".to_string(),
            port: 1,
        };
        assert!(matches!(
            socket_addr(&config),
            Err(ServerError::InvalidBindAddress(_))
        ));
    }
}
