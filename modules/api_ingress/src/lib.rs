//! HTTP host for the service: owns the listener, the cross-cutting middleware
//! stack, the service-level endpoints and the `/openapi.json` document.

use std::future::Future;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
pub mod security;
pub mod web;

pub use config::ApiIngressConfig;

#[derive(Debug, Clone, Default)]
pub struct ApiIngress {
    cfg: ApiIngressConfig,
}

impl ApiIngress {
    pub const NAME: &'static str = "api_ingress";

    pub fn new(cfg: ApiIngressConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.cfg
    }

    /// Wrap the module routes with the host endpoints and middleware.
    ///
    /// Runtime order, outermost first:
    /// PropagateRequestId -> SetRequestId -> push_req_id_to_extensions -> Trace
    /// -> security headers -> CORS -> Timeout -> BodyLimit -> handler
    ///
    /// CORS preflights and timeouts answer from inside the security header layers.
    pub fn build_router(
        &self,
        routes: Router,
        openapi: Option<utoipa::openapi::OpenApi>,
    ) -> Result<Router> {
        tracing::debug!("Building router");
        let mut router = routes
            .route("/health", get(web::health_check))
            .route("/", get(web::index).options(web::index_options));

        if self.cfg.enable_docs {
            if let Some(doc) = openapi {
                // Build once, serve as static JSON
                let body = Arc::new(doc.to_json().context("serialize OpenAPI document")?);
                router = router.route(
                    "/openapi.json",
                    get(move || {
                        let body = body.clone();
                        async move {
                            (
                                [
                                    (header::CONTENT_TYPE, "application/json"),
                                    (header::CACHE_CONTROL, "no-store"),
                                ],
                                (*body).clone(),
                            )
                                .into_response()
                        }
                    }),
                );
            }
        }

        router = router.fallback(web::not_found);

        // Router::layer wraps everything added so far, so layers go on innermost first.
        // Body extractors carry their own 2 MiB cap; the configured limit replaces it.
        router = router
            .layer(DefaultBodyLimit::max(self.cfg.body_limit_bytes))
            .layer(RequestBodyLimitLayer::new(self.cfg.body_limit_bytes));

        if self.cfg.request_timeout_secs > 0 {
            router = router.layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(self.cfg.request_timeout_secs),
            ));
        }

        if self.cfg.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        if self.cfg.security_headers {
            for layer in security::security_header_layers() {
                router = router.layer(layer);
            }
        }

        let x_request_id = request_id::header();
        router = router
            .layer(request_id::create_trace_layer())
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                request_id::MakeReqId,
            ))
            .layer(PropagateRequestIdLayer::new(x_request_id));

        Ok(router)
    }

    /// `bind_addr` from the config wins over the server host/port.
    pub fn bind_addr(&self, host: &str, port: u16) -> Result<SocketAddr> {
        let raw = match &self.cfg.bind_addr {
            Some(addr) => addr.clone(),
            None => format!("{host}:{port}"),
        };
        raw.to_socket_addrs()
            .with_context(|| format!("Invalid bind address '{raw}'"))?
            .next()
            .ok_or_else(|| anyhow::anyhow!("Bind address '{raw}' resolved to nothing"))
    }

    /// Bind and serve until `shutdown` resolves; in-flight requests are drained.
    pub async fn serve<F>(&self, router: Router, addr: SocketAddr, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("bind {addr}"))?;
        tracing::info!("HTTP server bound on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("HTTP server shutting down gracefully");
            })
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
