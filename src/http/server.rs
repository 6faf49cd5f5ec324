//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, timeout)
//! - Build shared state (upstreams, client, rewrite table, stores)
//! - Bind server to listener and drain on shutdown

use axum::{
    http::HeaderMap,
    middleware,
    response::Response,
    routing::{get, patch, post},
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Semaphore};
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::GatewayConfig;
use crate::http::middleware::limits::concurrency_limit;
use crate::http::request::{request_id, MakeGatewayRequestId};
use crate::http::{demo, locations, notifications, rewrite, users};
use crate::lifecycle::startup::{open_storage, StartupError};
use crate::proxy::{ProxyCall, ServiceKind, UpstreamClient, Upstreams};
use crate::routing::RewriteTable;
use crate::store::{AccountStore, AppointmentStore, SessionStore};

/// Everything handlers share. Immutable apart from the stores' own locks.
pub struct InnerState {
    pub config: GatewayConfig,
    pub upstreams: Upstreams,
    pub client: UpstreamClient,
    pub rewrites: RewriteTable,
    pub accounts: AccountStore,
    pub appointments: AppointmentStore,
    pub session: SessionStore,
    pub started_at: Instant,
    pub request_count: AtomicUsize,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<InnerState>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self, StartupError> {
        let upstreams = Upstreams::from_config(&config.services)?;
        let client = UpstreamClient::new(&config.timeouts, config.security.max_upstream_body_size);
        let rewrites = RewriteTable::from_config(&config.rewrites);

        let storage = open_storage(&config.store);
        let accounts = AccountStore::new(storage.clone());
        let appointments = AppointmentStore::new(storage.clone());
        let session = SessionStore::new(storage);

        Ok(Self {
            inner: Arc::new(InnerState {
                config,
                upstreams,
                client,
                rewrites,
                accounts,
                appointments,
                session,
                started_at: Instant::now(),
                request_count: AtomicUsize::new(0),
            }),
        })
    }

    /// Run `call` against the `kind` upstream, propagating the request id.
    pub async fn forward(&self, kind: ServiceKind, call: ProxyCall<'_>, headers: &HeaderMap) -> Response {
        self.inner.request_count.fetch_add(1, Ordering::Relaxed);
        call.send(self.inner.upstreams.get(kind), &self.inner.client, request_id(headers))
            .await
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, StartupError> {
        let state = AppState::new(config)?;
        let router = Self::build_router(state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(state: AppState) -> Router {
        let config = &state.inner.config;
        let permits = Arc::new(Semaphore::new(config.listener.max_connections));

        let mut router = Router::new()
            .route("/api/users", get(users::list_users).post(users::create_user))
            .route("/api/users/login", post(users::login))
            .route("/api/users/logout", post(users::logout))
            .route("/api/users/nickname/generate", post(users::generate_nickname))
            .route("/api/users/{user_id}", get(users::get_user).delete(users::delete_user))
            .route(
                "/api/locations",
                get(locations::list_locations).post(locations::create_location),
            )
            .route(
                "/api/locations/{location_id}",
                get(locations::get_location).delete(locations::delete_location),
            )
            .route(
                "/api/notifications",
                get(notifications::list_notifications).post(notifications::create_notification),
            )
            .route("/api/notifications/{id}", get(notifications::get_notification))
            .route(
                "/api/notifications/{id}/guests/{guest_id}/guest_status",
                patch(notifications::update_guest_status),
            )
            .merge(demo::router());

        if config.admin.enabled {
            router = router.merge(admin::router(state.clone()));
        }

        router
            .fallback(rewrite::rewrite_handler)
            .with_state(state.clone())
            .layer(middleware::from_fn_with_state(permits, concurrency_limit))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(SetRequestIdLayer::x_request_id(MakeGatewayRequestId))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            user = %self.state.inner.upstreams.user.base_url,
            location = %self.state.inner.upstreams.location.base_url,
            notification = %self.state.inner.upstreams.notification.base_url,
            rewrites = self.state.inner.rewrites.rules().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
