use axum::{
    extract::State,
    Json,
};
use serde::Serialize;
use std::sync::atomic::Ordering;
use crate::config::ErrorPolicy;
use crate::http::server::AppState;
use crate::store::StoreError;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
    pub proxied_requests: usize,
}

#[derive(Serialize)]
pub struct ServiceStatus {
    pub name: &'static str,
    pub base_url: String,
    pub error_policy: ErrorPolicy,
}

#[derive(Serialize)]
pub struct RewriteStatus {
    pub name: String,
    pub path_prefix: String,
    pub target: String,
}

#[derive(Serialize)]
pub struct ServicesSummary {
    pub services: Vec<ServiceStatus>,
    pub rewrites: Vec<RewriteStatus>,
}

#[derive(Serialize)]
pub struct StoreSummary {
    pub accounts: usize,
    pub appointments: usize,
    pub session: Option<String>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_secs: state.inner.started_at.elapsed().as_secs(),
        proxied_requests: state.inner.request_count.load(Ordering::Relaxed),
    })
}

pub async fn get_services(State(state): State<AppState>) -> Json<ServicesSummary> {
    let services = state
        .inner
        .upstreams
        .iter()
        .map(|s| ServiceStatus {
            name: s.name(),
            base_url: s.base_url.to_string(),
            error_policy: s.error_policy,
        })
        .collect();

    let rewrites = state
        .inner
        .rewrites
        .rules()
        .iter()
        .map(|r| RewriteStatus {
            name: r.name.clone(),
            path_prefix: r.prefix().to_string(),
            target: r.target().to_string(),
        })
        .collect();

    Json(ServicesSummary { services, rewrites })
}

pub async fn get_stores(State(state): State<AppState>) -> Result<Json<StoreSummary>, StoreError> {
    Ok(Json(StoreSummary {
        accounts: state.inner.accounts.all_accounts()?.len(),
        appointments: state.inner.appointments.all()?.len(),
        session: state.inner.session.current()?.map(|u| u.email),
    }))
}
