//! Upstream service descriptors.

use serde::Serialize;
use url::Url;

use crate::config::schema::{ErrorPolicy, ServiceConfig, ServicesConfig};
use crate::proxy::error::ProxyError;

/// The service families reached through explicit proxy routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    User,
    Location,
    Notification,
}

impl ServiceKind {
    /// Name used in client-facing error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            ServiceKind::User => "User Service",
            ServiceKind::Location => "Location Service",
            ServiceKind::Notification => "Notification Service",
        }
    }

    /// Short label for logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            ServiceKind::User => "user",
            ServiceKind::Location => "location",
            ServiceKind::Notification => "notification",
        }
    }

    /// Relay policy when the config leaves it unset.
    pub fn default_policy(self) -> ErrorPolicy {
        match self {
            ServiceKind::User | ServiceKind::Location => ErrorPolicy::Wrap,
            ServiceKind::Notification => ErrorPolicy::Passthrough,
        }
    }
}

/// A configured upstream: where it lives and how its errors are relayed.
#[derive(Debug, Clone)]
pub struct UpstreamService {
    pub kind: ServiceKind,
    pub base_url: Url,
    pub error_policy: ErrorPolicy,
}

impl UpstreamService {
    pub fn from_config(kind: ServiceKind, config: &ServiceConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            kind,
            base_url: Url::parse(&config.base_url)?,
            error_policy: config.error_policy.unwrap_or_else(|| kind.default_policy()),
        })
    }

    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    /// `{"error": ...}` text for transport failures.
    pub fn connect_failure_message(&self) -> String {
        format!("{}에 연결할 수 없습니다", self.name())
    }

    /// `{"error": ...}` text wrapping a raw upstream rejection.
    pub fn rejection_message(&self, upstream_text: &str) -> String {
        format!("{} Error: {}", self.name(), upstream_text)
    }

    /// Base URL extended by `segments`, each percent-encoded as one path
    /// segment, plus `query` pairs.
    pub fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ProxyError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ProxyError::InvalidUri(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

/// All upstream services, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Upstreams {
    pub user: UpstreamService,
    pub location: UpstreamService,
    pub notification: UpstreamService,
}

impl Upstreams {
    pub fn from_config(config: &ServicesConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            user: UpstreamService::from_config(ServiceKind::User, &config.user)?,
            location: UpstreamService::from_config(ServiceKind::Location, &config.location)?,
            notification: UpstreamService::from_config(
                ServiceKind::Notification,
                &config.notification,
            )?,
        })
    }

    pub fn get(&self, kind: ServiceKind) -> &UpstreamService {
        match kind {
            ServiceKind::User => &self.user,
            ServiceKind::Location => &self.location,
            ServiceKind::Notification => &self.notification,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpstreamService> {
        [&self.user, &self.location, &self.notification].into_iter()
    }
}
