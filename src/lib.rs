//! CoffeeChat API gateway library.
//!
//! Proxies the front-end's `/api` routes to the user, location and
//! notification services, and hosts the demo account/appointment stores.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod seed;
pub mod store;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
