//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, JSON body parsing)
//!     → users.rs / locations.rs / notifications.rs (explicit proxy routes)
//!     → demo.rs (local record stores)
//!     → rewrite.rs (prefix fallback, raw passthrough)
//!     → response.rs (error envelope)
//! ```

pub mod demo;
pub mod locations;
pub mod middleware;
pub mod notifications;
pub mod request;
pub mod response;
pub mod rewrite;
pub mod server;
pub mod users;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
