//! Rewrite routing subsystem.
//!
//! Explicit proxy routes are axum routes. Everything else under `/api`
//! falls through to the rewrite table.
//!
//! # Data Flow
//! ```text
//! Unmatched request (path, query)
//!     → router.rs (rule lookup)
//!     → matcher.rs (evaluate prefix)
//!     → Return: matched RewriteRule or NoMatch
//!
//! Rule Compilation (at startup):
//!     RewriteConfig[]
//!     → Drop rules without a target
//!     → Sort by prefix length
//!     → Freeze as immutable RewriteTable
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same rule

pub mod matcher;
pub mod router;

pub use router::{RewriteRule, RewriteTable};
