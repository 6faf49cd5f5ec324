//! Request-path middleware.

pub mod limits;
