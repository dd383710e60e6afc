//! HTTP middleware for authentication and observability.

pub mod auth;
pub mod tracing;
