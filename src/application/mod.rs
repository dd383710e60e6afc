//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls
//! and business rules. Services consume repository traits and provide a clean
//! API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link CRUD with alias checks
//! - [`services::click_service::ClickService`] - Click listing and deletion
//! - [`services::redirect_service::RedirectService`] - Alias resolution and click recording
//! - [`services::auth_service::AuthService`] - API token authentication
//! - [`services::stats_service::StatsService`] - Runtime and aggregate statistics

pub mod services;
