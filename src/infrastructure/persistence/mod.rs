//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime and mapped through private `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, listing and batch deletion
//! - [`PgClickRepository`] - Click recording and listing
//! - [`PgTokenRepository`] - API token storage and lookup

pub mod pg_click_repository;
pub mod pg_link_repository;
pub mod pg_token_repository;
mod rows;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_token_repository::PgTokenRepository;
