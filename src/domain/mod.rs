//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Link, Click and their creation/update inputs
//! - [`listing`] - Sort fields and list queries shared by API and storage
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer does not depend on infrastructure or presentation layers.
//! Repository traits are implemented in [`crate::infrastructure`].
//!
//! # Redirect Flow
//!
//! 1. Handler resolves the alias through [`repositories::LinkRepository`]
//! 2. Unless suppressed, a [`entities::NewClick`] is written through
//!    [`repositories::ClickRepository`] before the redirect is sent

pub mod entities;
pub mod listing;
pub mod repositories;
