//! Utility functions for id generation, URL checks and request metadata.
//!
//! - [`id_generator`] - Random opaque record ids
//! - [`url_pattern`] - Target URL acceptance rules
//! - [`location`] - `Location` header encoding
//! - [`client`] - Visitor metadata from request headers
//! - [`db_error`] - Classification of database errors

pub mod client;
pub mod db_error;
pub mod id_generator;
pub mod location;
pub mod url_pattern;
