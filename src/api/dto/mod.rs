//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies use Serde for decoding and validator for field rules.
//! Query parameters are parsed by hand so every bad value gets its own
//! field error. Responses serialize with camelCase keys.

pub mod app_info;
pub mod click;
pub mod envelope;
pub mod link;
pub mod query;
pub mod stats;
