//! Core domain entities.
//!
//! - [`Link`] - A short alias pointing at a target URL
//! - [`Click`] - A recorded visit of a link
//! - [`Visitor`] - Request metadata stored with a click
//!
//! Creation and update inputs live next to their entity:
//! `NewLink`, `LinkUpdate`, `NewClick`.

pub mod click;
pub mod link;

pub use click::{Click, ClickWithLink, NewClick, Visitor};
pub use link::{Link, LinkUpdate, LinkWithClicks, NewLink};
