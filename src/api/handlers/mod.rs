//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod clicks;
pub mod links;
pub mod redirect;
pub mod root;
pub mod stats;

pub use clicks::{delete_click_handler, list_clicks_handler};
pub use links::{
    create_link_handler, delete_link_handler, delete_links_handler, get_link_handler,
    list_links_handler, update_link_handler,
};
pub use redirect::redirect_handler;
pub use root::{api_welcome_handler, license_handler, not_found_handler, root_handler};
pub use stats::stats_handler;
