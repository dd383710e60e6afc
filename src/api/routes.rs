//! The route table.
//!
//! Every endpoint is declared once as a [`RouteEntry`]. The router is built
//! by iterating the table, and `GET /` renders the same table as its index,
//! so the two cannot drift apart.

use axum::handler::Handler;
use axum::routing::{MethodFilter, MethodRouter, on};

use crate::api::dto::app_info::{QueryParamDoc, RouteInfo};
use crate::api::dto::query::BinaryFlag;
use crate::api::handlers::{
    api_welcome_handler, create_link_handler, delete_click_handler, delete_link_handler,
    delete_links_handler, get_link_handler, license_handler, list_clicks_handler,
    list_links_handler, redirect_handler, root_handler, stats_handler, update_link_handler,
};
use crate::domain::listing::{ClickSortField, LinkSortField};
use crate::state::AppState;

/// Who may call a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Requires `Authorization: Bearer <token>`.
    Bearer,
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Bearer => "bearer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Put => MethodFilter::PUT,
            Verb::Delete => MethodFilter::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

/// One endpoint: where it lives, who may call it and what answers it.
pub struct RouteEntry {
    pub verb: Verb,
    pub path: &'static str,
    pub access: Access,
    pub description: &'static str,
    pub query: &'static [QueryParamDoc],
    pub handler: MethodRouter<AppState>,
}

impl RouteEntry {
    fn new<H, T>(verb: Verb, path: &'static str, access: Access, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            verb,
            path,
            access,
            description: "",
            query: &[],
            handler: on(verb.filter(), handler),
        }
    }

    fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    fn query(mut self, query: &'static [QueryParamDoc]) -> Self {
        self.query = query;
        self
    }

    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            method: self.verb.as_str(),
            path: self.path,
            access: self.access.as_str(),
            description: self.description,
            query: self.query,
        }
    }
}

const ORDER: QueryParamDoc = QueryParamDoc {
    name: "order",
    accepted: &["asc", "desc"],
    default: "asc",
};

const LIST_LINKS_QUERY: &[QueryParamDoc] = &[
    QueryParamDoc {
        name: "sort_by",
        accepted: LinkSortField::ACCEPTED,
        default: "createdAt",
    },
    ORDER,
    QueryParamDoc {
        name: "with_clicks",
        accepted: BinaryFlag::ACCEPTED,
        default: "0",
    },
];

const LIST_CLICKS_QUERY: &[QueryParamDoc] = &[
    QueryParamDoc {
        name: "sort_by",
        accepted: ClickSortField::ACCEPTED,
        default: "createdAt",
    },
    ORDER,
    QueryParamDoc {
        name: "limit",
        accepted: &["1-1000"],
        default: "100",
    },
    QueryParamDoc {
        name: "with_links",
        accepted: BinaryFlag::ACCEPTED,
        default: "0",
    },
];

const CREATE_LINK_QUERY: &[QueryParamDoc] = &[QueryParamDoc {
    name: "refetch",
    accepted: BinaryFlag::ACCEPTED,
    default: "0",
}];

const REDIRECT_QUERY: &[QueryParamDoc] = &[QueryParamDoc {
    name: "nc",
    accepted: BinaryFlag::ACCEPTED,
    default: "0",
}];

/// All routes of the service.
///
/// Static paths (`/api`, `/LICENSE`) take precedence over `/{alias}`.
pub fn route_table() -> Vec<RouteEntry> {
    use Access::{Bearer, Public};
    use Verb::{Delete, Get, Post, Put};

    vec![
        RouteEntry::new(Get, "/", Public, root_handler)
            .describe("Application metadata and this route index"),
        RouteEntry::new(Get, "/api", Public, api_welcome_handler).describe("API welcome"),
        RouteEntry::new(Get, "/LICENSE", Public, license_handler).describe("License text"),
        RouteEntry::new(Get, "/{alias}", Public, redirect_handler)
            .describe("Redirect to the link target and record a click")
            .query(REDIRECT_QUERY),
        RouteEntry::new(Get, "/api/links", Bearer, list_links_handler)
            .describe("List links with click counts")
            .query(LIST_LINKS_QUERY),
        RouteEntry::new(Post, "/api/links", Bearer, create_link_handler)
            .describe("Create a link")
            .query(CREATE_LINK_QUERY),
        RouteEntry::new(Delete, "/api/links", Bearer, delete_links_handler)
            .describe("Delete several links"),
        RouteEntry::new(Get, "/api/links/{id}", Bearer, get_link_handler)
            .describe("Get a link"),
        RouteEntry::new(Put, "/api/links/{id}", Bearer, update_link_handler)
            .describe("Replace a link"),
        RouteEntry::new(Delete, "/api/links/{id}", Bearer, delete_link_handler)
            .describe("Delete a link and its clicks"),
        RouteEntry::new(Get, "/api/clicks", Bearer, list_clicks_handler)
            .describe("List clicks")
            .query(LIST_CLICKS_QUERY),
        RouteEntry::new(Delete, "/api/clicks/{id}", Bearer, delete_click_handler)
            .describe("Delete a click"),
        RouteEntry::new(Get, "/api/stats", Bearer, stats_handler)
            .describe("Runtime and aggregate statistics"),
    ]
}

/// The route table as rendered by `GET /`.
pub fn route_index() -> Vec<RouteInfo> {
    route_table().iter().map(RouteEntry::info).collect()
}
