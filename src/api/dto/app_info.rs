//! DTOs for the public informational routes.

use serde::Serialize;

/// Accepted values and default of one query parameter.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QueryParamDoc {
    pub name: &'static str,
    pub accepted: &'static [&'static str],
    pub default: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LicenseInfo {
    pub name: &'static str,
    pub url: &'static str,
}

/// Package metadata baked in at compile time.
#[derive(Debug, Serialize)]
pub struct AppMeta {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub authors: Vec<&'static str>,
    pub repository: &'static str,
    pub license: LicenseInfo,
}

impl AppMeta {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            authors: env!("CARGO_PKG_AUTHORS")
                .split(':')
                .filter(|a| !a.is_empty())
                .collect(),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: LicenseInfo {
                name: "MIT",
                url: "/LICENSE",
            },
        }
    }
}

/// One entry of the route index.
#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub access: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub query: &'static [QueryParamDoc],
}

#[derive(Debug, Serialize)]
pub struct AppInfo {
    pub app: AppMeta,
    pub api: Vec<RouteInfo>,
}

#[derive(Debug, Serialize)]
pub struct ApiWelcome {
    pub message: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_from_package() {
        let meta = AppMeta::current();

        assert_eq!(meta.name, "bitlie");
        assert_eq!(meta.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(meta.license.url, "/LICENSE");
    }

    #[test]
    fn test_route_info_omits_empty_query() {
        let info = RouteInfo {
            method: "GET",
            path: "/api/stats",
            access: "bearer",
            description: "Runtime and aggregate stats",
            query: &[],
        };

        let value = serde_json::to_value(info).unwrap();

        assert!(value.get("query").is_none());
    }
}
