//! Visitor metadata read from request headers.

use axum::http::{HeaderMap, HeaderName, header};
use std::net::SocketAddr;

/// Client hint header carrying the visitor's operating system.
pub static SEC_CH_UA_PLATFORM: HeaderName = HeaderName::from_static("sec-ch-ua-platform");

/// Forwarding header set by reverse proxies.
pub static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Resolves the visitor IP address.
///
/// The first entry of the first `X-Forwarded-For` header wins. Without it
/// the transport peer address is used, and `None` is returned if that is
/// unknown too.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = headers
        .get(&X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    match forwarded {
        Some(ip) => Some(ip.to_string()),
        None => peer.map(|addr| addr.ip().to_string()),
    }
}

/// Returns a header value as an owned string, verbatim.
///
/// Values that are not valid visible ASCII are treated as absent.
pub fn header_string(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// `User-Agent`, verbatim.
pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    header_string(headers, &header::USER_AGENT)
}

/// `Referer`, verbatim.
pub fn referer(headers: &HeaderMap) -> Option<String> {
    header_string(headers, &header::REFERER)
}

/// Platform from `Sec-CH-UA-Platform` with all double quotes removed.
pub fn platform(headers: &HeaderMap) -> Option<String> {
    header_string(headers, &SEC_CH_UA_PLATFORM).map(|p| p.replace('"', ""))
}
