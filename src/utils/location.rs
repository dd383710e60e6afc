//! Encoding of redirect targets for the `Location` header.

use std::fmt::Write as _;

/// Percent-encodes every byte of `url` that is not visible ASCII.
///
/// Existing `%XX` sequences and reserved characters are left alone, so an
/// already encoded URL passes through unchanged.
pub fn encode_location(url: &str) -> String {
    let mut out = String::with_capacity(url.len());

    for byte in url.bytes() {
        if byte.is_ascii_graphic() {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }

    out
}
