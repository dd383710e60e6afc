//! Record id generation.

use base64::Engine as _;
use rand::Rng;

/// Length of random bytes before base64 encoding.
const ID_LENGTH_BYTES: usize = 9;

/// Generates a random opaque id.
///
/// Entropy comes from the OS via `getrandom`, falling back to the thread
/// local CSPRNG if the OS source is unavailable. The bytes are encoded as
/// URL-safe base64 without padding, producing a 12-character id.
///
/// # Examples
///
/// ```ignore
/// let id = generate_id();
/// assert_eq!(id.len(), 12);
/// ```
pub fn generate_id() -> String {
    let mut buffer = [0u8; ID_LENGTH_BYTES];

    if getrandom::fill(&mut buffer).is_err() {
        rand::rng().fill(&mut buffer);
    }

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
