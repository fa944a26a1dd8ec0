//! Text form of salts and derived keys: standard base64 alphabet, no padding.
//!
//! Records written by earlier releases use exactly this encoding, as do the
//! salt and hash segments of PHC strings, so both must stay byte-identical.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;

use crate::error::{Error, Result};

pub fn encode(bytes: &[u8]) -> String {
    STANDARD_NO_PAD.encode(bytes)
}

/// Decode one stored field. `field` names it in the resulting error.
pub fn decode(field: &'static str, text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(Error::malformed(field, "empty value"));
    }

    STANDARD_NO_PAD
        .decode(text)
        .map_err(|e| Error::malformed(field, e.to_string()))
}
