//! JSON text-frame decoding.
//!
//! The stream gate only ever enables a stream whose transport is `socket`
//! and whose encoding is `json`, so the socket reader hands the bridge one
//! JSON text frame per cycle.  Decode failures are per-event and
//! recoverable: the caller logs and drops the frame.

use auris_types::{AurisError, SslFrame, SstFrame};

/// Decode one localization cycle from its JSON text frame.
pub fn decode_ssl_frame(text: &str) -> Result<SslFrame, AurisError> {
    serde_json::from_str(text).map_err(|e| AurisError::Parsing(format!("ssl frame: {e}")))
}

/// Decode one tracking cycle from its JSON text frame.
pub fn decode_sst_frame(text: &str) -> Result<SstFrame, AurisError> {
    serde_json::from_str(text).map_err(|e| AurisError::Parsing(format!("sst frame: {e}")))
}
