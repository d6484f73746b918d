//! Typed configuration for the bridge node.
//!
//! The configuration document mirrors the acoustic engine's own stream
//! setup: two sections, `localization` and `tracking`, each declaring the
//! transport (`interface.type`) and encoding (`format`) of that stream.
//! It is read once at startup and immutable afterwards; the schema is
//! validated by serde at load time so the gate operates on typed fields
//! rather than dynamic lookups.
//!
//! ```toml
//! [localization]
//! format = "json"
//! [localization.interface]
//! type = "socket"
//!
//! [tracking]
//! format = "json"
//! [tracking.interface]
//! type = "socket"
//! ```

use auris_types::AurisError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Transport declaration of one stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InterfaceConfig {
    /// Transport type, e.g. "socket", "file", "terminal".  Only "socket"
    /// streams are consumed by this bridge.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Configuration of one acoustic stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreamConfig {
    pub interface: InterfaceConfig,
    /// Encoding of the stream, e.g. "json".  The adapters support no other
    /// encoding.
    pub format: String,
}

/// The full configuration document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub localization: StreamConfig,
    pub tracking: StreamConfig,
}

impl Config {
    /// Load the configuration from a TOML file.
    ///
    /// Any I/O or schema failure is fatal at startup: there is no default
    /// substitution for a missing or malformed document.
    pub fn load_from(path: &Path) -> Result<Config, AurisError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AurisError::ConfigLoad(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|e| AurisError::ConfigLoad(format!("failed to parse {}: {e}", path.display())))
    }
}
