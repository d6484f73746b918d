//! [`StreamGate`] – the startup decision of which streams are wired.
//!
//! The gate runs once, against the immutable [`Config`], and decides per
//! stream whether its adapter is attached to the bus.  The decision table
//! per stream is:
//!
//! 1. `interface.type != "socket"` → stream disabled.  This is the normal
//!    "disabled by operator" path, not an error: the engine is writing the
//!    stream somewhere this bridge cannot read.
//! 2. `interface.type == "socket"` but `format != "json"` → fatal
//!    [`AurisError::Configuration`] naming the stream.  The adapters
//!    support no other encoding, so startup must abort for manual fix.
//! 3. `socket` + `json` → stream enabled.
//!
//! A disabled stream stays disabled for the process lifetime; there is no
//! runtime reconfiguration.

use auris_types::AurisError;

use crate::config::{Config, StreamConfig};

/// Result of evaluating the configuration: one enabled flag per stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamGate {
    pub localization_enabled: bool,
    pub tracking_enabled: bool,
}

impl StreamGate {
    /// Evaluate the configuration document.
    ///
    /// # Errors
    ///
    /// [`AurisError::Configuration`] when an enabled stream declares an
    /// encoding other than `json`.
    pub fn evaluate(config: &Config) -> Result<StreamGate, AurisError> {
        Ok(StreamGate {
            localization_enabled: Self::verify_stream("localization", &config.localization)?,
            tracking_enabled: Self::verify_stream("tracking", &config.tracking)?,
        })
    }

    fn verify_stream(name: &str, stream: &StreamConfig) -> Result<bool, AurisError> {
        if stream.interface.kind != "socket" {
            return Ok(false);
        }
        if stream.format != "json" {
            return Err(AurisError::Configuration {
                stream: name.to_string(),
                message: "format must be json".to_string(),
            });
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InterfaceConfig;

    fn stream(kind: &str, format: &str) -> StreamConfig {
        StreamConfig {
            interface: InterfaceConfig {
                kind: kind.to_string(),
            },
            format: format.to_string(),
        }
    }

    fn config(localization: StreamConfig, tracking: StreamConfig) -> Config {
        Config {
            localization,
            tracking,
        }
    }

    #[test]
    fn socket_json_enables_both_streams() {
        let gate =
            StreamGate::evaluate(&config(stream("socket", "json"), stream("socket", "json")))
                .unwrap();
        assert!(gate.localization_enabled);
        assert!(gate.tracking_enabled);
    }

    #[test]
    fn non_socket_interface_disables_stream_regardless_of_format() {
        for format in ["json", "csv", ""] {
            let gate = StreamGate::evaluate(&config(
                stream("file", format),
                stream("socket", "json"),
            ))
            .unwrap();
            assert!(!gate.localization_enabled, "format={format:?}");
            assert!(gate.tracking_enabled);
        }
    }

    #[test]
    fn socket_with_non_json_format_is_fatal_and_names_the_stream() {
        let result =
            StreamGate::evaluate(&config(stream("socket", "csv"), stream("socket", "json")));
        match result {
            Err(AurisError::Configuration { stream, message }) => {
                assert_eq!(stream, "localization");
                assert_eq!(message, "format must be json");
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn tracking_format_error_names_tracking() {
        let result =
            StreamGate::evaluate(&config(stream("socket", "json"), stream("socket", "binary")));
        match result {
            Err(AurisError::Configuration { stream, .. }) => assert_eq!(stream, "tracking"),
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn both_streams_disabled_is_a_valid_outcome() {
        let gate =
            StreamGate::evaluate(&config(stream("file", "csv"), stream("terminal", "binary")))
                .unwrap();
        assert!(!gate.localization_enabled);
        assert!(!gate.tracking_enabled);
    }
}
