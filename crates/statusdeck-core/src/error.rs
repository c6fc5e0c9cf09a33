// ── Core error types ──
//
// User-facing errors from statusdeck-core. Only ad-hoc queries surface
// these; view operations log failures and report an `Outcome` instead.
// The `From<statusdeck_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Request rejected by backend (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Translate an API error for a lookup of one entity, so a missing
    /// record reports which one.
    pub(crate) fn from_lookup(
        err: statusdeck_api::Error,
        entity_type: &str,
        identifier: impl ToString,
    ) -> Self {
        if err.is_not_found() {
            CoreError::NotFound {
                entity_type: entity_type.into(),
                identifier: identifier.to_string(),
            }
        } else {
            err.into()
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<statusdeck_api::Error> for CoreError {
    fn from(err: statusdeck_api::Error) -> Self {
        match err {
            statusdeck_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            statusdeck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            statusdeck_api::Error::Api { status, message } if (400..500).contains(&status) => {
                CoreError::Rejected { status, message }
            }
            statusdeck_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            statusdeck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_become_rejections() {
        let err: CoreError = statusdeck_api::Error::Api {
            status: 400,
            message: "Bad Request: Invalid server ID".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Rejected { status: 400, .. }));
    }

    #[test]
    fn lookup_maps_missing_record_to_not_found() {
        let err = CoreError::from_lookup(
            statusdeck_api::Error::Api {
                status: 500,
                message: "Internal Server Error: Server not found with id: 9".into(),
            },
            "server",
            9,
        );
        match err {
            CoreError::NotFound {
                entity_type,
                identifier,
            } => {
                assert_eq!(entity_type, "server");
                assert_eq!(identifier, "9");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn server_errors_stay_api_errors() {
        let err: CoreError = statusdeck_api::Error::Api {
            status: 503,
            message: "unavailable".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: Some(503), .. }));
    }
}
