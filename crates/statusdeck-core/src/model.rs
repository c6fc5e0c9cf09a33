// ── Domain model ──
//
// Canonical types for servers, status checks and the request counter.
// `Display` on each type is the one-line rendering used by every
// surface (CLI plain output, TUI list rows).

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Ids ──────────────────────────────────────────────────────────────

/// Backend-assigned server identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(i64);

/// Backend-assigned status check identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusId(i64);

macro_rules! impl_id {
    ($ty:ident) => {
        impl $ty {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $ty {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_id!(ServerId);
impl_id!(StatusId);

// ── Entities ─────────────────────────────────────────────────────────

/// A monitored server. Only `name` is mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub id: ServerId,
    pub name: String,
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The stored result of probing a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCheck {
    pub id: StatusId,
    pub url: String,
    pub is_available: bool,
    pub message: String,
}

impl StatusCheck {
    pub fn availability(&self) -> &'static str {
        if self.is_available {
            "Available"
        } else {
            "Unavailable"
        }
    }
}

impl fmt::Display for StatusCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.url, self.availability(), self.message)
    }
}

/// The backend's global request counter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RequestCount(pub u64);

impl fmt::Display for RequestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn status(available: bool, message: &str) -> StatusCheck {
        StatusCheck {
            id: StatusId::new(1),
            url: "http://x".into(),
            is_available: available,
            message: message.into(),
        }
    }

    #[test]
    fn unavailable_status_line() {
        assert_eq!(
            status(false, "timeout").to_string(),
            "http://x - Unavailable (timeout)"
        );
    }

    #[test]
    fn available_status_line() {
        assert_eq!(status(true, "up").to_string(), "http://x - Available (up)");
    }

    #[test]
    fn server_renders_as_name() {
        let s = Server {
            id: ServerId::new(3),
            name: "alpha".into(),
        };
        assert_eq!(s.to_string(), "alpha");
    }

    #[test]
    fn request_count_renders_raw() {
        assert_eq!(RequestCount(0).to_string(), "0");
        assert_eq!(RequestCount(42).to_string(), "42");
    }

    #[test]
    fn status_serializes_with_wire_names() {
        let value = serde_json::to_value(status(true, "up")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "url": "http://x", "isAvailable": true, "message": "up"})
        );
    }
}
