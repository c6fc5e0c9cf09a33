// Wire types for the server status checker API.
//
// Field names follow the backend's JSON (camelCase). Unknown fields,
// such as the `statuses` array nested in server records, are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// A server record from `/servers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResponse {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// A status check record from `/server-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    /// Serialized as `isAvailable`; bean-style builds emit `available`.
    #[serde(rename = "isAvailable", alias = "available", default)]
    pub is_available: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

/// Body for `POST /servers` and `PUT /servers/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerBody {
    pub name: String,
}

/// One entry of the `POST /server-status/bulk` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheckBody {
    pub url: String,
}

/// Owning server of a new status check, by id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRef {
    pub id: i64,
}

/// Body for `POST /server-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCreateBody {
    pub url: String,
    pub server: ServerRef,
}

/// Body for `PUT /server-status/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateBody {
    pub url: String,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    pub message: String,
}

/// Decode `null` and absent strings as `""`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_accepts_both_availability_spellings() {
        let a: StatusResponse = serde_json::from_value(json!({
            "id": 1, "url": "http://x", "isAvailable": true, "message": "ok"
        }))
        .unwrap();
        let b: StatusResponse = serde_json::from_value(json!({
            "id": 1, "url": "http://x", "available": true, "message": "ok"
        }))
        .unwrap();
        assert!(a.is_available);
        assert_eq!(a, b);
    }

    #[test]
    fn status_null_message_decodes_empty() {
        let s: StatusResponse = serde_json::from_value(json!({
            "id": 3, "url": "http://y", "isAvailable": false, "message": null
        }))
        .unwrap();
        assert_eq!(s.message, "");
    }

    #[test]
    fn server_ignores_nested_statuses() {
        let s: ServerResponse = serde_json::from_value(json!({
            "id": 7, "name": "alpha", "statuses": [{"id": 1}]
        }))
        .unwrap();
        assert_eq!(s.id, 7);
        assert_eq!(s.name, "alpha");
    }

    #[test]
    fn create_body_nests_server_id() {
        let body = StatusCreateBody {
            url: "http://x".into(),
            server: ServerRef { id: 4 },
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"url": "http://x", "server": {"id": 4}})
        );
    }

    #[test]
    fn update_body_uses_wire_names() {
        let body = StatusUpdateBody {
            url: "http://x".into(),
            is_available: false,
            message: "down".into(),
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"url": "http://x", "isAvailable": false, "message": "down"})
        );
    }
}
