// ── API → domain conversions ──

use statusdeck_api::{ServerResponse, StatusResponse};

use crate::model::{Server, ServerId, StatusCheck, StatusId};

impl From<ServerResponse> for Server {
    fn from(raw: ServerResponse) -> Self {
        Self {
            id: ServerId::new(raw.id),
            name: raw.name,
        }
    }
}

impl From<StatusResponse> for StatusCheck {
    fn from(raw: StatusResponse) -> Self {
        Self {
            id: StatusId::new(raw.id),
            url: raw.url,
            is_available: raw.is_available,
            message: raw.message,
        }
    }
}
