// Status check endpoints: `/server-status`
//
// Also hosts the global request counter, which the backend exposes
// under the same prefix.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    ServerRef, StatusCheckBody, StatusCreateBody, StatusResponse, StatusUpdateBody,
};

impl ApiClient {
    /// List every stored status check.
    ///
    /// `GET /server-status`
    pub async fn list_statuses(&self) -> Result<Vec<StatusResponse>, Error> {
        let url = self.api_url("server-status")?;
        self.get(url).await
    }

    /// Fetch a single status check.
    ///
    /// `GET /server-status/{id}`
    pub async fn get_status(&self, id: i64) -> Result<StatusResponse, Error> {
        let url = self.api_url(&format!("server-status/{id}"))?;
        self.get(url).await
    }

    /// Ask the backend to check `target` and store the result.
    ///
    /// `GET /server-status/check?url=...`
    pub async fn check_status(&self, target: &str) -> Result<StatusResponse, Error> {
        let url = self.api_url_with_query("server-status/check", "url", target)?;
        debug!(target, "checking status");
        self.get(url).await
    }

    /// Check several URLs in one request.
    ///
    /// `POST /server-status/bulk` with `[{"url": "..."}, ...]`
    pub async fn check_statuses(&self, targets: &[String]) -> Result<Vec<StatusResponse>, Error> {
        let url = self.api_url("server-status/bulk")?;
        debug!(count = targets.len(), "checking statuses in bulk");
        let body: Vec<StatusCheckBody> = targets
            .iter()
            .map(|t| StatusCheckBody { url: t.clone() })
            .collect();
        self.post(url, &body).await
    }

    /// Store a status check for `target` under the given server without
    /// probing it.
    ///
    /// `POST /server-status` with `{"url": "...", "server": {"id": N}}`
    pub async fn create_status(
        &self,
        server_id: i64,
        target: &str,
    ) -> Result<StatusResponse, Error> {
        let url = self.api_url("server-status")?;
        debug!(server_id, target, "creating status");
        let body = StatusCreateBody {
            url: target.into(),
            server: ServerRef { id: server_id },
        };
        self.post(url, &body).await
    }

    /// Overwrite a stored status check.
    ///
    /// `PUT /server-status/{id}` with `{"url", "isAvailable", "message"}`
    pub async fn update_status(
        &self,
        id: i64,
        body: &StatusUpdateBody,
    ) -> Result<StatusResponse, Error> {
        let url = self.api_url(&format!("server-status/{id}"))?;
        debug!(id, "updating status");
        self.put(url, body).await
    }

    /// Delete a status check.
    ///
    /// `DELETE /server-status/{id}`
    pub async fn delete_status(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("server-status/{id}"))?;
        debug!(id, "deleting status");
        self.delete(url).await
    }

    /// Status checks attached to the server with the given name.
    ///
    /// `GET /server-status/statuses-by-server?serverName=...`
    pub async fn statuses_by_server(&self, server_name: &str) -> Result<Vec<StatusResponse>, Error> {
        let url = self.api_url_with_query(
            "server-status/statuses-by-server",
            "serverName",
            server_name,
        )?;
        self.get(url).await
    }

    // ── Request counter ──────────────────────────────────────────────

    /// Read the global request counter (a bare JSON number).
    ///
    /// `GET /server-status/request-count`
    pub async fn request_count(&self) -> Result<u64, Error> {
        let url = self.api_url("server-status/request-count")?;
        self.get(url).await
    }

    /// Zero the global request counter.
    ///
    /// `POST /server-status/request-count/reset`
    pub async fn reset_request_count(&self) -> Result<(), Error> {
        let url = self.api_url("server-status/request-count/reset")?;
        debug!("resetting request count");
        self.post_empty(url).await
    }
}
