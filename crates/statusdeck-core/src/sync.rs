// ── Sync client ──
//
// Fire-and-refresh facade over the backend. Every mutation issues one
// remote call and, on success, re-fetches the owning collection and the
// request counter. Failures are logged here and never reach the caller.

use std::sync::Arc;

use statusdeck_api::{ApiClient, StatusUpdateBody, TransportConfig};
use strum::Display;
use tracing::{debug, error};

use crate::error::CoreError;
use crate::model::{RequestCount, Server, ServerId, StatusCheck, StatusId};
use crate::store::{Snapshot, ViewStore, snapshot_of};
use crate::stream::ViewStream;

// ── Outcome ──────────────────────────────────────────────────────────

/// What a sync operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// The call succeeded; mutations also issued their refreshes.
    Applied,
    /// Blank input, nothing was sent.
    Skipped,
    /// A read succeeded but a newer refresh of the same view won.
    Superseded,
    /// The call failed. The error has already been logged.
    Failed,
}

impl Outcome {
    pub fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }

    /// `Failed` if any part failed, otherwise `Applied`.
    fn all(outcomes: &[Outcome]) -> Self {
        if outcomes.iter().any(|o| o.is_failed()) {
            Self::Failed
        } else {
            Self::Applied
        }
    }
}

/// Trim `input`, returning `None` when nothing is left.
pub fn non_blank(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn failed(operation: &'static str, err: &statusdeck_api::Error) -> Outcome {
    error!(operation, error = %err, "remote call failed");
    Outcome::Failed
}

fn skipped(operation: &'static str) -> Outcome {
    debug!(operation, "blank input, skipping");
    Outcome::Skipped
}

fn superseded(view: &'static str) -> Outcome {
    debug!(view, "stale refresh discarded");
    Outcome::Superseded
}

// ── SyncClient ───────────────────────────────────────────────────────

/// Resource sync client.
///
/// Cheaply cloneable via `Arc<SyncInner>`. Overlapping calls are not
/// serialized; each view keeps whichever refresh was issued last.
#[derive(Clone)]
pub struct SyncClient {
    inner: Arc<SyncInner>,
}

struct SyncInner {
    api: ApiClient,
    store: ViewStore,
}

impl SyncClient {
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(SyncInner {
                api,
                store: ViewStore::new(),
            }),
        }
    }

    /// Client for the fixed local backend address.
    pub fn localhost(transport: &TransportConfig) -> Result<Self, CoreError> {
        Ok(Self::new(ApiClient::localhost(transport)?))
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn store(&self) -> &ViewStore {
        &self.inner.store
    }

    // ── View accessors ───────────────────────────────────────────────

    pub fn servers_snapshot(&self) -> Snapshot<Server> {
        self.inner.store.servers()
    }

    pub fn statuses_snapshot(&self) -> Snapshot<StatusCheck> {
        self.inner.store.statuses()
    }

    pub fn request_count(&self) -> Option<RequestCount> {
        self.inner.store.request_count()
    }

    /// Servers view, or `None` if no refresh of it has succeeded yet.
    pub fn loaded_servers(&self) -> Option<Snapshot<Server>> {
        self.inner.store.loaded_servers()
    }

    /// Statuses view, or `None` if no refresh of it has succeeded yet.
    pub fn loaded_statuses(&self) -> Option<Snapshot<StatusCheck>> {
        self.inner.store.loaded_statuses()
    }

    pub fn servers(&self) -> ViewStream<Snapshot<Server>> {
        self.inner.store.subscribe_servers()
    }

    pub fn statuses(&self) -> ViewStream<Snapshot<StatusCheck>> {
        self.inner.store.subscribe_statuses()
    }

    pub fn request_count_stream(&self) -> ViewStream<Option<RequestCount>> {
        self.inner.store.subscribe_request_count()
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch all servers and replace the servers view.
    pub async fn list_servers(&self) -> Outcome {
        let view = &self.inner.store.servers;
        let ticket = view.begin();
        match self.inner.api.list_servers().await {
            Ok(items) => {
                if view.apply(ticket, snapshot_of(items)) {
                    Outcome::Applied
                } else {
                    superseded("servers")
                }
            }
            Err(e) => failed("list_servers", &e),
        }
    }

    /// Fetch all status checks and replace the statuses view.
    pub async fn list_statuses(&self) -> Outcome {
        let view = &self.inner.store.statuses;
        let ticket = view.begin();
        match self.inner.api.list_statuses().await {
            Ok(items) => {
                if view.apply(ticket, snapshot_of(items)) {
                    Outcome::Applied
                } else {
                    superseded("statuses")
                }
            }
            Err(e) => failed("list_statuses", &e),
        }
    }

    /// Fetch the request counter.
    pub async fn read_request_count(&self) -> Outcome {
        let view = &self.inner.store.request_count;
        let ticket = view.begin();
        match self.inner.api.request_count().await {
            Ok(count) => {
                if view.apply(ticket, Some(RequestCount(count))) {
                    Outcome::Applied
                } else {
                    superseded("request_count")
                }
            }
            Err(e) => failed("read_request_count", &e),
        }
    }

    /// Initial load: all three reads, concurrently.
    pub async fn bootstrap(&self) -> Outcome {
        let (servers, statuses, count) = tokio::join!(
            self.list_servers(),
            self.list_statuses(),
            self.read_request_count()
        );
        Outcome::all(&[servers, statuses, count])
    }

    // ── Server mutations ─────────────────────────────────────────────

    pub async fn create_server(&self, name: &str) -> Outcome {
        let Some(name) = non_blank(name) else {
            return skipped("create_server");
        };
        match self.inner.api.create_server(name).await {
            Ok(created) => debug!(id = created.id, "server created"),
            Err(e) => return failed("create_server", &e),
        }
        self.refresh_servers().await;
        Outcome::Applied
    }

    pub async fn update_server(&self, id: ServerId, name: &str) -> Outcome {
        let Some(name) = non_blank(name) else {
            return skipped("update_server");
        };
        if let Err(e) = self.inner.api.update_server(id.get(), name).await {
            return failed("update_server", &e);
        }
        self.refresh_servers().await;
        Outcome::Applied
    }

    pub async fn delete_server(&self, id: ServerId) -> Outcome {
        if let Err(e) = self.inner.api.delete_server(id.get()).await {
            return failed("delete_server", &e);
        }
        self.refresh_servers().await;
        Outcome::Applied
    }

    // ── Status mutations ─────────────────────────────────────────────

    /// Ask the backend to check `url` and store the result.
    pub async fn check_status(&self, url: &str) -> Outcome {
        let Some(url) = non_blank(url) else {
            return skipped("check_status");
        };
        match self.inner.api.check_status(url).await {
            Ok(status) => debug!(id = status.id, available = status.is_available, "status checked"),
            Err(e) => return failed("check_status", &e),
        }
        self.refresh_statuses().await;
        Outcome::Applied
    }

    /// Check several URLs in one call. Blank entries are dropped.
    pub async fn check_statuses<I, S>(&self, urls: I) -> Outcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<String> = urls
            .into_iter()
            .filter_map(|u| non_blank(u.as_ref()).map(str::to_owned))
            .collect();
        if urls.is_empty() {
            return skipped("check_statuses");
        }
        match self.inner.api.check_statuses(&urls).await {
            Ok(checked) => debug!(count = checked.len(), "statuses checked"),
            Err(e) => return failed("check_statuses", &e),
        }
        self.refresh_statuses().await;
        Outcome::Applied
    }

    /// Store a status check for `url` under `server` without running it.
    pub async fn create_status(&self, server: ServerId, url: &str) -> Outcome {
        let Some(url) = non_blank(url) else {
            return skipped("create_status");
        };
        match self.inner.api.create_status(server.get(), url).await {
            Ok(created) => debug!(id = created.id, server = %server, "status created"),
            Err(e) => return failed("create_status", &e),
        }
        self.refresh_statuses().await;
        Outcome::Applied
    }

    /// Overwrite a stored status check.
    pub async fn update_status(
        &self,
        id: StatusId,
        url: &str,
        is_available: bool,
        message: &str,
    ) -> Outcome {
        let Some(url) = non_blank(url) else {
            return skipped("update_status");
        };
        let body = StatusUpdateBody {
            url: url.to_owned(),
            is_available,
            message: message.to_owned(),
        };
        if let Err(e) = self.inner.api.update_status(id.get(), &body).await {
            return failed("update_status", &e);
        }
        self.refresh_statuses().await;
        Outcome::Applied
    }

    pub async fn delete_status(&self, id: StatusId) -> Outcome {
        if let Err(e) = self.inner.api.delete_status(id.get()).await {
            return failed("delete_status", &e);
        }
        self.refresh_statuses().await;
        Outcome::Applied
    }

    pub async fn reset_request_count(&self) -> Outcome {
        if let Err(e) = self.inner.api.reset_request_count().await {
            return failed("reset_request_count", &e);
        }
        self.read_request_count().await;
        Outcome::Applied
    }

    // ── Ad-hoc queries ───────────────────────────────────────────────

    /// Fetch one server. Does not touch the views.
    pub async fn get_server(&self, id: ServerId) -> Result<Server, CoreError> {
        self.inner
            .api
            .get_server(id.get())
            .await
            .map(Server::from)
            .map_err(|e| CoreError::from_lookup(e, "server", id))
    }

    /// Fetch one status check. Does not touch the views.
    pub async fn get_status(&self, id: StatusId) -> Result<StatusCheck, CoreError> {
        self.inner
            .api
            .get_status(id.get())
            .await
            .map(StatusCheck::from)
            .map_err(|e| CoreError::from_lookup(e, "status check", id))
    }

    /// Status checks attached to the named server. Blank names yield
    /// an empty list without a call.
    pub async fn statuses_by_server(&self, name: &str) -> Result<Vec<StatusCheck>, CoreError> {
        let Some(name) = non_blank(name) else {
            debug!("blank server name, skipping");
            return Ok(Vec::new());
        };
        let items = self
            .inner
            .api
            .statuses_by_server(name)
            .await
            .map_err(|e| CoreError::from_lookup(e, "server", name))?;
        Ok(items.into_iter().map(StatusCheck::from).collect())
    }

    // ── Refresh helpers ──────────────────────────────────────────────

    async fn refresh_servers(&self) {
        tokio::join!(self.list_servers(), self.read_request_count());
    }

    async fn refresh_statuses(&self) {
        tokio::join!(self.list_statuses(), self.read_request_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank("  alpha \n"), Some("alpha"));
        assert_eq!(non_blank("\t "), None);
        assert_eq!(non_blank(""), None);
    }

    #[test]
    fn outcome_display_is_snake_case() {
        assert_eq!(Outcome::Applied.to_string(), "applied");
        assert_eq!(Outcome::Superseded.to_string(), "superseded");
    }

    #[test]
    fn any_failure_fails_the_batch() {
        assert_eq!(
            Outcome::all(&[Outcome::Applied, Outcome::Failed, Outcome::Superseded]),
            Outcome::Failed
        );
        assert_eq!(
            Outcome::all(&[Outcome::Applied, Outcome::Superseded]),
            Outcome::Applied
        );
    }
}
