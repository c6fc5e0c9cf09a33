// ── View store ──
//
// One ticketed view per remote collection, plus the request counter.
// Views are only ever replaced wholesale by a refresh.

mod view;

use std::sync::Arc;

use crate::model::{RequestCount, Server, StatusCheck};
use crate::stream::ViewStream;

pub(crate) use view::{Stamped, View};

/// An immutable list snapshot, cheap to clone and share with renderers.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// Local mirror of the backend's collections.
///
/// Each view starts empty (the counter unknown) and holds whatever the most recently
/// issued successful refresh returned.
pub struct ViewStore {
    pub(crate) servers: View<Snapshot<Server>>,
    pub(crate) statuses: View<Snapshot<StatusCheck>>,
    pub(crate) request_count: View<Option<RequestCount>>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self {
            servers: View::new(Arc::new(Vec::new())),
            statuses: View::new(Arc::new(Vec::new())),
            request_count: View::new(None),
        }
    }

    pub fn servers(&self) -> Snapshot<Server> {
        self.servers.current()
    }

    pub fn statuses(&self) -> Snapshot<StatusCheck> {
        self.statuses.current()
    }

    /// Like [`servers`](Self::servers), but `None` until the first
    /// successful refresh, so an unloaded view is not mistaken for an
    /// empty collection.
    pub fn loaded_servers(&self) -> Option<Snapshot<Server>> {
        self.servers.loaded()
    }

    pub fn loaded_statuses(&self) -> Option<Snapshot<StatusCheck>> {
        self.statuses.loaded()
    }

    /// `None` until the first successful read.
    pub fn request_count(&self) -> Option<RequestCount> {
        self.request_count.current()
    }

    pub fn subscribe_servers(&self) -> ViewStream<Snapshot<Server>> {
        ViewStream::new(self.servers.subscribe())
    }

    pub fn subscribe_statuses(&self) -> ViewStream<Snapshot<StatusCheck>> {
        ViewStream::new(self.statuses.subscribe())
    }

    pub fn subscribe_request_count(&self) -> ViewStream<Option<RequestCount>> {
        ViewStream::new(self.request_count.subscribe())
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a fetched list into a snapshot, keeping backend order.
pub(crate) fn snapshot_of<T, R>(items: Vec<R>) -> Snapshot<T>
where
    R: Into<T>,
{
    Arc::new(items.into_iter().map(|r| Arc::new(r.into())).collect())
}
