// ── Reactive view streams ──
//
// Subscription handle for consuming view changes from the ViewStore.

use tokio::sync::watch;

use crate::store::Stamped;

/// A subscription to one view.
///
/// Provides both point-in-time access and reactive change notification
/// via [`changed`](Self::changed).
pub struct ViewStream<S: Clone + Send + Sync + 'static> {
    current: S,
    receiver: watch::Receiver<Stamped<S>>,
}

impl<S: Clone + Send + Sync + 'static> ViewStream<S> {
    pub(crate) fn new(receiver: watch::Receiver<Stamped<S>>) -> Self {
        let current = receiver.borrow().value.clone();
        Self { current, receiver }
    }

    /// Get the value captured at creation time (or at the last `changed()`).
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Get the latest value (may have changed since creation).
    pub fn latest(&self) -> S {
        self.receiver.borrow().value.clone()
    }

    /// Wait for the next change, returning the new value.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<S> {
        self.receiver.changed().await.ok()?;
        let value = self.receiver.borrow_and_update().value.clone();
        self.current = value.clone();
        Some(value)
    }
}
