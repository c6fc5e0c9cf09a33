// ── Ticketed view ──
//
// A single published value guarded by a request ticket. Each refresh
// takes a ticket before it calls the backend; only a response carrying
// a ticket newer than the one already applied may replace the value.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// Monotonic refresh ticket, issued before the remote call starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Ticket(u64);

/// A published value together with the ticket that produced it.
#[derive(Debug, Clone)]
pub(crate) struct Stamped<S> {
    pub(crate) ticket: u64,
    pub(crate) value: S,
}

pub(crate) struct View<S: Clone + Send + Sync + 'static> {
    /// Last ticket handed out.
    issued: AtomicU64,

    /// Current value, stamped with the ticket of the refresh that set it.
    state: watch::Sender<Stamped<S>>,
}

impl<S: Clone + Send + Sync + 'static> View<S> {
    pub(crate) fn new(initial: S) -> Self {
        let (state, _) = watch::channel(Stamped {
            ticket: 0,
            value: initial,
        });
        Self {
            issued: AtomicU64::new(0),
            state,
        }
    }

    /// Take the next ticket. Call before issuing the remote request.
    pub(crate) fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Replace the value if `ticket` is newer than the applied one.
    /// Returns `false` when a later-issued refresh already landed.
    pub(crate) fn apply(&self, ticket: Ticket, value: S) -> bool {
        // `send_if_modified` updates even with zero receivers.
        self.state.send_if_modified(|current| {
            if ticket.0 > current.ticket {
                *current = Stamped {
                    ticket: ticket.0,
                    value,
                };
                true
            } else {
                false
            }
        })
    }

    pub(crate) fn current(&self) -> S {
        self.state.borrow().value.clone()
    }

    /// The value, unless nothing has been applied since construction.
    pub(crate) fn loaded(&self) -> Option<S> {
        let state = self.state.borrow();
        (state.ticket > 0).then(|| state.value.clone())
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Stamped<S>> {
        self.state.subscribe()
    }
}
