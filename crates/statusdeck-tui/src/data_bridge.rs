//! Data bridge: forwards view changes from the [`SyncClient`] into the
//! TUI action channel.
//!
//! Panels never read the client directly; every redraw is driven by an
//! `*Updated` action sent from here.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use statusdeck_core::SyncClient;

use crate::action::Action;

/// Push the current views, then forward every change until cancelled.
pub async fn spawn_data_bridge(
    client: SyncClient,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut servers = client.servers();
    let mut statuses = client.statuses();
    let mut request_count = client.request_count_stream();

    let _ = action_tx.send(Action::ServersUpdated(servers.current().clone()));
    let _ = action_tx.send(Action::StatusesUpdated(statuses.current().clone()));
    let _ = action_tx.send(Action::RequestCountUpdated(*request_count.current()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(s) = servers.changed() => {
                debug!(count = s.len(), "dispatching ServersUpdated");
                let _ = action_tx.send(Action::ServersUpdated(s));
            }
            Some(s) = statuses.changed() => {
                debug!(count = s.len(), "dispatching StatusesUpdated");
                let _ = action_tx.send(Action::StatusesUpdated(s));
            }
            Some(c) = request_count.changed() => {
                let _ = action_tx.send(Action::RequestCountUpdated(c));
            }
            else => break,
        }
    }

    debug!("data bridge stopped");
}
