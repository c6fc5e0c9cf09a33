//! Shared helpers for command handlers.

use std::io::IsTerminal;

use tracing::debug;

use statusdeck_core::{Outcome, SyncClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, ViewReport};

/// Which views to print after an operation.
#[derive(Debug, Clone, Copy)]
pub enum Views {
    Servers,
    Statuses,
    All,
}

/// Turn a sync outcome into a result. `Ok(false)` means nothing was
/// sent and there is nothing to print.
pub fn settle(outcome: Outcome, operation: &str) -> Result<bool, CliError> {
    match outcome {
        Outcome::Applied | Outcome::Superseded => Ok(true),
        Outcome::Skipped => {
            debug!(operation, "nothing to do");
            Ok(false)
        }
        Outcome::Failed => Err(CliError::OperationFailed {
            operation: operation.into(),
        }),
    }
}

/// Collect the requested views. A view whose refresh never succeeded
/// is left out rather than shown as empty.
pub fn view_report(client: &SyncClient, views: Views) -> ViewReport {
    let (servers, statuses) = match views {
        Views::Servers => (true, false),
        Views::Statuses => (false, true),
        Views::All => (true, true),
    };
    ViewReport {
        servers: servers.then(|| client.loaded_servers()).flatten(),
        statuses: statuses.then(|| client.loaded_statuses()).flatten(),
        request_count: client.request_count(),
    }
}

/// Print the requested views from the client's current snapshots.
pub fn print_views(client: &SyncClient, views: Views, global: &GlobalOpts) {
    let report = view_report(client, views);
    let color = output::should_color(global.color());
    let out = output::render_report(global.output(), &report, color);
    output::print_output(&out, global.quiet);
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use statusdeck_core::TransportConfig;

    #[test]
    fn skipped_prints_nothing() {
        assert!(matches!(settle(Outcome::Skipped, "servers add"), Ok(false)));
    }

    #[test]
    fn failed_maps_to_operation_error() {
        let err = settle(Outcome::Failed, "status check").unwrap_err();
        assert!(matches!(err, CliError::OperationFailed { .. }));
    }

    #[test]
    fn unloaded_views_are_left_out() {
        let client = SyncClient::localhost(&TransportConfig::default()).unwrap();
        let report = view_report(&client, Views::All);
        assert!(report.servers.is_none());
        assert!(report.statuses.is_none());
        assert!(report.request_count.is_none());
    }

    #[test]
    fn yes_flag_skips_prompt() {
        assert!(matches!(confirm("Delete?", "delete", true), Ok(true)));
    }
}
