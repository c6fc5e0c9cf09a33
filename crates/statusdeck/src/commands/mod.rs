//! Command handlers, one module per top-level subcommand.

pub mod config_cmd;
pub mod overview;
pub mod requests;
pub mod servers;
pub mod statuses;
pub mod util;

use statusdeck_core::SyncClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &SyncClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Overview => overview::handle(client, global).await,
        Command::Servers(args) => servers::handle(client, args, global).await,
        Command::Status(args) => statuses::handle(client, args, global).await,
        Command::Requests(args) => requests::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
