//! Overview: the three startup reads, rendered together.

use statusdeck_core::SyncClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util::{self, Views};

pub async fn handle(client: &SyncClient, global: &GlobalOpts) -> Result<(), CliError> {
    util::settle(client.bootstrap().await, "overview")?;
    util::print_views(client, Views::All, global);
    Ok(())
}
