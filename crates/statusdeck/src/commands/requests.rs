//! Request counter command handlers.

use statusdeck_core::SyncClient;

use crate::cli::{GlobalOpts, RequestsArgs, RequestsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &SyncClient,
    args: RequestsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RequestsCommand::Count => {
            util::settle(client.read_request_count().await, "requests count")?;
        }

        RequestsCommand::Reset => {
            if !util::confirm("Reset the request counter?", "requests reset", global.yes)? {
                return Ok(());
            }
            util::settle(client.reset_request_count().await, "requests reset")?;
        }
    }

    // A successful read always leaves a value behind.
    if let Some(count) = client.request_count() {
        let color = output::should_color(global.color());
        let out = output::render_count(global.output(), count, color);
        output::print_output(&out, global.quiet);
    }
    Ok(())
}
