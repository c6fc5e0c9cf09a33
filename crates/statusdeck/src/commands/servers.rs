//! Server command handlers.

use statusdeck_core::{Server, ServerId, SyncClient};

use crate::cli::{GlobalOpts, ServersArgs, ServersCommand};
use crate::error::CliError;
use crate::output;

use super::util::{self, Views};

fn detail(server: &Server) -> String {
    format!("ID:   {}\nName: {}", server.id, server.name)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &SyncClient,
    args: ServersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ServersCommand::List => {
            util::settle(client.list_servers().await, "servers list")?;
            let out = output::render_servers(global.output(), &client.servers_snapshot());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::Get { id } => {
            let server = client.get_server(ServerId::new(id)).await?;
            let out =
                output::render_single(global.output(), &server, detail, ToString::to_string);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::Add { name } => {
            if util::settle(client.create_server(&name).await, "servers add")? {
                util::print_views(client, Views::Servers, global);
            }
            Ok(())
        }

        ServersCommand::Rename { id, name } => {
            let outcome = client.update_server(ServerId::new(id), &name).await;
            if util::settle(outcome, "servers rename")? {
                util::print_views(client, Views::Servers, global);
            }
            Ok(())
        }

        ServersCommand::Delete { id } => {
            if !util::confirm(&format!("Delete server {id}?"), "servers delete", global.yes)? {
                return Ok(());
            }
            util::settle(client.delete_server(ServerId::new(id)).await, "servers delete")?;
            util::print_views(client, Views::Servers, global);
            Ok(())
        }
    }
}
