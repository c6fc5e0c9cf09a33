//! Status check command handlers.

use std::sync::Arc;

use statusdeck_core::{ServerId, StatusCheck, StatusId, SyncClient};

use crate::cli::{GlobalOpts, StatusArgs, StatusCommand};
use crate::error::CliError;
use crate::output;

use super::util::{self, Views};

fn detail(status: &StatusCheck) -> String {
    format!(
        "ID:      {}\nURL:     {}\nState:   {}\nMessage: {}",
        status.id,
        status.url,
        status.availability(),
        status.message
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &SyncClient,
    args: StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color());

    match args.command {
        StatusCommand::List => {
            util::settle(client.list_statuses().await, "status list")?;
            let out =
                output::render_statuses(global.output(), &client.statuses_snapshot(), color);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StatusCommand::Get { id } => {
            let status = client.get_status(StatusId::new(id)).await?;
            let out = output::render_single(global.output(), &status, detail, |s| {
                output::status_line(s, color)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StatusCommand::Check { urls } => {
            let outcome = match urls.as_slice() {
                [url] => client.check_status(url).await,
                _ => client.check_statuses(&urls).await,
            };
            if util::settle(outcome, "status check")? {
                util::print_views(client, Views::Statuses, global);
            }
            Ok(())
        }

        StatusCommand::Add { server, url } => {
            let outcome = client.create_status(ServerId::new(server), &url).await;
            if util::settle(outcome, "status add")? {
                util::print_views(client, Views::Statuses, global);
            }
            Ok(())
        }

        StatusCommand::Update {
            id,
            url,
            available,
            unavailable: _,
            message,
        } => {
            let outcome = client
                .update_status(StatusId::new(id), &url, available, &message)
                .await;
            if util::settle(outcome, "status update")? {
                util::print_views(client, Views::Statuses, global);
            }
            Ok(())
        }

        StatusCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete status check {id}?"),
                "status delete",
                global.yes,
            )? {
                return Ok(());
            }
            util::settle(client.delete_status(StatusId::new(id)).await, "status delete")?;
            util::print_views(client, Views::Statuses, global);
            Ok(())
        }

        StatusCommand::ByServer { name } => {
            let statuses: Vec<Arc<StatusCheck>> = client
                .statuses_by_server(&name)
                .await?
                .into_iter()
                .map(Arc::new)
                .collect();
            let out = output::render_statuses(global.output(), &statuses, color);
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
