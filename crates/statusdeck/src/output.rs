//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one rendered entry per line.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use statusdeck_core::{RequestCount, Server, Snapshot, StatusCheck};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().cyan().to_string()
    } else {
        text.to_owned()
    }
}

/// A status line with the availability word colored when enabled.
pub fn status_line(status: &StatusCheck, color: bool) -> String {
    if !color {
        return status.to_string();
    }
    let state = if status.is_available {
        status.availability().green().to_string()
    } else {
        status.availability().red().to_string()
    };
    format!("{} - {state} ({})", status.url, status.message)
}

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct ServerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Arc<Server>> for ServerRow {
    fn from(s: &Arc<Server>) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct StatusRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "State")]
    state: &'static str,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&Arc<StatusCheck>> for StatusRow {
    fn from(s: &Arc<StatusCheck>) -> Self {
        Self {
            id: s.id.to_string(),
            url: s.url.clone(),
            state: s.availability(),
            message: s.message.clone(),
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `line_fn` on each item to emit one line per entry
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    line_fn: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&line_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    line_fn: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => line_fn(data),
    }
}

pub fn render_servers(format: OutputFormat, servers: &[Arc<Server>]) -> String {
    render_list(format, servers, |s| ServerRow::from(s), ToString::to_string)
}

pub fn render_statuses(format: OutputFormat, statuses: &[Arc<StatusCheck>], color: bool) -> String {
    render_list(
        format,
        statuses,
        |s| StatusRow::from(s),
        |s| status_line(s, color),
    )
}

pub fn render_count(format: OutputFormat, count: RequestCount, color: bool) -> String {
    render_single(
        format,
        &count,
        |c| format!("{} {c}", heading("Requests:", color)),
        ToString::to_string,
    )
}

// ── Combined views ───────────────────────────────────────────────────

/// The views printed after a mutation or by `overview`. Absent views
/// are left out of every format.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Snapshot<Server>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Snapshot<StatusCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_count: Option<RequestCount>,
}

pub fn render_report(format: OutputFormat, report: &ViewReport, color: bool) -> String {
    match format {
        OutputFormat::Json => render_json(report, false),
        OutputFormat::JsonCompact => render_json(report, true),
        OutputFormat::Yaml => render_yaml(report),
        OutputFormat::Table => {
            let mut sections = Vec::new();
            if let Some(servers) = &report.servers {
                sections.push(format!(
                    "{}\n{}",
                    heading("Servers", color),
                    render_servers(format, servers)
                ));
            }
            if let Some(statuses) = &report.statuses {
                sections.push(format!(
                    "{}\n{}",
                    heading("Status checks", color),
                    render_statuses(format, statuses, color)
                ));
            }
            if let Some(count) = report.request_count {
                sections.push(render_count(format, count, color));
            }
            sections.join("\n\n")
        }
        OutputFormat::Plain => {
            let mut lines = Vec::new();
            if let Some(servers) = &report.servers {
                lines.extend(servers.iter().map(ToString::to_string));
            }
            if let Some(statuses) = &report.statuses {
                lines.extend(statuses.iter().map(|s| status_line(s, color)));
            }
            if let Some(count) = report.request_count {
                lines.push(count.to_string());
            }
            lines.join("\n")
        }
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use statusdeck_core::{ServerId, StatusId};

    fn servers() -> Vec<Arc<Server>> {
        vec![
            Arc::new(Server {
                id: ServerId::new(1),
                name: "alpha".into(),
            }),
            Arc::new(Server {
                id: ServerId::new(2),
                name: "beta".into(),
            }),
        ]
    }

    fn statuses() -> Vec<Arc<StatusCheck>> {
        vec![Arc::new(StatusCheck {
            id: StatusId::new(1),
            url: "http://x".into(),
            is_available: false,
            message: "timeout".into(),
        })]
    }

    #[test]
    fn plain_servers_are_names() {
        assert_eq!(render_servers(OutputFormat::Plain, &servers()), "alpha\nbeta");
    }

    #[test]
    fn plain_statuses_use_canonical_line() {
        assert_eq!(
            render_statuses(OutputFormat::Plain, &statuses(), false),
            "http://x - Unavailable (timeout)"
        );
    }

    #[test]
    fn empty_plain_list_is_empty() {
        assert_eq!(render_servers(OutputFormat::Plain, &[]), "");
    }

    #[test]
    fn empty_table_keeps_header() {
        let out = render_servers(OutputFormat::Table, &[]);
        assert!(out.contains("Name"));
    }

    #[test]
    fn compact_json_list() {
        assert_eq!(
            render_servers(OutputFormat::JsonCompact, &servers()),
            r#"[{"id":1,"name":"alpha"},{"id":2,"name":"beta"}]"#
        );
    }

    #[test]
    fn count_renders_raw_in_plain_and_json() {
        assert_eq!(render_count(OutputFormat::Plain, RequestCount(0), false), "0");
        assert_eq!(render_count(OutputFormat::JsonCompact, RequestCount(7), false), "7");
    }

    #[test]
    fn report_skips_absent_views() {
        let report = ViewReport {
            servers: Some(Arc::new(servers())),
            statuses: None,
            request_count: Some(RequestCount(3)),
        };
        assert_eq!(
            render_report(OutputFormat::JsonCompact, &report, false),
            r#"{"servers":[{"id":1,"name":"alpha"},{"id":2,"name":"beta"}],"requestCount":3}"#
        );
        assert_eq!(render_report(OutputFormat::Plain, &report, false), "alpha\nbeta\n3");
    }

    #[test]
    fn colored_status_line_keeps_text() {
        let line = status_line(&statuses()[0], true);
        assert!(line.contains("http://x"));
        assert!(line.contains("Unavailable"));
        assert!(line.contains("(timeout)"));
    }
}
