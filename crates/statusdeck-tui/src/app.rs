//! Application core: event loop, focus handling, action dispatch.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use statusdeck_core::{RequestCount, SyncClient};

use crate::action::{Action, ConfirmAction, PanelId, SyncOp};
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Event, EventReader};
use crate::input::InputLine;
use crate::panels::{ServersPanel, StatusesPanel};
use crate::theme;
use crate::tui::Tui;

const RENDER_RATE: Duration = Duration::from_millis(33);

/// Top-level application state and event loop.
pub struct App {
    client: SyncClient,
    servers: ServersPanel,
    statuses: StatusesPanel,
    focus: PanelId,
    running: bool,
    help_visible: bool,
    input: Option<InputLine>,
    confirm: Option<ConfirmAction>,
    /// Operations spawned but not yet finished.
    pending: usize,
    request_count: Option<RequestCount>,
    tick_rate: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    data_cancel: CancellationToken,
}

impl App {
    pub fn new(client: SyncClient, tick_rate: Duration) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let mut servers = ServersPanel::default();
        servers.set_focused(true);

        Self {
            client,
            servers,
            statuses: StatusesPanel::default(),
            focus: PanelId::default(),
            running: true,
            help_visible: false,
            input: None,
            confirm: None,
            pending: 0,
            request_count: None,
            tick_rate,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::start()?;

        tokio::spawn(spawn_data_bridge(
            self.client.clone(),
            self.action_tx.clone(),
            self.data_cancel.clone(),
        ));
        self.action_tx.send(Action::Sync(SyncOp::RefreshAll))?;

        let mut events = EventReader::new(self.tick_rate, RENDER_RATE);

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if matches!(action, Action::Render | Action::Resize(..)) {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.data_cancel.cancel();
        drop(tui);
        info!("TUI event loop ended");
        Ok(())
    }

    fn focused_panel_mut(&mut self) -> &mut dyn Component {
        match self.focus {
            PanelId::Servers => &mut self.servers,
            PanelId::Statuses => &mut self.statuses,
        }
    }

    /// Map a key event to an action. Open overlays swallow keys first,
    /// then global bindings, then the focused panel.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(input) = self.input.as_mut() {
            return Ok(input.handle_key_event(key));
        }

        if self.confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
                return Ok(Some(Action::Quit));
            }
            (_, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (_, KeyCode::Tab) => return Ok(Some(Action::FocusNext)),
            (_, KeyCode::Char('r')) => return Ok(Some(Action::Sync(SyncOp::RefreshAll))),
            (_, KeyCode::Char('R')) => {
                return Ok(Some(Action::RequestConfirm(
                    ConfirmAction::ResetRequestCount,
                )));
            }
            _ => {}
        }

        self.focused_panel_mut().handle_key_event(key)
    }

    /// Apply one action to app state and propagate the rest to the panels.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Render | Action::Tick | Action::Resize(..) => {}

            Action::FocusNext => {
                self.focus = self.focus.next();
                self.servers.set_focused(self.focus == PanelId::Servers);
                self.statuses.set_focused(self.focus == PanelId::Statuses);
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::OpenInput(kind, initial) => {
                self.input = Some(InputLine::new(kind.clone(), initial.clone()));
            }
            Action::CancelInput => self.input = None,
            Action::SubmitInput(kind, value) => {
                self.input = None;
                self.action_tx
                    .send(Action::Sync(kind.clone().submit(value.clone())))?;
            }

            Action::RequestConfirm(confirm) => self.confirm = Some(confirm.clone()),
            Action::ConfirmYes => {
                if let Some(confirm) = self.confirm.take() {
                    self.action_tx.send(Action::Sync(confirm.into_op()))?;
                }
            }
            Action::ConfirmNo => self.confirm = None,

            Action::Sync(op) => {
                self.pending += 1;
                self.execute(op.clone());
            }
            Action::SyncFinished => self.pending = self.pending.saturating_sub(1),

            Action::RequestCountUpdated(count) => self.request_count = *count,

            other => {
                let panels: [&mut dyn Component; 2] = [&mut self.servers, &mut self.statuses];
                for panel in panels {
                    if let Some(follow_up) = panel.update(other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Run a remote operation in the background. The panels pick up the
    /// result through the data bridge; failures are already logged by the
    /// sync layer.
    fn execute(&self, op: SyncOp) {
        let client = self.client.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let outcome = match &op {
                SyncOp::CreateServer(name) => client.create_server(name).await,
                SyncOp::RenameServer(id, name) => client.update_server(*id, name).await,
                SyncOp::DeleteServer(id) => client.delete_server(*id).await,
                SyncOp::CheckStatus(url) => client.check_status(url).await,
                SyncOp::DeleteStatus(id) => client.delete_status(*id).await,
                SyncOp::ResetRequestCount => client.reset_request_count().await,
                SyncOp::RefreshAll => client.bootstrap().await,
            };
            debug!(%op, %outcome, "operation finished");
            let _ = tx.send(Action::SyncFinished);
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let mut constraints = vec![Constraint::Length(1), Constraint::Min(5)];
        if self.input.is_some() {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(area);

        self.render_header(frame, rows[0]);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
                .areas(rows[1]);
        self.servers.render(frame, left);
        self.statuses.render(frame, right);

        if let Some(input) = &self.input {
            input.render(frame, rows[2]);
        }
        self.render_status_bar(frame, rows[rows.len() - 1]);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
        if let Some(confirm) = &self.confirm {
            Self::render_confirm_dialog(frame, area, confirm);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let count = self
            .request_count
            .map_or_else(|| "–".to_owned(), |c| c.to_string());
        let line = Line::from(vec![
            Span::styled(" statusdeck ", theme::title_style()),
            Span::styled("│ requests served ", theme::key_hint()),
            Span::styled(count, Style::default().fg(theme::NEON_CYAN)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let activity = if self.pending == 0 {
            Span::styled("● idle", Style::default().fg(theme::SUCCESS_GREEN))
        } else {
            Span::styled(
                format!("◐ {} in flight", self.pending),
                Style::default().fg(theme::ELECTRIC_YELLOW),
            )
        };

        let panel_keys: &[(&str, &str)] = match self.focus {
            PanelId::Servers => &[("a", "add"), ("e", "rename"), ("d", "delete")],
            PanelId::Statuses => &[("a", "check url"), ("c", "recheck"), ("d", "delete")],
        };

        let mut spans = vec![Span::raw(" "), activity, Span::styled(" │", theme::key_hint())];
        for (key, label) in panel_keys
            .iter()
            .chain(&[("Tab", "switch"), ("r", "refresh"), ("?", "help"), ("q", "quit")])
        {
            spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
            spans.push(Span::styled(*label, theme::key_hint()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_area = centered(area, 52, 20);
        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::NEON_CYAN),
            ))
        };
        let entry = |key: &'static str, label: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(label, theme::key_hint()),
            ])
        };

        let text = vec![
            Line::from(""),
            section("Navigation"),
            entry("Tab", "Switch panel"),
            entry("j/k ↑/↓", "Move up/down"),
            Line::from(""),
            section("Servers"),
            entry("a", "Add server"),
            entry("e", "Rename selected"),
            entry("d", "Delete selected"),
            Line::from(""),
            section("Status checks"),
            entry("a", "Check a URL"),
            entry("c", "Re-check selected URL"),
            entry("d", "Delete selected"),
            Line::from(""),
            section("Global"),
            entry("r / R", "Refresh all / reset counter"),
            entry("q", "Quit"),
            Line::from(Span::styled("                 Esc or ? to close", theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let dialog_area = centered(area, 56, 5);
        frame.render_widget(Clear, dialog_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ELECTRIC_YELLOW));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use statusdeck_core::{Server, ServerId, TransportConfig};

    use super::*;

    fn app() -> App {
        let client = SyncClient::localhost(&TransportConfig::default()).unwrap();
        App::new(client, Duration::from_millis(250))
    }

    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app.handle_key_event(KeyEvent::from(code)).unwrap() {
            app.process_action(&action).unwrap();
        }
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn queued(app: &mut App) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = app.action_rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    fn one_server(app: &mut App) {
        let servers = Arc::new(vec![Arc::new(Server {
            id: ServerId::new(3),
            name: "alpha".into(),
        })]);
        app.process_action(&Action::ServersUpdated(servers)).unwrap();
    }

    #[test]
    fn adding_a_server_queues_create() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert!(app.input.is_some());

        type_str(&mut app, "web-01");
        press(&mut app, KeyCode::Enter);

        assert!(app.input.is_none());
        let actions = queued(&mut app);
        assert_eq!(actions.len(), 1);
        assert!(matches!(
            &actions[0],
            Action::Sync(SyncOp::CreateServer(name)) if name == "web-01"
        ));
    }

    #[test]
    fn typing_q_in_input_does_not_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        press(&mut app, KeyCode::Enter);
        assert!(matches!(
            &queued(&mut app)[..],
            [Action::Sync(SyncOp::CreateServer(name))] if name == "q"
        ));
    }

    #[test]
    fn rename_submits_against_selected_id() {
        let mut app = app();
        one_server(&mut app);
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        let actions = queued(&mut app);
        assert!(matches!(
            &actions[..],
            [Action::Sync(SyncOp::RenameServer(id, name))]
                if *id == ServerId::new(3) && name == "alph"
        ));
    }

    #[test]
    fn confirmed_delete_queues_sync() {
        let mut app = app();
        one_server(&mut app);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.confirm,
            Some(ConfirmAction::DeleteServer {
                id: ServerId::new(3),
                name: "alpha".into(),
            })
        );

        press(&mut app, KeyCode::Char('y'));
        assert!(app.confirm.is_none());
        let actions = queued(&mut app);
        assert!(matches!(
            &actions[..],
            [Action::Sync(SyncOp::DeleteServer(id))] if *id == ServerId::new(3)
        ));
    }

    #[test]
    fn declined_reset_sends_nothing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('R'));
        assert_eq!(app.confirm, Some(ConfirmAction::ResetRequestCount));
        press(&mut app, KeyCode::Char('n'));
        assert!(app.confirm.is_none());
        assert!(queued(&mut app).is_empty());
    }

    #[test]
    fn tab_moves_focus_to_statuses() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, PanelId::Statuses);
        assert!(app.statuses.focused());
        assert!(!app.servers.focused());

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "http://x");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(
            &queued(&mut app)[..],
            [Action::Sync(SyncOp::CheckStatus(url))] if url == "http://x"
        ));
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        press(&mut app, KeyCode::Esc);
        assert!(!app.help_visible);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn pending_count_never_underflows() {
        let mut app = app();
        app.process_action(&Action::SyncFinished).unwrap();
        assert_eq!(app.pending, 0);
    }

    #[test]
    fn request_count_update_is_stored() {
        let mut app = app();
        app.process_action(&Action::RequestCountUpdated(Some(RequestCount(12))))
            .unwrap();
        assert_eq!(app.request_count, Some(RequestCount(12)));
    }
}
