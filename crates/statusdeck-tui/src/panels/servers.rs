//! Servers panel: the live servers view.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use statusdeck_core::{Server, Snapshot};

use crate::action::{Action, ConfirmAction, InputKind};
use crate::component::Component;
use crate::theme;

use super::{panel_block, reselect};

#[derive(Default)]
pub struct ServersPanel {
    servers: Snapshot<Server>,
    selected: usize,
    focused: bool,
}

impl ServersPanel {
    pub fn selected(&self) -> Option<&Arc<Server>> {
        self.servers.get(self.selected)
    }

    fn replace(&mut self, servers: Snapshot<Server>) {
        let previous = self.selected().map(|s| s.id);
        self.selected = reselect(&servers, previous, self.selected, |s| s.id);
        self.servers = servers;
    }
}

impl Component for ServersPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
            KeyCode::Char('a') => Some(Action::OpenInput(InputKind::NewServer, String::new())),
            KeyCode::Char('e') => self
                .selected()
                .map(|s| Action::OpenInput(InputKind::RenameServer(s.id), s.name.clone())),
            KeyCode::Char('d') => self.selected().map(|s| {
                Action::RequestConfirm(ConfirmAction::DeleteServer {
                    id: s.id,
                    name: s.name.clone(),
                })
            }),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ServersUpdated(servers) => self.replace(Arc::clone(servers)),
            Action::SelectNext if self.focused => {
                if self.selected + 1 < self.servers.len() {
                    self.selected += 1;
                }
            }
            Action::SelectPrev if self.focused => {
                self.selected = self.selected.saturating_sub(1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Servers ({}) ", self.servers.len());
        let block = panel_block(&title, self.focused());

        if self.servers.is_empty() {
            let hint = Paragraph::new("no servers, press a to add one")
                .style(theme::key_hint())
                .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let rows = self.servers.iter().map(|s| {
            Row::new(vec![Cell::from(s.id.to_string()), Cell::from(s.name.as_str())])
                .style(theme::table_row())
        });
        let table = Table::new(rows, [Constraint::Length(6), Constraint::Min(10)])
            .header(Row::new(vec!["ID", "Name"]).style(theme::table_header()))
            .row_highlight_style(theme::table_selected())
            .block(block);

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
