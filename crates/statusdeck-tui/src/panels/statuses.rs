//! Status checks panel: url, availability and last message per check.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use statusdeck_core::{Snapshot, StatusCheck};

use crate::action::{Action, ConfirmAction, InputKind, SyncOp};
use crate::component::Component;
use crate::theme;

use super::{panel_block, reselect};

#[derive(Default)]
pub struct StatusesPanel {
    statuses: Snapshot<StatusCheck>,
    selected: usize,
    focused: bool,
}

impl StatusesPanel {
    pub fn selected(&self) -> Option<&Arc<StatusCheck>> {
        self.statuses.get(self.selected)
    }

    fn replace(&mut self, statuses: Snapshot<StatusCheck>) {
        let previous = self.selected().map(|s| s.id);
        self.selected = reselect(&statuses, previous, self.selected, |s| s.id);
        self.statuses = statuses;
    }
}

impl Component for StatusesPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
            KeyCode::Char('a') => Some(Action::OpenInput(InputKind::CheckUrl, String::new())),
            // Re-check the selected URL; the backend records a fresh entry.
            KeyCode::Char('c') => self
                .selected()
                .map(|s| Action::Sync(SyncOp::CheckStatus(s.url.clone()))),
            KeyCode::Char('d') => self.selected().map(|s| {
                Action::RequestConfirm(ConfirmAction::DeleteStatus {
                    id: s.id,
                    url: s.url.clone(),
                })
            }),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StatusesUpdated(statuses) => self.replace(Arc::clone(statuses)),
            Action::SelectNext if self.focused => {
                if self.selected + 1 < self.statuses.len() {
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
        let title = format!(" Status checks ({}) ", self.statuses.len());
        let block = panel_block(&title, self.focused());

        if self.statuses.is_empty() {
            let hint = Paragraph::new("no checks yet, press a to check a URL")
                .style(theme::key_hint())
                .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let rows = self.statuses.iter().map(|s| {
            Row::new(vec![
                Cell::from(s.id.to_string()),
                Cell::from(s.url.as_str()),
                Cell::from(s.availability()).style(theme::availability(s.is_available)),
                Cell::from(s.message.as_str()),
            ])
            .style(theme::table_row())
        });
        let widths = [
            Constraint::Length(6),
            Constraint::Percentage(45),
            Constraint::Length(12),
            Constraint::Fill(1),
        ];
        let table = Table::new(rows, widths)
            .header(Row::new(vec!["ID", "URL", "State", "Message"]).style(theme::table_header()))
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
