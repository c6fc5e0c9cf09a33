//! Single-line text input used for adding servers, renaming, and checking URLs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::action::{Action, InputKind};
use crate::panels::panel_block;
use crate::theme;

#[derive(Debug, Clone)]
pub struct InputLine {
    kind: InputKind,
    value: String,
}

impl InputLine {
    pub fn new(kind: InputKind, initial: String) -> Self {
        Self {
            kind,
            value: initial,
        }
    }

    /// Edit the buffer. Enter submits the raw text; trimming and blank
    /// handling happen in the sync layer.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => Some(Action::SubmitInput(
                self.kind.clone(),
                std::mem::take(&mut self.value),
            )),
            KeyCode::Esc => Some(Action::CancelInput),
            KeyCode::Backspace => {
                self.value.pop();
                None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.clear();
                None
            }
            KeyCode::Char(c) => {
                self.value.push(c);
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" {} ", self.kind.prompt());
        let line = Line::from(vec![
            Span::styled("> ", theme::key_hint_key()),
            Span::styled(self.value.as_str(), theme::table_row()),
            Span::styled("█", theme::key_hint_key()),
        ]);
        frame.render_widget(Paragraph::new(line).block(panel_block(&title, true)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_str(input: &mut InputLine, text: &str) {
        for c in text.chars() {
            input.handle_key_event(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_submits_buffer() {
        let mut input = InputLine::new(InputKind::NewServer, String::new());
        type_str(&mut input, "alphx");
        input.handle_key_event(KeyEvent::from(KeyCode::Backspace));
        type_str(&mut input, "a");
        let action = input.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert!(matches!(
            action,
            Some(Action::SubmitInput(InputKind::NewServer, ref v)) if v == "alpha"
        ));
    }

    #[test]
    fn ctrl_u_clears_prefilled_value() {
        let mut input = InputLine::new(InputKind::CheckUrl, "http://old".into());
        input.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.value, "");
    }

    #[test]
    fn escape_cancels() {
        let mut input = InputLine::new(InputKind::CheckUrl, String::new());
        let action = input.handle_key_event(KeyEvent::from(KeyCode::Esc));
        assert!(matches!(action, Some(Action::CancelInput)));
    }
}
