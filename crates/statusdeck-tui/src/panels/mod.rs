//! The two list panels and their shared selection logic.

mod servers;
mod statuses;

pub use servers::ServersPanel;
pub use statuses::StatusesPanel;

use ratatui::widgets::{Block, BorderType, Borders};

use crate::theme;

/// Index to select after a list is replaced: the entry that carries the
/// previously selected id if it survived, otherwise the old position
/// clamped to the new length.
pub(crate) fn reselect<T, K: PartialEq>(
    items: &[T],
    previous: Option<K>,
    index: usize,
    key: impl Fn(&T) -> K,
) -> usize {
    previous
        .and_then(|prev| items.iter().position(|item| key(item) == prev))
        .unwrap_or_else(|| index.min(items.len().saturating_sub(1)))
}

pub(crate) fn panel_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselect_follows_id() {
        let items = [1, 3, 4];
        assert_eq!(reselect(&items, Some(4), 0, |i| *i), 2);
    }

    #[test]
    fn reselect_clamps_when_id_is_gone() {
        let items = [1, 3];
        assert_eq!(reselect(&items, Some(9), 5, |i| *i), 1);
    }

    #[test]
    fn reselect_on_empty_list_is_zero() {
        let items: [i32; 0] = [];
        assert_eq!(reselect(&items, Some(1), 3, |i| *i), 0);
    }
}
