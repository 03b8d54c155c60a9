use crate::model::{Connection, ConnectionItem, ListEntry};

/// Filterable, navigable view over a snapshot of the store.
///
/// `selected` indexes the visible set, never the store; it is clamped after
/// every change of the filter so it can always be used to index `visible()`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ListView {
    pub(crate) items: Vec<ConnectionItem>,
    pub(crate) filter: String,
    pub(crate) selected: usize,
}

impl ListView {
    pub(crate) fn new(connections: &[Connection]) -> Self {
        Self {
            items: connections
                .iter()
                .cloned()
                .map(|connection| ConnectionItem { connection })
                .collect(),
            filter: String::new(),
            selected: 0,
        }
    }

    pub(crate) fn visible(&self) -> Vec<&ConnectionItem> {
        let needle = self.filter.to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.filter_key().to_lowercase().contains(&needle))
            .collect()
    }

    pub(crate) fn selected_item(&self) -> Option<&ConnectionItem> {
        self.visible().get(self.selected).copied()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn has_filter(&self) -> bool {
        !self.filter.is_empty()
    }

    pub(crate) fn push_filter_char(&mut self, ch: char) {
        self.filter.push(ch);
        self.clamp_selection();
    }

    pub(crate) fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.clamp_selection();
    }

    pub(crate) fn clear_filter(&mut self) {
        self.filter.clear();
        self.clamp_selection();
    }

    pub(crate) fn move_by(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let max = len - 1;
        self.selected = if delta < 0 {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected.saturating_add(delta as usize).min(max)
        };
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.visible().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ListView {
        ListView::new(&[
            Connection::new("Echo", "k1", vec!["lab".into()]),
            Connection::new("Foxtrot", "k2", vec!["work".into(), "prod".into()]),
            Connection::new("Golf", "k3", vec!["work".into()]),
        ])
    }

    fn names(view: &ListView) -> Vec<String> {
        view.visible()
            .iter()
            .map(|item| item.connection.name.clone())
            .collect()
    }

    #[test]
    fn tag_only_filter_narrows_to_tagged_records() {
        let mut view = sample();
        for ch in "work".chars() {
            view.push_filter_char(ch);
        }
        assert_eq!(names(&view), vec!["Foxtrot", "Golf"]);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let mut view = sample();
        view.push_filter_char('E');
        view.push_filter_char('C');
        assert_eq!(names(&view), vec!["Echo"]);
    }

    #[test]
    fn filter_clamps_selection_into_visible_set() {
        let mut view = sample();
        view.select_last();
        assert_eq!(view.selected, 2);
        for ch in "lab".chars() {
            view.push_filter_char(ch);
        }
        assert_eq!(view.selected, 0);
        assert_eq!(view.selected_item().unwrap().connection.name, "Echo");
        view.push_filter_char('z');
        assert!(view.selected_item().is_none());
        view.clear_filter();
        assert_eq!(view.visible().len(), 3);
    }

    #[test]
    fn move_by_stays_in_bounds() {
        let mut view = sample();
        view.move_by(-1);
        assert_eq!(view.selected, 0);
        view.move_by(10);
        assert_eq!(view.selected, 2);
        view.move_by(-1);
        assert_eq!(view.selected, 1);

        let mut empty = ListView::new(&[]);
        empty.move_by(1);
        assert_eq!(empty.selected, 0);
        assert!(empty.selected_item().is_none());
    }

    #[test]
    fn filter_never_touches_items() {
        let mut view = sample();
        view.push_filter_char('x');
        assert_eq!(view.items.len(), 3);
    }
}
