use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::model::{AppEvent, Command, Mode, Viewport};

#[derive(Debug, Clone, Copy)]
enum EditAction {
    Insert(char),
    Backspace,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

impl App {
    /// Single entry point of the state machine. The returned commands are
    /// performed by the terminal driver, never by the controller itself.
    pub(crate) fn handle_event(&mut self, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::Resize(width, height) => {
                self.session.viewport = Viewport { width, height };
                Vec::new()
            }
            AppEvent::Key(key) => match self.session.mode {
                Mode::Browsing => {
                    self.clear_status();
                    self.handle_browsing_key(key)
                }
                Mode::Filtering => {
                    self.clear_status();
                    self.handle_filtering_key(key)
                }
                Mode::Editing => self.handle_editing_key(key),
                Mode::ConfirmingDelete => self.handle_confirm_delete_key(key),
            },
        }
    }

    fn handle_browsing_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if is_ctrl_c(&key) {
            return vec![Command::Quit];
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Vec::new();
        }
        match key.code {
            KeyCode::Char('q') => return vec![Command::Quit],
            KeyCode::Char('a') => self.start_add(),
            KeyCode::Char('e') => self.start_edit(),
            KeyCode::Char('d') => self.start_delete(),
            KeyCode::Char('/') => self.session.mode = Mode::Filtering,
            KeyCode::Esc => {
                if self.session.list.has_filter() {
                    self.session.list.clear_filter();
                }
            }
            KeyCode::Enter => return self.launch_selected(),
            code => self.navigate(code),
        }
        Vec::new()
    }

    fn handle_filtering_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if is_ctrl_c(&key) {
            return vec![Command::Quit];
        }
        match key.code {
            KeyCode::Esc => {
                self.session.list.clear_filter();
                self.session.mode = Mode::Browsing;
            }
            KeyCode::Enter => {
                self.session.mode = Mode::Browsing;
                return self.launch_selected();
            }
            KeyCode::Backspace => self.session.list.pop_filter_char(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.list.push_filter_char(ch);
            }
            code => self.navigate(code),
        }
        Vec::new()
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if is_ctrl_c(&key) {
            return self.cancel_edit();
        }
        match key.code {
            KeyCode::Esc => return self.cancel_edit(),
            KeyCode::Enter => return self.commit_edit(),
            KeyCode::Tab | KeyCode::Down => self.session.form.cycle_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.session.form.cycle_focus(false),
            KeyCode::Backspace => self.edit_focused_field(EditAction::Backspace),
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Vec::new();
                }
                self.edit_focused_field(EditAction::Insert(ch));
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_confirm_delete_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if is_ctrl_c(&key) {
            return self.decline_delete();
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
                self.decline_delete()
            }
            _ => Vec::new(),
        }
    }

    fn navigate(&mut self, code: KeyCode) {
        let page = self.page_size() as isize;
        let list = &mut self.session.list;
        match code {
            KeyCode::Up | KeyCode::Char('k') => list.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') => list.move_by(1),
            KeyCode::PageUp => list.move_by(-page),
            KeyCode::PageDown => list.move_by(page),
            KeyCode::Home | KeyCode::Char('g') => list.select_first(),
            KeyCode::End | KeyCode::Char('G') => list.select_last(),
            _ => {}
        }
    }

    fn page_size(&self) -> usize {
        usize::from(self.session.viewport.height / 2).max(1)
    }

    fn launch_selected(&mut self) -> Vec<Command> {
        match self.session.list.selected_item() {
            Some(item) => vec![Command::Launch(item.connection.clone())],
            None => Vec::new(),
        }
    }

    fn edit_focused_field(&mut self, action: EditAction) {
        match action {
            EditAction::Insert(ch) => self.session.form.insert(ch),
            EditAction::Backspace => self.session.form.backspace(),
        }
    }
}
