use crate::app::constants::{
    STATUS_DELETE_CANCELLED, STATUS_EDIT_CANCELLED, STATUS_EMPTY_KEY, STATUS_EMPTY_NAME,
};
use crate::app::{App, EditForm};
use crate::mnemonic::{DEFAULT_WORD_COUNT, fallback_name, generate_mnemonic};
use crate::model::{
    Command, Connection, DeleteConfirmation, EditTarget, Field, Mode, StatusKind, parse_tags,
};

impl App {
    /// Store index of the highlighted visible record, matched by name and key
    /// so a stale list position can never address the wrong record.
    pub(crate) fn resolve_selected_index(&self) -> Option<usize> {
        let item = self.session.list.selected_item()?;
        self.store
            .current()
            .position_of(&item.connection.name, &item.connection.key)
    }

    pub(crate) fn start_add(&mut self) {
        self.clear_status();
        self.session.form = EditForm::for_new();
        self.session.mode = Mode::Editing;
    }

    pub(crate) fn start_edit(&mut self) {
        let Some(index) = self.resolve_selected_index() else {
            return;
        };
        let Some(conn) = self.store.current().connections.get(index) else {
            return;
        };
        self.session.form = EditForm::for_existing(index, conn);
        self.session.mode = Mode::Editing;
        self.clear_status();
    }

    pub(crate) fn start_delete(&mut self) {
        let Some(index) = self.resolve_selected_index() else {
            return;
        };
        let Some(conn) = self.store.current().connections.get(index) else {
            return;
        };
        self.session.pending_delete = Some(DeleteConfirmation {
            index,
            name: conn.name.clone(),
        });
        self.session.mode = Mode::ConfirmingDelete;
        self.clear_status();
    }

    pub(crate) fn cancel_edit(&mut self) -> Vec<Command> {
        self.session.form = EditForm::default();
        self.session.mode = Mode::Browsing;
        self.set_status(StatusKind::Neutral, STATUS_EDIT_CANCELLED);
        vec![Command::ClearScreen]
    }

    pub(crate) fn commit_edit(&mut self) -> Vec<Command> {
        let Some(target) = self.session.form.target else {
            return self.cancel_edit();
        };
        self.clear_status();

        let form = &self.session.form;
        let mut name = form.name.value.trim().to_string();
        let key = form.key.value.trim().to_string();
        let tags = parse_tags(form.tags.value.trim());

        let mut generated = false;
        if target == EditTarget::New && name.is_empty() && !key.is_empty() {
            match generate_mnemonic(&key, DEFAULT_WORD_COUNT, &self.dictionary) {
                Ok(derived) => {
                    name = derived;
                    generated = true;
                }
                Err(err) => {
                    name = fallback_name(&key);
                    self.set_status(
                        StatusKind::Error,
                        format!("Error generating name: {err}. Using key prefix."),
                    );
                }
            }
        }

        if key.is_empty() {
            return self.reject_edit(Field::Key, STATUS_EMPTY_KEY);
        }
        if name.is_empty() {
            return self.reject_edit(Field::Name, STATUS_EMPTY_NAME);
        }
        let except = match target {
            EditTarget::New => None,
            EditTarget::Existing(index) => Some(index),
        };
        if self.store.current().name_taken(&name, except) {
            return self.reject_edit(
                Field::Name,
                format!("Error: Connection name '{name}' already exists!"),
            );
        }

        let mut next = self.store.current().clone();
        let success = match target {
            EditTarget::New => {
                next.add_connection(Connection::new(name.as_str(), key, tags));
                if generated {
                    format!("Connection '{name}' added (Name auto-generated: {name}).")
                } else {
                    format!("Connection '{name}' added.")
                }
            }
            EditTarget::Existing(index) => {
                let (usage, last_connected) = match next.connections.get(index) {
                    Some(original) => (original.usage, original.last_connected),
                    None => (0, None),
                };
                let updated = Connection {
                    name: name.clone(),
                    key,
                    tags,
                    usage,
                    last_connected,
                };
                if let Err(err) = next.update_by_index(index, updated) {
                    return self.save_failed(err);
                }
                format!("Connection '{name}' updated.")
            }
        };
        if let Err(err) = self.store.save(next) {
            return self.save_failed(err);
        }

        if !self.status_is_error() {
            self.set_status(StatusKind::Success, success);
        }
        self.finish_mutation("save")
    }

    pub(crate) fn confirm_delete(&mut self) -> Vec<Command> {
        self.session.mode = Mode::Browsing;
        let Some(pending) = self.session.pending_delete.take() else {
            return vec![Command::ClearScreen];
        };
        let mut next = self.store.current().clone();
        let result = match next.delete_by_index(pending.index) {
            Ok(_) => self.store.save(next),
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            self.set_status(
                StatusKind::Error,
                format!("Error deleting '{}': {err:#}", pending.name),
            );
            return vec![Command::ClearScreen];
        }
        self.set_status(
            StatusKind::Success,
            format!("Connection '{}' deleted.", pending.name),
        );
        self.finish_mutation("delete")
    }

    pub(crate) fn decline_delete(&mut self) -> Vec<Command> {
        self.session.pending_delete = None;
        self.session.mode = Mode::Browsing;
        self.set_status(StatusKind::Neutral, STATUS_DELETE_CANCELLED);
        vec![Command::ClearScreen]
    }

    /// Re-reads the store after a committed mutation and derives a fresh session.
    fn finish_mutation(&mut self, action: &str) -> Vec<Command> {
        if let Err(err) = self.store.load() {
            self.set_status(
                StatusKind::Error,
                format!("Error reloading config after {action}: {err:#}. Please restart GSM."),
            );
        }
        self.rebuild_session();
        vec![Command::ClearScreen]
    }

    fn reject_edit(&mut self, field: Field, message: impl Into<String>) -> Vec<Command> {
        self.set_status(StatusKind::Error, message);
        self.session.form.focus_field(field);
        vec![]
    }

    fn save_failed(&mut self, err: anyhow::Error) -> Vec<Command> {
        self.set_status(StatusKind::Error, format!("Error saving: {err:#}"));
        self.session.form.focus_field(Field::Name);
        vec![]
    }

    fn status_is_error(&self) -> bool {
        self.session
            .status
            .as_ref()
            .is_some_and(|status| status.kind == StatusKind::Error)
    }
}
