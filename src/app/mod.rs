use std::path::PathBuf;

use crate::model::{DeleteConfirmation, Mode, Status, StoreFile, Viewport};
use crate::storage::ConnectionStore;

pub(crate) use edit_form::EditForm;
pub(crate) use list_view::ListView;
pub(crate) use logging::{append_log, prune_log_file};

pub(crate) mod constants;
mod connections;
mod edit_form;
mod handlers;
mod list_view;
mod logging;

/// Everything the UI derives from one store snapshot.
///
/// Never patched after a mutation: a successful save or delete replaces the
/// whole session through [`App::rebuild_session`].
#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub(crate) mode: Mode,
    pub(crate) list: ListView,
    pub(crate) form: EditForm,
    pub(crate) pending_delete: Option<DeleteConfirmation>,
    pub(crate) status: Option<Status>,
    pub(crate) viewport: Viewport,
}

impl Session {
    pub(crate) fn from_store(store: &StoreFile) -> Self {
        Self {
            mode: Mode::Browsing,
            list: ListView::new(&store.connections),
            form: EditForm::default(),
            pending_delete: None,
            status: None,
            viewport: Viewport::default(),
        }
    }
}

pub(crate) struct App {
    pub(crate) store: Box<dyn ConnectionStore>,
    pub(crate) dictionary: Vec<String>,
    pub(crate) log_path: Option<PathBuf>,
    pub(crate) session: Session,
}

impl App {
    pub(crate) fn new(
        store: Box<dyn ConnectionStore>,
        dictionary: Vec<String>,
        log_path: Option<PathBuf>,
    ) -> Self {
        let session = Session::from_store(store.current());
        Self {
            store,
            dictionary,
            log_path,
            session,
        }
    }

    pub(crate) fn into_store(self) -> Box<dyn ConnectionStore> {
        self.store
    }

    /// Replaces the session with one derived from the current store, keeping
    /// only the viewport and the status line.
    pub(crate) fn rebuild_session(&mut self) {
        let mut fresh = Session::from_store(self.store.current());
        fresh.viewport = self.session.viewport;
        fresh.status = self.session.status.take();
        self.session = fresh;
    }

    pub(crate) fn mode(&self) -> Mode {
        self.session.mode
    }
}

#[cfg(test)]
impl App {
    pub(crate) fn for_test(store: crate::storage::MemoryStore) -> Self {
        let dictionary = ["amber", "brook", "cedar", "delta", "ember", "fjord", "grove"]
            .iter()
            .map(|word| word.to_string())
            .collect();
        Self::new(Box::new(store), dictionary, None)
    }
}
