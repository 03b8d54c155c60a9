use chrono::{DateTime, Local};
use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct Connection {
    pub(crate) name: String,
    pub(crate) key: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) tags: Vec<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub(crate) usage: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) last_connected: Option<DateTime<Local>>,
}

impl Connection {
    pub(crate) fn new(name: impl Into<String>, key: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            tags,
            usage: 0,
            last_connected: None,
        }
    }

    pub(crate) fn same_identity(&self, name: &str, key: &str) -> bool {
        self.name == name && self.key == key
    }
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct StoreFile {
    #[serde(default)]
    pub(crate) connections: Vec<Connection>,
}

impl StoreFile {
    pub(crate) fn add_connection(&mut self, conn: Connection) {
        self.connections.push(conn);
    }

    pub(crate) fn update_by_index(&mut self, index: usize, conn: Connection) -> anyhow::Result<()> {
        let Some(slot) = self.connections.get_mut(index) else {
            anyhow::bail!("index out of bounds: {index}");
        };
        *slot = conn;
        Ok(())
    }

    pub(crate) fn delete_by_index(&mut self, index: usize) -> anyhow::Result<Connection> {
        if index >= self.connections.len() {
            anyhow::bail!("index out of bounds: {index}");
        }
        Ok(self.connections.remove(index))
    }

    pub(crate) fn position_of(&self, name: &str, key: &str) -> Option<usize> {
        self.connections
            .iter()
            .position(|conn| conn.same_identity(name, key))
    }

    /// True when a record other than `except` already carries `name`.
    pub(crate) fn name_taken(&self, name: &str, except: Option<usize>) -> bool {
        self.connections
            .iter()
            .enumerate()
            .any(|(index, conn)| Some(index) != except && conn.name == name)
    }

    pub(crate) fn mark_connected(&mut self, name: &str, key: &str, at: DateTime<Local>) -> bool {
        let Some(index) = self.position_of(name, key) else {
            return false;
        };
        let conn = &mut self.connections[index];
        conn.usage = conn.usage.saturating_add(1);
        conn.last_connected = Some(at);
        true
    }
}

/// Display capabilities the connection list needs from an entry.
pub(crate) trait ListEntry {
    fn title(&self) -> &str;
    fn description(&self) -> String;
    fn filter_key(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConnectionItem {
    pub(crate) connection: Connection,
}

impl ListEntry for ConnectionItem {
    fn title(&self) -> &str {
        &self.connection.name
    }

    fn description(&self) -> String {
        if self.connection.tags.is_empty() {
            String::new()
        } else {
            format!("# {}", self.connection.tags.join(", "))
        }
    }

    fn filter_key(&self) -> String {
        format!("{} {}", self.connection.name, self.connection.tags.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Browsing,
    Filtering,
    Editing,
    ConfirmingDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Name,
    Key,
    Tags,
}

impl Field {
    pub(crate) const ORDER: [Field; 3] = [Field::Name, Field::Key, Field::Tags];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditTarget {
    New,
    Existing(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Neutral,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Status {
    pub(crate) kind: StatusKind,
    pub(crate) message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeleteConfirmation {
    pub(crate) index: usize,
    pub(crate) name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Viewport {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

#[derive(Debug, Clone)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    ClearScreen,
    Quit,
    Launch(Connection),
}

pub(crate) fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn key_preview(key: &str, len: usize) -> String {
    key.chars().take(len).collect()
}
