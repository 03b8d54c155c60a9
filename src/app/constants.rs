pub(crate) const STATUS_EDIT_CANCELLED: &str = "Edit cancelled.";
pub(crate) const STATUS_DELETE_CANCELLED: &str = "Delete cancelled.";
pub(crate) const STATUS_EMPTY_NAME: &str = "Connection name cannot be empty!";
pub(crate) const STATUS_EMPTY_KEY: &str = "GSocket key cannot be empty!";

pub(crate) const LOG_TIMESTAMP_FORMAT: &str = "%m-%d %H:%M:%S";
pub(crate) const LOG_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub(crate) const LOG_SEPARATOR: &str = " | ";

pub(crate) const LOG_RETENTION_DAYS: i64 = 7;
pub(crate) const LOG_MAX_ENTRIES: usize = 10_000;

pub(crate) const NAME_CHAR_LIMIT: usize = 100;
pub(crate) const KEY_CHAR_LIMIT: usize = 256;
pub(crate) const TAGS_CHAR_LIMIT: usize = 200;
