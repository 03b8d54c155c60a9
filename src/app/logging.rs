use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::Datelike;

use crate::app::App;
use crate::app::constants::{
    LOG_MAX_ENTRIES, LOG_PARSE_FORMAT, LOG_RETENTION_DAYS, LOG_SEPARATOR, LOG_TIMESTAMP_FORMAT,
};
use crate::model::{Status, StatusKind};

impl App {
    pub(crate) fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        let message = message.into();
        if let Some(path) = &self.log_path {
            append_log(path, &message);
        }
        self.session.status = Some(Status { kind, message });
    }

    pub(crate) fn clear_status(&mut self) {
        self.session.status = None;
    }
}

pub(crate) fn append_log(path: &Path, message: &str) {
    let timestamp = chrono::Local::now().format(LOG_TIMESTAMP_FORMAT);
    let line = format!("{timestamp}{LOG_SEPARATOR}{message}");
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{line}");
    }
}

pub(crate) fn prune_log_file(path: &Path) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    let now = chrono::Local::now().naive_local();
    let cutoff = now - chrono::Duration::days(LOG_RETENTION_DAYS);
    let current_year = now.year();
    let mut kept = Vec::new();
    for line in content.lines() {
        let Some((timestamp, _)) = line.split_once(LOG_SEPARATOR) else {
            continue;
        };
        let with_year = format!("{current_year}-{timestamp}");
        let Ok(mut parsed) = chrono::NaiveDateTime::parse_from_str(&with_year, LOG_PARSE_FORMAT)
        else {
            continue;
        };
        // Entries "in the future" were written last year.
        if parsed > now {
            match parsed.with_year(current_year - 1) {
                Some(previous) => parsed = previous,
                None => continue,
            }
        }
        if parsed >= cutoff {
            kept.push(line.to_string());
        }
    }
    if kept.len() > LOG_MAX_ENTRIES {
        kept = kept.split_off(kept.len().saturating_sub(LOG_MAX_ENTRIES));
    }
    if kept.is_empty() {
        let _ = fs::remove_file(path);
    } else {
        let _ = fs::write(path, kept.join("\n") + "\n");
    }
}
