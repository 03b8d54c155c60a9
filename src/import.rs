use std::collections::HashSet;

use anyhow::{Result, bail};

use crate::mnemonic::{DEFAULT_WORD_COUNT, generate_mnemonic};
use crate::model::{Connection, StoreFile, key_preview, parse_tags};

pub(crate) const KEY_DISPLAY_LEN: usize = 8;
const SKIPPED_LINE_PREVIEW: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ImportNotice {
    Skipped(String),
    Failed(String),
    Prepared(Connection),
}

/// Outcome of reading an import source, before anything is written.
#[derive(Debug, Default)]
pub(crate) struct ImportPlan {
    pub(crate) notices: Vec<ImportNotice>,
    pub(crate) connections: Vec<Connection>,
}

impl ImportPlan {
    fn prepare(&mut self, conn: Connection) {
        self.notices.push(ImportNotice::Prepared(conn.clone()));
        self.connections.push(conn);
    }
}

fn starts_alphanumeric(value: &str) -> bool {
    value.chars().next().is_some_and(char::is_alphanumeric)
}

/// Splits `KEY[#tag1,tag2]` on the first `#`.
pub(crate) fn parse_key_and_tags(input: &str) -> (String, Vec<String>) {
    match input.split_once('#') {
        Some((key, tags)) => (key.trim().to_string(), parse_tags(tags.trim())),
        None => (input.trim().to_string(), Vec::new()),
    }
}

/// The `KEY[#tags]` part of a line: everything before the first space or tab.
pub(crate) fn key_candidate(line: &str) -> &str {
    match line.find([' ', '\t']) {
        Some(end) => &line[..end],
        None => line,
    }
}

fn shorten(value: &str, max_len: usize) -> String {
    if value.chars().count() > max_len {
        let head: String = value.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        value.to_string()
    }
}

pub(crate) fn plan_secret(
    secret: &str,
    existing: &StoreFile,
    dictionary: &[String],
) -> Result<ImportPlan> {
    let candidate = secret.trim();
    if !starts_alphanumeric(candidate) {
        bail!(
            "Secret key provided via --secret must start with an alphanumeric character and not be empty."
        );
    }
    let (key, tags) = parse_key_and_tags(candidate);
    if key.is_empty() {
        bail!("Provided secret key via --secret is effectively empty after parsing.");
    }
    let preview = key_preview(&key, KEY_DISPLAY_LEN);
    let name = generate_mnemonic(&key, DEFAULT_WORD_COUNT, dictionary)
        .map_err(|err| anyhow::anyhow!("Error generating mnemonic for key '{preview}...': {err}"))?;
    if existing.name_taken(&name, None) {
        bail!("Auto-generated name '{name}' (for key '{preview}...') already exists.");
    }
    let mut plan = ImportPlan::default();
    plan.prepare(Connection::new(name, key, tags));
    Ok(plan)
}

pub(crate) fn plan_lines(content: &str, existing: &StoreFile, dictionary: &[String]) -> ImportPlan {
    let mut plan = ImportPlan::default();
    let mut seen_keys = HashSet::new();
    let mut taken_names: HashSet<String> = existing
        .connections
        .iter()
        .map(|conn| conn.name.clone())
        .collect();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !starts_alphanumeric(trimmed) {
            plan.notices.push(ImportNotice::Skipped(format!(
                "Line {line_number} does not start with alphanumeric char: \"{}\"",
                shorten(line, SKIPPED_LINE_PREVIEW)
            )));
            continue;
        }
        let (key, tags) = parse_key_and_tags(key_candidate(trimmed));
        if key.is_empty() {
            plan.notices.push(ImportNotice::Skipped(format!(
                "Empty key on line {line_number}"
            )));
            continue;
        }
        let preview = key_preview(&key, KEY_DISPLAY_LEN);
        if !seen_keys.insert(key.clone()) {
            plan.notices.push(ImportNotice::Skipped(format!(
                "Duplicate key '{preview}...' from file batch."
            )));
            continue;
        }
        let name = match generate_mnemonic(&key, DEFAULT_WORD_COUNT, dictionary) {
            Ok(name) => name,
            Err(err) => {
                plan.notices.push(ImportNotice::Failed(format!(
                    "Error generating mnemonic for key '{preview}...': {err}. Skipping."
                )));
                continue;
            }
        };
        if !taken_names.insert(name.clone()) {
            plan.notices.push(ImportNotice::Failed(format!(
                "Auto-generated name '{name}' (for key '{preview}...') already exists. Skipping."
            )));
            continue;
        }
        plan.prepare(Connection::new(name, key, tags));
    }
    plan
}
