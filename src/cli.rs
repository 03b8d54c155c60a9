use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use clap::{ArgGroup, Args, Parser, Subcommand};
use crossterm::style::Stylize;

use crate::app::append_log;
use crate::app::constants::STATUS_EMPTY_KEY;
use crate::import::{ImportNotice, KEY_DISPLAY_LEN, plan_lines, plan_secret};
use crate::mnemonic::{DEFAULT_WORD_COUNT, generate_mnemonic};
use crate::model::{Connection, key_preview, parse_tags};
use crate::storage::ConnectionStore;

/// GSocket Manager: keep gs-netcat secrets organised and connect in one keystroke
#[derive(Parser)]
#[command(name = "gsm")]
#[command(version, about = "GSocket Manager - connect seamlessly")]
pub(crate) struct Cli {
    /// Path to the connection store (defaults to ~/.gsm/config.json)
    #[arg(long, global = true, env = "GSM_CONFIG", value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import connections from a single key or a file of keys
    Import(ImportArgs),
    /// Add a connection by answering prompts
    Config,
    /// Print the version
    Version,
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["secret", "file"])))]
pub(crate) struct ImportArgs {
    /// Single secret to import, formatted KEY[#tag1,tag2]
    #[arg(short, long)]
    pub(crate) secret: Option<String>,

    /// File with one KEY[#tag1,tag2] per line; text after the first space is ignored
    #[arg(short, long, value_name = "PATH")]
    pub(crate) file: Option<PathBuf>,
}

/// Imports from `--secret` or `--file` and saves all prepared connections in one write.
pub(crate) fn run_import(
    args: &ImportArgs,
    store: &mut dyn ConnectionStore,
    dictionary: &[String],
    out: &mut impl Write,
    log_path: Option<&Path>,
) -> Result<usize> {
    let plan = match (&args.secret, &args.file) {
        (Some(secret), _) => plan_secret(secret, store.current(), dictionary)?,
        (None, Some(path)) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("open import file '{}'", path.display()))?;
            plan_lines(&content, store.current(), dictionary)
        }
        (None, None) => bail!("either --secret or --file must be provided"),
    };

    for notice in &plan.notices {
        match notice {
            ImportNotice::Skipped(message) => {
                writeln!(out, "{} {message}", "[ SKIPPED ]".yellow())?;
            }
            ImportNotice::Failed(message) => {
                writeln!(out, "{} {message}", "[ ERROR ]".red().bold())?;
            }
            ImportNotice::Prepared(conn) => {
                writeln!(
                    out,
                    "{} Name > \"{}\" | Key > \"{}...\" | Tags > [{}]",
                    "[ PREPARED ]".yellow(),
                    conn.name,
                    key_preview(&conn.key, KEY_DISPLAY_LEN),
                    conn.tags.join(" ")
                )?;
            }
        }
    }

    if plan.connections.is_empty() {
        writeln!(out, "{} No new connections were imported.", "[ INFO ]".cyan())?;
        return Ok(0);
    }

    let count = plan.connections.len();
    let mut next = store.current().clone();
    for conn in plan.connections {
        next.add_connection(conn);
    }
    store.save(next).context("save imported connections")?;
    writeln!(
        out,
        "{} Successfully imported {} connection(s).",
        "[ SUCCESS ]".green(),
        count.to_string().bold()
    )?;
    if let Some(path) = log_path {
        append_log(path, &format!("Imported {count} connection(s)."));
    }
    Ok(count)
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<String> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("read answer")?;
    Ok(line.trim().to_string())
}

/// Asks for name, key and tags and adds the connection with the same rules as the form.
pub(crate) fn prompt_add(
    input: &mut impl BufRead,
    out: &mut impl Write,
    store: &mut dyn ConnectionStore,
    dictionary: &[String],
) -> Result<Connection> {
    let name = prompt(input, out, "Connection name (empty to generate): ")?;
    let key = prompt(input, out, "GSocket key (-s value): ")?;
    let tags = prompt(input, out, "Tags (comma separated, e.g., work,personal): ")?;

    if key.is_empty() {
        bail!(STATUS_EMPTY_KEY);
    }
    let name = if name.is_empty() {
        let generated = generate_mnemonic(&key, DEFAULT_WORD_COUNT, dictionary)
            .context("generate connection name")?;
        writeln!(out, "Name auto-generated: {generated}")?;
        generated
    } else {
        name
    };
    if store.current().name_taken(&name, None) {
        bail!("Connection name '{name}' already exists!");
    }

    let conn = Connection::new(name, key, parse_tags(&tags));
    let mut next = store.current().clone();
    next.add_connection(conn.clone());
    store.save(next).context("save config")?;
    Ok(conn)
}

pub(crate) fn connect_banner(conn: &Connection) -> String {
    format!(
        "[+] Connecting to {} (Key: {}...)",
        conn.name,
        key_preview(&conn.key, KEY_DISPLAY_LEN)
    )
}

pub(crate) fn disconnect_banner(conn: &Connection, result: &Result<()>) -> String {
    match result {
        Ok(()) => format!("[<] Disconnected from {}", conn.name),
        Err(err) => format!("[<] Disconnected from {} ({err:#})", conn.name),
    }
}

/// Bumps usage on the freshly reloaded store; returns false when the record is gone.
pub(crate) fn record_launch(
    store: &mut dyn ConnectionStore,
    conn: &Connection,
    at: DateTime<Local>,
) -> Result<bool> {
    store.load().context("reload config after session")?;
    let mut next = store.current().clone();
    if !next.mark_connected(&conn.name, &conn.key, at) {
        return Ok(false);
    }
    store.save(next).context("save usage")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use clap::CommandFactory;

    use super::*;
    use crate::storage::MemoryStore;

    fn dictionary() -> Vec<String> {
        crate::wordlist::words().to_vec()
    }

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn import_flags_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["gsm", "import", "--secret", "a", "--file", "f"]).is_err());
        assert!(Cli::try_parse_from(["gsm", "import"]).is_err());
        let cli = Cli::try_parse_from(["gsm", "--config", "/tmp/x.json", "import", "-s", "abc"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.json")));
        match cli.command {
            Some(Commands::Import(args)) => assert_eq!(args.secret.as_deref(), Some("abc")),
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn import_secret_saves_and_reports() {
        let mut store = MemoryStore::default();
        let args = ImportArgs {
            secret: Some("abc123xyz#work".into()),
            file: None,
        };
        let mut out = Vec::new();
        let count = run_import(&args, &mut store, &dictionary(), &mut out, None).unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.saves, 1);
        assert_eq!(store.persisted.connections[0].tags, vec!["work"]);
        let text = output(out);
        assert!(text.contains("Key > \"abc123xy...\""));
        assert!(text.contains("Tags > [work]"));
        assert!(text.contains("Successfully imported"));
    }

    #[test]
    fn import_file_with_nothing_new_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.txt");
        fs::write(&path, "# only comments\n\n").unwrap();
        let mut store = MemoryStore::default();
        let args = ImportArgs {
            secret: None,
            file: Some(path),
        };
        let mut out = Vec::new();
        let count = run_import(&args, &mut store, &dictionary(), &mut out, None).unwrap();
        assert_eq!(count, 0);
        assert_eq!(store.saves, 0);
        assert!(output(out).contains("No new connections were imported."));
    }

    #[test]
    fn import_missing_file_is_an_error() {
        let mut store = MemoryStore::default();
        let args = ImportArgs {
            secret: None,
            file: Some(PathBuf::from("/nonexistent/gsm/keys.txt")),
        };
        let err = run_import(&args, &mut store, &dictionary(), &mut Vec::new(), None).unwrap_err();
        assert!(err.to_string().contains("open import file"));
    }

    #[test]
    fn prompt_add_generates_name_when_blank() {
        let mut store = MemoryStore::default();
        let mut input = Cursor::new("\nsecret-key\n work , home \n");
        let mut out = Vec::new();
        let conn = prompt_add(&mut input, &mut out, &mut store, &dictionary()).unwrap();
        assert_eq!(
            conn.name,
            generate_mnemonic("secret-key", DEFAULT_WORD_COUNT, &dictionary()).unwrap()
        );
        assert_eq!(conn.tags, vec!["work", "home"]);
        assert_eq!(store.persisted.connections, vec![conn]);
    }

    #[test]
    fn prompt_add_rejects_missing_key_and_duplicates() {
        let mut store = MemoryStore::with(vec![Connection::new("Echo", "abc", vec![])]);
        let mut input = Cursor::new("Zulu\n\n\n");
        let err = prompt_add(&mut input, &mut Vec::new(), &mut store, &dictionary()).unwrap_err();
        assert_eq!(err.to_string(), STATUS_EMPTY_KEY);

        let mut input = Cursor::new("Echo\nother\n\n");
        let err = prompt_add(&mut input, &mut Vec::new(), &mut store, &dictionary()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(store.saves, 0);
    }

    #[test]
    fn record_launch_bumps_usage_on_reloaded_store() {
        let conn = Connection::new("Echo", "abc123", vec![]);
        let mut store = MemoryStore::with(vec![conn.clone()]);
        store.current.connections.clear();
        let now = Local::now();
        assert!(record_launch(&mut store, &conn, now).unwrap());
        assert_eq!(store.persisted.connections[0].usage, 1);
        assert_eq!(store.persisted.connections[0].last_connected, Some(now));

        let gone = Connection::new("Gone", "zzz", vec![]);
        assert!(!record_launch(&mut store, &gone, now).unwrap());
    }

    #[test]
    fn banners_show_name_and_key_preview() {
        let conn = Connection::new("Echo", "abcdefghijkl", vec![]);
        assert_eq!(
            connect_banner(&conn),
            "[+] Connecting to Echo (Key: abcdefgh...)"
        );
        assert_eq!(disconnect_banner(&conn, &Ok(())), "[<] Disconnected from Echo");
        let failed = disconnect_banner(&conn, &Err(anyhow::anyhow!("exit status: 1")));
        assert!(failed.contains("exit status: 1"));
    }
}
