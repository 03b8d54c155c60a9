use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::model::Connection;

pub(crate) const GS_NETCAT_COMMAND: &str = "gs-netcat";

pub(crate) fn netcat_args(conn: &Connection) -> [&str; 3] {
    ["-i", "-s", conn.key.as_str()]
}

/// Runs an interactive gs-netcat session in the current terminal and blocks
/// until it exits.
pub(crate) fn execute(conn: &Connection) -> Result<()> {
    let status = Command::new(GS_NETCAT_COMMAND)
        .args(netcat_args(conn))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("start {GS_NETCAT_COMMAND}"))?;
    if !status.success() {
        anyhow::bail!("{GS_NETCAT_COMMAND} exited with {status}");
    }
    Ok(())
}
