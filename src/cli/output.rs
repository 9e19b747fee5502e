//! Where rendered output goes: stdout, or the user's pager on a terminal

use std::io::{self, IsTerminal, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Print `text`, piping it through `pager` when stdout is a terminal and a
/// pager command is configured.
pub fn emit(text: &str, pager: Option<&str>) -> io::Result<()> {
    let pager = pager.map(str::trim).filter(|p| !p.is_empty());

    match pager {
        Some(cmd) if io::stdout().is_terminal() => page(text, cmd),
        _ => {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())?;
            out.flush()
        }
    }
}

/// Print a failed command's error chain once. The log only gets the debug
/// representation, so `-v` output does not repeat the message.
pub fn report_error(err: &anyhow::Error, out: &mut impl Write) -> io::Result<()> {
    debug!(error = ?err, "command failed");
    writeln!(out, "Error: {:#}", err)
}

fn page(text: &str, cmd: &str) -> io::Result<()> {
    debug!(pager = %cmd, "writing output through pager");

    let mut child = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(text.as_bytes()) {
            // The pager quit before reading everything.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
            other => other?,
        }
    }

    let status = child.wait()?;
    if !status.success() {
        debug!(%status, "pager exited unsuccessfully");
    }

    Ok(())
}
