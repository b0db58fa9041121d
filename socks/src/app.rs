//! The interactive loop: read a line, apply it, redraw.

use std::io::{BufRead, Write};

use rand::Rng;

use crate::commands::{parse_command, HELP};
use crate::render::render_snapshot;
use crate::session::{Session, SessionReply};

/// Drive `session` from `input` until `quit` or end of input.
pub fn run<R, I, W>(session: &mut Session<R>, input: I, output: &mut W) -> std::io::Result<()>
where
    R: Rng,
    I: BufRead,
    W: Write,
{
    writeln!(output, "{}", render_snapshot(&session.snapshot()))?;
    writeln!(output, "{}", HELP)?;
    prompt(output)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{}", e)?;
                prompt(output)?;
                continue;
            }
        };
        tracing::debug!(?command, "Command received");

        match session.apply(command) {
            SessionReply::Snapshot(snapshot) => {
                writeln!(output, "{}", render_snapshot(&snapshot))?;
            }
            SessionReply::Info(text) => writeln!(output, "{}", text)?,
            SessionReply::Rejected(reason) => writeln!(output, "Not allowed: {}", reason)?,
            SessionReply::Quit => {
                writeln!(output, "Bye.")?;
                return Ok(());
            }
        }
        prompt(output)?;
    }

    Ok(())
}

fn prompt<W: Write>(output: &mut W) -> std::io::Result<()> {
    write!(output, "socks> ")?;
    output.flush()
}
