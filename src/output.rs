use std::io::{self, Write};
use tracing::warn;

/// Writes a line of command output to stdout, and to `mirror` when the caller
/// captures output (the acceptance tests do).
pub fn println(message: &str, mirror: &mut Option<&mut dyn Write>) -> io::Result<()> {
    let stdout = io::stdout();
    emit(&mut stdout.lock(), mirror.as_deref_mut(), message)
}

fn emit<'a, 'b>(
    out: &mut dyn Write,
    mirror: Option<&'a mut (dyn Write + 'b)>,
    message: &str,
) -> io::Result<()> {
    // A closed stdout must not hide the line from the mirror.
    if let Err(e) = writeln!(out, "{message}") {
        warn!(error = %e, "failed to write to stdout");
    }
    match mirror {
        Some(w) => writeln!(w, "{message}"),
        None => Ok(()),
    }
}
