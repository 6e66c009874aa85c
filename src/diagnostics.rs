use std::fmt::Write as _;

use crate::config::CONFIG_FILE;
use crate::error::Error;

/// ANSI bold, for headings on a terminal.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a short markdown diagnostic: what happened, then how to
/// fix it when there is something the user can do.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ConfigInvalid { path, reason } => format!(
            "\
# Error: Invalid Config

`{}`: {reason}

## Fix

List extensions with their leading dot:

    extensions = [\".md\", \".markdown\"]
",
            path.display()
        ),
        Error::DocumentNotFound { path } => format!(
            "\
# Error: Document Not Found

`{}` does not exist.
",
            path.display()
        ),
        Error::LineOutOfRange { line, total } => format!(
            "\
# Error: Line Out Of Range

Line {line} was requested but the document has {total} lines.

## Fix

`--line` is one-based, as the editor shows it.
"
        ),
        Error::OpenerFailed { program, target, status } => format!(
            "\
# Error: Opener Failed

`{program}` could not open `{target}` ({status}).
"
        ),
        Error::OpenerSpawn { program, source } => render_opener_spawn(program, source),
        Error::TomlDe(err) => format!(
            "\
# Error: Invalid TOML

{err}

## Fix

Check `{CONFIG_FILE}`.
"
        ),
        Error::Io(_) | Error::JsonSer(_) => format!(
            "\
# Error

{e}
"
        ),
    };
}

/// Spawn failures usually mean the launcher is not installed.
fn render_opener_spawn(program: &str, source: &std::io::Error) -> String {
    let mut out = format!(
        "\
# Error: Cannot Launch `{program}`

{source}
"
    );
    if source.kind() == std::io::ErrorKind::NotFound {
        let _ = write!(
            out,
            "\n## Fix\n\nInstall `{program}`, or point `$BROWSER` at a browser for web links.\n"
        );
    }
    return out;
}
