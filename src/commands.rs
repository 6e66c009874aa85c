//! CLI commands for mdnav: resolve and open.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::action::{self, Action};
use crate::config::{Config, parse_extension_list};
use crate::error;
use crate::sink::{self, SystemSink};
use crate::types::{Cursor, ResolveContext};

/// Where the link lives and how to treat what it points at.
#[derive(Debug, Clone, clap::Args)]
pub struct LinkArgs {
    /// Zero-based character offset of the cursor within the line
    #[arg(long, short = 'c')]
    pub column: usize,
    /// Directory relative links are anchored at [default: the document's directory, or the working directory for stdin]
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// Comma-separated extensions that open in the editor, e.g. ".md,.txt" (overrides .mdnav.toml)
    #[arg(long, short = 'e')]
    pub extensions: Option<String>,
    /// Markdown document to read [default: stdin]
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
    /// One-based line number of the cursor
    #[arg(long, short = 'l')]
    pub line: usize,
}

/// Resolve the link under the cursor and execute the resulting action.
///
/// # Errors
///
/// Returns errors from reading the document or from the sink that runs the
/// action.
pub fn open(args: &LinkArgs, config: &Config) -> Result<(), error::Error> {
    let action = resolve_action(args, config)?;
    let stdout = std::io::stdout();
    let mut sink = SystemSink::for_platform(stdout.lock());
    return sink::execute(&action, &mut sink);
}

/// Resolve the link under the cursor and print the action descriptor.
///
/// # Errors
///
/// Returns errors from reading the document or serializing the descriptor.
pub fn resolve(args: &LinkArgs, config: &Config, json: bool) -> Result<(), error::Error> {
    let action = resolve_action(args, config)?;
    if json {
        println!("{}", serde_json::to_string(&action)?);
    } else {
        println!("{action}");
    }
    return Ok(());
}

/// Read the document, build the cursor and context, and classify the link.
///
/// # Errors
///
/// Returns `Error::DocumentNotFound`, `Error::Io`, or `Error::LineOutOfRange`.
fn resolve_action(args: &LinkArgs, config: &Config) -> Result<Action, error::Error> {
    let document = read_document(args.file.as_deref())?;
    let cursor = cursor_from_editor_position(args.line, args.column, document.len())?;
    let context = ResolveContext {
        current_document_dir: document_dir(args)?,
        excluded_extensions: args
            .extensions
            .as_deref()
            .map_or_else(|| return config.extensions.clone(), parse_extension_list),
    };

    debug!(?cursor, dir = %context.current_document_dir.display(), "resolve");
    return Ok(action::resolve_at(cursor, &document, &context));
}

/// Convert the editor's one-based line into a zero-based cursor row.
///
/// # Errors
///
/// Returns `Error::LineOutOfRange` for line 0 or a line past the end.
fn cursor_from_editor_position(line: usize, column: usize, total: usize) -> Result<Cursor, error::Error> {
    return match line.checked_sub(1) {
        Some(row) if row < total => Ok(Cursor::new(row, column)),
        _ => Err(error::Error::LineOutOfRange { line, total }),
    };
}

/// Directory relative links are anchored at: `--dir`, else the absolute
/// directory of `--file`, else the working directory.
///
/// # Errors
///
/// Returns `Error::Io` if an absolute path cannot be formed.
fn document_dir(args: &LinkArgs) -> Result<PathBuf, error::Error> {
    if let Some(dir) = &args.dir {
        return Ok(dir.clone());
    }
    let Some(file) = &args.file else {
        return Ok(std::env::current_dir()?);
    };
    let absolute = std::path::absolute(file)?;
    return Ok(absolute.parent().map(Path::to_path_buf).unwrap_or_default());
}

/// Read the document lines from `file`, or from stdin when there is none.
/// An empty document still has one empty line, as an editor buffer does.
///
/// # Errors
///
/// Returns `Error::DocumentNotFound` if the file does not exist, or
/// `Error::Io` for other read failures.
fn read_document(file: Option<&Path>) -> Result<Vec<String>, error::Error> {
    let content = match file {
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        },
        Some(path) => match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(error::Error::DocumentNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(error::Error::Io(e)),
            Ok(c) => c,
        },
    };
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    return Ok(lines);
}
