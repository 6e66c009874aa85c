//! Executing action descriptors against the outside world.

use std::io::Write;

use tracing::debug;

use crate::action::Action;
use crate::error::Error;
use crate::opener::{Browser, ExternalOpener, platform_opener};

/// Characters Vim's `fnameescape()` backslash-escapes in file names.
const EDIT_COMMAND_SPECIALS: &[char] = &[
    ' ', '\t', '\n', '*', '?', '[', '{', '`', '$', '\\', '%', '#', '\'', '"', '|', '!', '<',
];

/// The effects an action can have. Each call performs exactly one of them.
pub trait ActionSink {
    /// Open a URL in the default browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser cannot be launched.
    fn open_in_browser(&mut self, url: &str) -> Result<(), Error>;

    /// Edit a file in the host editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor command cannot be delivered.
    fn open_in_editor(&mut self, path: &str) -> Result<(), Error>;

    /// Open a file with the platform's default application.
    ///
    /// # Errors
    ///
    /// Returns an error if the opener cannot be launched or fails.
    fn open_with_os(&mut self, path: &str) -> Result<(), Error>;

    /// Tell the user there was nothing to follow.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be written.
    fn report_no_link(&mut self) -> Result<(), Error>;
}

/// Run `action` against `sink`.
///
/// # Errors
///
/// Propagates whatever the sink reports; nothing is retried.
pub fn execute(action: &Action, sink: &mut dyn ActionSink) -> Result<(), Error> {
    debug!(%action, "execute");
    return match action {
        Action::NoOp => sink.report_no_link(),
        Action::OpenInBrowser(url) => sink.open_in_browser(url),
        Action::OpenInEditor(path) => sink.open_in_editor(path),
        Action::OpenWithOs(path) => sink.open_with_os(path),
    };
}

/// The real sinks: platform openers for the outside world, and editor
/// commands written to `editor` for the host integration to run. Everything
/// on `editor` is an Ex command, status messages included, so the host can
/// execute the output verbatim.
pub struct SystemSink<W: Write> {
    /// Launches URLs.
    browser: Box<dyn ExternalOpener>,
    /// Receives `edit` and `echo` commands.
    editor: W,
    /// Launches files with their default application.
    opener: Box<dyn ExternalOpener>,
}

impl<W: Write> SystemSink<W> {
    /// Sinks for the current platform, writing editor commands to `editor`.
    pub fn for_platform(editor: W) -> Self {
        return Self {
            browser: Box::new(Browser::from_env(platform_opener())),
            editor,
            opener: platform_opener(),
        };
    }

    /// Write one command line to the editor channel.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the channel cannot be written.
    fn send_editor_command(&mut self, command: &str) -> Result<(), Error> {
        writeln!(self.editor, "{command}")?;
        self.editor.flush()?;
        return Ok(());
    }
}

impl<W: Write> ActionSink for SystemSink<W> {
    fn open_in_browser(&mut self, url: &str) -> Result<(), Error> {
        self.send_editor_command(&echo_command("<mdnav: open browser tab>"))?;
        return self.browser.open(url);
    }

    fn open_in_editor(&mut self, path: &str) -> Result<(), Error> {
        return self.send_editor_command(&edit_command(path));
    }

    fn open_with_os(&mut self, path: &str) -> Result<(), Error> {
        debug!(opener = self.opener.name(), path, "open with default application");
        return self.opener.open(path);
    }

    fn report_no_link(&mut self) -> Result<(), Error> {
        return self.send_editor_command(&echo_command("<mdnav: no link>"));
    }
}

/// An `echo` command showing `message` in the editor's message area.
pub fn echo_command(message: &str) -> String {
    let quoted = message.replace('\\', "\\\\").replace('"', "\\\"");
    return format!("echo \"{quoted}\"");
}

/// The editor command that opens `path`, with file-name specials escaped.
pub fn edit_command(path: &str) -> String {
    let mut command = String::with_capacity(path.len().saturating_add(5));
    command.push_str("edit ");
    for ch in path.chars() {
        if EDIT_COMMAND_SPECIALS.contains(&ch) {
            command.push('\\');
        }
        command.push(ch);
    }
    return command;
}
