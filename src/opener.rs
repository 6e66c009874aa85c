//! Platform openers: hand a path or URL to whatever the OS uses to open it.

use std::process::Command;

use tracing::debug;

use crate::error::Error;

/// Something that can open a target outside the editor.
pub trait ExternalOpener {
    /// Program name, for diagnostics.
    fn name(&self) -> &str;

    /// Open `target`, blocking until the launcher returns.
    ///
    /// # Errors
    ///
    /// Returns `Error::OpenerSpawn` if the launcher cannot be started, or
    /// `Error::OpenerFailed` if it exits unsuccessfully.
    fn open(&self, target: &str) -> Result<(), Error>;
}

/// Linux and the other freedesktop platforms: `xdg-open <target>`.
pub struct XdgOpen;

impl ExternalOpener for XdgOpen {
    fn name(&self) -> &str {
        return "xdg-open";
    }

    fn open(&self, target: &str) -> Result<(), Error> {
        return run_launcher("xdg-open", &[], target);
    }
}

/// macOS: `open <target>`.
pub struct MacOpen;

impl ExternalOpener for MacOpen {
    fn name(&self) -> &str {
        return "open";
    }

    fn open(&self, target: &str) -> Result<(), Error> {
        return run_launcher("open", &[], target);
    }
}

/// Windows file associations via `cmd /C start "" <target>`.
/// The empty string is the window title `start` expects first.
pub struct WindowsStart;

impl ExternalOpener for WindowsStart {
    fn name(&self) -> &str {
        return "start";
    }

    fn open(&self, target: &str) -> Result<(), Error> {
        return run_launcher("cmd", &["/C", "start", ""], target);
    }
}

/// Browser named by `$BROWSER`, falling back to the platform opener.
///
/// `$BROWSER` may list several commands separated by the platform's path
/// separator; the first one is used. A `%s` in it is replaced by the URL,
/// otherwise the URL is appended as the last argument.
pub struct Browser {
    /// The command from `$BROWSER`, if set and non-empty.
    command: Option<String>,
    /// Used when no browser command is configured.
    fallback: Box<dyn ExternalOpener>,
}

impl Browser {
    /// Read `$BROWSER` from the environment.
    pub fn from_env(fallback: Box<dyn ExternalOpener>) -> Self {
        let command = std::env::var("BROWSER").ok().and_then(|value| return first_browser_entry(&value));
        return Self { command, fallback };
    }
}

impl ExternalOpener for Browser {
    fn name(&self) -> &str {
        return self.command.as_deref().unwrap_or_else(|| return self.fallback.name());
    }

    fn open(&self, target: &str) -> Result<(), Error> {
        let Some(command) = &self.command else {
            return self.fallback.open(target);
        };

        let mut words = command.split_whitespace();
        let Some(program) = words.next() else {
            return self.fallback.open(target);
        };

        if command.contains("%s") {
            let args: Vec<String> = words.map(|w| return w.replace("%s", target)).collect();
            debug!(program, ?args, "launch browser");
            let status = Command::new(program).args(&args).status().map_err(|source| {
                return Error::OpenerSpawn { program: program.to_string(), source };
            })?;
            return check_status(program, status, target);
        }

        let args: Vec<&str> = words.collect();
        return run_launcher(program, &args, target);
    }
}

/// Pick the opener for the platform this binary runs on.
pub fn platform_opener() -> Box<dyn ExternalOpener> {
    return opener_for(std::env::consts::OS);
}

/// Opener for a `std::env::consts::OS` value. Anything that is neither macOS
/// nor Windows is assumed to have `xdg-open`.
fn opener_for(os: &str) -> Box<dyn ExternalOpener> {
    return match os {
        "macos" => Box::new(MacOpen),
        "windows" => Box::new(WindowsStart),
        _ => Box::new(XdgOpen),
    };
}

/// First non-empty command in a `$BROWSER` list.
fn first_browser_entry(value: &str) -> Option<String> {
    let separator = if cfg!(windows) { ';' } else { ':' };
    return value
        .split(separator)
        .map(str::trim)
        .find(|entry| return !entry.is_empty())
        .map(str::to_string);
}

/// Run `program args.. target` and wait for it.
///
/// # Errors
///
/// Returns `Error::OpenerSpawn` or `Error::OpenerFailed`.
fn run_launcher(program: &str, args: &[&str], target: &str) -> Result<(), Error> {
    debug!(program, ?args, link_target = target, "launch opener");
    let status = Command::new(program)
        .args(args)
        .arg(target)
        .status()
        .map_err(|source| return Error::OpenerSpawn { program: program.to_string(), source })?;
    return check_status(program, status, target);
}

/// Turn a non-zero exit into an error.
///
/// # Errors
///
/// Returns `Error::OpenerFailed` when `status` is not a success.
fn check_status(program: &str, status: std::process::ExitStatus, target: &str) -> Result<(), Error> {
    if status.success() {
        return Ok(());
    }
    return Err(Error::OpenerFailed {
        program: program.to_string(),
        status,
        target: target.to_string(),
    });
}
