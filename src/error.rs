/// Crate-level error types for mdnav diagnostics.
use std::path::PathBuf;

/// Failures that reach the user. Link lookups that find nothing are not errors;
/// they resolve to `Action::NoOp`. Each variant names the file, program, or
/// reason so the message is useful without a debugger.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `.mdnav.toml` parsed as TOML but holds a value we cannot use.
    #[error("invalid config {}: {reason}", path.display())]
    ConfigInvalid {
        /// Path to the offending config file.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// The markdown document passed with `--file` does not exist.
    #[error("document not found: {}", path.display())]
    DocumentNotFound {
        /// Path to the missing document.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem or a standard stream.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of an action descriptor failed.
    #[error("json serialize: {0}")]
    JsonSer(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// The requested cursor line is not part of the document.
    #[error("line {line} is out of range (document has {total} lines)")]
    LineOutOfRange {
        /// One-based line number that was requested.
        line: usize,
        /// Number of lines in the document.
        total: usize,
    },

    /// An external opener ran but reported failure.
    #[error("`{program}` failed to open `{target}` ({status})")]
    OpenerFailed {
        /// Program that was invoked.
        program: String,
        /// Exit status reported by the program.
        status: std::process::ExitStatus,
        /// Target handed to the program.
        target: String,
    },

    /// An external opener could not be started at all.
    #[error("could not launch `{program}`: {source}")]
    OpenerSpawn {
        /// Program that was invoked.
        program: String,
        /// The spawn failure.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
