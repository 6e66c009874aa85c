use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Error;

/// Name of the per-project config file.
pub const CONFIG_FILE: &str = ".mdnav.toml";

/// Settings loaded from `.mdnav.toml`.
/// An empty extension set means every target is eligible for the editor.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Whether debug logging is on.
    pub debug: bool,
    /// Extensions, with leading dot, that open in the editor.
    pub extensions: BTreeSet<String>,
}

/// Raw TOML structure for `.mdnav.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct MdnavTomlConfig {
    /// Debug logging switch.
    #[serde(default)]
    debug: bool,
    /// Either a list or a comma-separated string.
    #[serde(default)]
    extensions: Option<ExtensionList>,
}

/// The two accepted spellings of the extension list.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ExtensionList {
    /// `extensions = ".md, .txt"`
    Joined(String),
    /// `extensions = [".md", ".txt"]`
    List(Vec<String>),
}

impl Config {
    /// Load config from `.mdnav.toml` in the given directory.
    /// Returns the default if the file doesn't exist. Returns an error if the
    /// file exists but is malformed; a config file the user wrote is never
    /// silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed, or `Error::ConfigInvalid`
    /// if an extension lacks its leading dot.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: MdnavTomlConfig = toml::from_str(&content)?;
        let extensions = match raw.extensions {
            None => BTreeSet::new(),
            Some(ExtensionList::Joined(joined)) => parse_extension_list(&joined),
            Some(ExtensionList::List(list)) => normalize_extensions(list.iter().map(String::as_str)),
        };

        if let Some(bad) = extensions.iter().find(|ext| return !ext.starts_with('.')) {
            return Err(Error::ConfigInvalid {
                path,
                reason: format!("extension `{bad}` must start with a dot"),
            });
        }

        return Ok(Self { debug: raw.debug, extensions });
    }
}

/// Split a comma-separated extension list such as `".md, .txt"`.
/// Entries are trimmed and empty entries dropped.
pub fn parse_extension_list(joined: &str) -> BTreeSet<String> {
    return normalize_extensions(joined.split(','));
}

/// Trim entries and drop the empty ones.
fn normalize_extensions<'a>(entries: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    return entries
        .map(str::trim)
        .filter(|ext| return !ext.is_empty())
        .map(str::to_string)
        .collect();
}
