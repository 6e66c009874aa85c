//! Action resolver: decide how a resolved link target should be opened.
//!
//! The result is an [`Action`] descriptor. Nothing here touches the
//! filesystem or launches anything; executing the descriptor is the caller's
//! job (see `crate::sink`).

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::parser;
use crate::types::{Cursor, ResolveContext};

/// Prefix some static site generators put in front of intra-site paths.
const FILENAME_PREFIX: &str = "|filename|";

/// RFC 3986 scheme: a letter, then letters, digits, `+`, `-` or `.`, then `:`.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static SCHEME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid regex");
});

/// What should happen to the link under the cursor.
/// Pure data: equal descriptors describe the same effect.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum Action {
    /// No link under the cursor, or nothing it points at.
    NoOp,
    /// Hand a URL to the default browser.
    OpenInBrowser(String),
    /// Edit the path in the host editor.
    OpenInEditor(String),
    /// Hand the path to the platform's "open with default application".
    OpenWithOs(String),
}

impl fmt::Display for Action {
    /// One line: the variant name, then the target when there is one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::NoOp => write!(f, "NoOp"),
            Self::OpenInBrowser(target) => write!(f, "OpenInBrowser {target}"),
            Self::OpenInEditor(target) => write!(f, "OpenInEditor {target}"),
            Self::OpenWithOs(target) => write!(f, "OpenWithOs {target}"),
        };
    }
}

/// Classify a resolved target. The first matching rule wins:
///
/// 1. nothing to open → `NoOp`
/// 2. an extension filter is set and the target's extension is not in it →
///    `OpenWithOs`
/// 3. the target has a URI scheme → `OpenInBrowser`
/// 4. a `|filename|` prefix is dropped
/// 5. absolute paths → `OpenInEditor` as-is
/// 6. anything else → `OpenInEditor`, anchored at the document's directory
pub fn resolve(target: Option<&str>, context: &ResolveContext) -> Action {
    let target = target.map_or("", str::trim);

    if target.is_empty() {
        debug!("no target");
        return Action::NoOp;
    }

    if !is_editor_extension(target, &context.excluded_extensions) {
        debug!(link_target = target, "extension not handled in the editor");
        return Action::OpenWithOs(target.to_string());
    }

    if has_scheme(target) {
        debug!(link_target = target, "has scheme, open in browser");
        return Action::OpenInBrowser(target.to_string());
    }

    let target = target.strip_prefix(FILENAME_PREFIX).unwrap_or(target);
    let path = Path::new(target);

    if path.has_root() {
        debug!(link_target = target, "absolute path");
        return Action::OpenInEditor(target.to_string());
    }

    debug!(
        link_target = target,
        dir = %context.current_document_dir.display(),
        "anchor path relative to document"
    );
    let anchored = context.current_document_dir.join(path);
    return Action::OpenInEditor(anchored.to_string_lossy().into_owned());
}

/// Parse the link under `cursor` and classify its target in one step.
pub fn resolve_at<S: AsRef<str>>(cursor: Cursor, document: &[S], context: &ResolveContext) -> Action {
    let target = parser::parse_link(cursor, document);
    return resolve(target.as_deref(), context);
}

/// Whether the target stays in the editor under the configured filter.
/// An empty filter admits everything.
fn is_editor_extension(target: &str, extensions: &BTreeSet<String>) -> bool {
    if extensions.is_empty() {
        return true;
    }
    return extensions.contains(&extension_of(target));
}

/// The target's extension with its leading dot, or `""` when there is none.
/// A trailing separator means the last component is empty, so there is no
/// extension.
fn extension_of(target: &str) -> String {
    if target.ends_with(std::path::is_separator) {
        return String::new();
    }
    return Path::new(target)
        .extension()
        .map(|ext| return format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
}

/// Whether the target starts with a URI scheme such as `https:` or `mailto:`.
fn has_scheme(target: &str) -> bool {
    return SCHEME_PATTERN.is_match(target);
}
