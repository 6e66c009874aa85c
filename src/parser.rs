//! Link parser: find the markdown link around a cursor and extract its target.
//!
//! Only the lexical shape of a link is recognized. There is no escape handling,
//! so `\[` opens a link like any other bracket, and reference definitions must
//! start at column 0.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::{Cursor, LinkMatch};

/// `[text](direct)` or `[text][indirect]`, followed by anything.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^\[[^\]]*\](?:\((?P<direct>[^)]*)\)|\[(?P<indirect>[^\]]*)\])")
        .expect("valid regex");
});

/// Resolve the link under `cursor` to its raw target string.
///
/// Direct targets are returned as written; indirect targets are looked up
/// with [`find_reference_definition`]. Returns `None` when the cursor is not
/// inside a link, the link is malformed, or a reference has no definition.
pub fn parse_link<S: AsRef<str>>(cursor: Cursor, document: &[S]) -> Option<String> {
    let Some(line) = document.get(cursor.row).map(|line| return line.as_ref()) else {
        debug!(row = cursor.row, total = document.len(), "cursor row outside document");
        return None;
    };

    debug!(line, row = cursor.row, column = cursor.column, "handle line");
    let Some(link_text) = select_from_start_of_link(line, cursor.column) else {
        debug!("could not find link text");
        return None;
    };

    let Some(link) = match_link(link_text) else {
        debug!(link_text, "does not match link pattern");
        return None;
    };

    return match link {
        LinkMatch::Direct(target) => {
            debug!(link_target = target.as_str(), "found direct link");
            Some(target)
        },
        LinkMatch::Indirect(label) => {
            debug!(label = label.as_str(), "follow indirect link");
            find_reference_definition(&label, document)
        },
    };
}

/// Slice `line` from the nearest `[` at or before `column` to end of line.
///
/// The character under the cursor is part of the search, so a cursor resting
/// on the opening bracket still selects its link. Columns past the end of the
/// line search the whole line.
pub fn select_from_start_of_link(line: &str, column: usize) -> Option<&str> {
    let end = line
        .char_indices()
        .nth(column)
        .map_or(line.len(), |(idx, ch)| return idx.saturating_add(ch.len_utf8()));

    let start = line.get(..end)?.rfind('[')?;
    return line.get(start..);
}

/// Apply the link grammar to text that begins at a `[`.
pub fn match_link(text: &str) -> Option<LinkMatch> {
    let caps = LINK_PATTERN.captures(text)?;

    if let Some(direct) = caps.name("direct") {
        return Some(LinkMatch::Direct(direct.as_str().to_string()));
    }

    return caps
        .name("indirect")
        .map(|indirect| return LinkMatch::Indirect(indirect.as_str().to_string()));
}

/// Find the first `[label]:` line in the document and return what follows the
/// colon, trimmed. The label is compared literally. Later duplicates are
/// ignored and indented definitions never match.
pub fn find_reference_definition<S: AsRef<str>>(label: &str, document: &[S]) -> Option<String> {
    let found = document.iter().find_map(|line| {
        return line
            .as_ref()
            .strip_prefix('[')
            .and_then(|rest| return rest.strip_prefix(label))
            .and_then(|rest| return rest.strip_prefix("]:"));
    });

    if found.is_none() {
        debug!(label, "no reference definition");
    }

    return found.map(|target| return target.trim().to_string());
}
