/// Core domain types shared by the link parser and the action resolver.
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Position inside a document. Both coordinates are zero-based; `column`
/// counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Character offset within the line.
    pub column: usize,
    /// Index of the line in the document.
    pub row: usize,
}

impl Cursor {
    /// Build a cursor from a zero-based row and column.
    pub const fn new(row: usize, column: usize) -> Self {
        return Self { column, row };
    }
}

/// What the link grammar captured after the link text.
/// Exactly one form exists per match; there is no "both" state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkMatch {
    /// `[text](target)`: the target is given inline.
    Direct(String),
    /// `[text][label]`: the target lives on a `[label]: target` line.
    Indirect(String),
}

/// Everything the resolver needs besides the target itself.
/// Replaces editor globals with explicit per-call values.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// Directory containing the document being edited. Relative targets are
    /// anchored here.
    pub current_document_dir: PathBuf,
    /// Extensions (with leading dot) that stay in the editor. When non-empty,
    /// any other extension is handed to the OS opener.
    pub excluded_extensions: BTreeSet<String>,
}
