use derive_more::Display;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::edit_op::{check_coverage, coalesce, EditOp};
use crate::token::Token;

/// Represents the status of a diff hunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffHunkStatus {
    /// The hunk only adds content
    #[display(fmt = "Added")]
    Added,

    /// The hunk only removes content
    #[display(fmt = "Deleted")]
    Deleted,

    /// The hunk both removes and adds content
    #[display(fmt = "Modified")]
    Modified,
}

/// Represents a range of tokens (lines, words or characters) in a diff
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffHunkRange {
    /// The starting token (0-based)
    pub start: usize,

    /// The number of tokens
    pub count: usize,
}

impl DiffHunkRange {
    /// Create a new range from start and count
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    /// Create a range from a start and end (exclusive)
    pub fn from_range(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            count: range.end - range.start,
        }
    }

    /// Convert to a standard Range
    pub fn to_range(&self) -> Range<usize> {
        self.start..(self.start + self.count)
    }

    /// Get the end of the range (exclusive)
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// Check if this range is empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if this range contains the given token
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    /// The start as written in a unified diff header.
    ///
    /// Numbers are 1-based; an empty range names the token before it, so
    /// an insertion at the top of a file starts at 0.
    pub fn unified_start(&self) -> usize {
        if self.count == 0 {
            self.start
        } else {
            self.start + 1
        }
    }
}

/// Represents the type of a line in a diff hunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffLineType {
    /// Line only exists in old version (deleted)
    OldOnly,

    /// Line only exists in new version (added)
    NewOnly,

    /// Line exists in both versions (context)
    Both,
}

impl DiffLineType {
    /// The unified diff prefix for this kind of line
    pub fn prefix(&self) -> char {
        match self {
            DiffLineType::OldOnly => '-',
            DiffLineType::NewOnly => '+',
            DiffLineType::Both => ' ',
        }
    }
}

/// One displayed token of a hunk
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffLine {
    pub line_type: DiffLineType,

    /// Token text, taken from the old version for context lines
    pub text: String,

    /// Token index in the old version, unless the token was added
    pub old_index: Option<usize>,

    /// Token index in the new version, unless the token was deleted
    pub new_index: Option<usize>,

    /// Source line the token starts on, in the version it was taken from
    pub source_line: usize,
}

/// Represents a hunk of changes between two versions of text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffHunk {
    /// The primary status of the hunk
    pub status: DiffHunkStatus,

    /// The range of tokens in the old version
    pub old_range: DiffHunkRange,

    /// The range of tokens in the new version
    pub new_range: DiffHunkRange,

    /// The edit ops shown by this hunk, context ops trimmed to the hunk
    pub ops: Vec<EditOp>,

    /// One entry per displayed token, in op order.
    ///
    /// Empty for hunks fresh from [`build_hunks`]; filled once the hunk is
    /// bound to the tokens it describes.
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// The unified diff header, `@@ -a,b +c,d @@`
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_range.unified_start(),
            self.old_range.count,
            self.new_range.unified_start(),
            self.new_range.count
        )
    }

    /// Check if this hunk has any changes
    pub fn has_changes(&self) -> bool {
        self.ops.iter().any(EditOp::is_change)
    }

    /// Get the number of added tokens in this hunk
    pub fn added_lines(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EditOp::Insert { .. }))
            .map(EditOp::new_len)
            .sum()
    }

    /// Get the number of deleted tokens in this hunk
    pub fn deleted_lines(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EditOp::Delete { .. }))
            .map(EditOp::old_len)
            .sum()
    }

    /// Get the number of context tokens in this hunk
    pub fn unchanged_lines(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| !op.is_change())
            .map(EditOp::old_len)
            .sum()
    }

    /// Get the line type at the given index
    pub fn line_type(&self, index: usize) -> Option<DiffLineType> {
        self.lines.get(index).map(|line| line.line_type)
    }

    /// Materialise `lines` from the tokens the hunk's ops index into
    pub(crate) fn bind_lines(&mut self, old: &[Token<'_>], new: &[Token<'_>]) {
        let mut lines = Vec::with_capacity(self.old_range.count.max(self.new_range.count));

        for op in &self.ops {
            match op {
                EditOp::Equal { old: o, new: n } => {
                    for (i, j) in o.clone().zip(n.clone()) {
                        lines.push(DiffLine {
                            line_type: DiffLineType::Both,
                            text: old[i].text().to_string(),
                            old_index: Some(i),
                            new_index: Some(j),
                            source_line: old[i].line(),
                        });
                    }
                }
                EditOp::Delete { old: o } => {
                    lines.extend(o.clone().map(|i| DiffLine {
                        line_type: DiffLineType::OldOnly,
                        text: old[i].text().to_string(),
                        old_index: Some(i),
                        new_index: None,
                        source_line: old[i].line(),
                    }));
                }
                EditOp::Insert { new: n } => {
                    lines.extend(n.clone().map(|j| DiffLine {
                        line_type: DiffLineType::NewOnly,
                        text: new[j].text().to_string(),
                        old_index: None,
                        new_index: Some(j),
                        source_line: new[j].line(),
                    }));
                }
            }
        }

        self.lines = lines;
    }
}

/// Accumulates the ops of one hunk while walking an edit script
struct HunkBuilder {
    old_start: usize,
    new_start: usize,
    old_count: usize,
    new_count: usize,
    ops: Vec<EditOp>,
}

impl HunkBuilder {
    fn new(old_start: usize, new_start: usize) -> Self {
        Self {
            old_start,
            new_start,
            old_count: 0,
            new_count: 0,
            ops: Vec::new(),
        }
    }

    fn push(&mut self, op: EditOp) {
        self.old_count += op.old_len();
        self.new_count += op.new_len();
        self.ops.push(op);
    }

    fn finish(self) -> DiffHunk {
        let adds = self.ops.iter().any(|op| matches!(op, EditOp::Insert { .. }));
        let deletes = self.ops.iter().any(|op| matches!(op, EditOp::Delete { .. }));
        let status = match (deletes, adds) {
            (true, true) => DiffHunkStatus::Modified,
            (true, false) => DiffHunkStatus::Deleted,
            _ => DiffHunkStatus::Added,
        };

        DiffHunk {
            status,
            old_range: DiffHunkRange::new(self.old_start, self.old_count),
            new_range: DiffHunkRange::new(self.new_start, self.new_count),
            ops: self.ops,
            lines: Vec::new(),
        }
    }
}

/// Group an edit script into display hunks with up to `context` tokens of
/// unchanged text around each change.
///
/// Changes separated by at most `2 * context` unchanged tokens share a hunk.
/// With `context == 0` every change run is its own hunk.
///
/// # Panics
///
/// Panics if `ops` does not cover two token sequences in order without gaps
/// or overlap. Scripts from [`crate::align`] always do; anything else is a
/// bug in whatever produced the script.
pub fn build_hunks(ops: &[EditOp], context: usize) -> Vec<DiffHunk> {
    let old_len = ops.iter().map(EditOp::old_len).sum();
    let new_len = ops.iter().map(EditOp::new_len).sum();
    if let Err(err) = check_coverage(ops, old_len, new_len) {
        panic!("cannot build hunks from an inconsistent edit script: {err}");
    }

    let ops = coalesce(ops);
    let last_change = match ops.iter().rposition(EditOp::is_change) {
        Some(index) => index,
        None => return Vec::new(),
    };

    let mut hunks = Vec::new();
    let mut current: Option<HunkBuilder> = None;
    let mut old_pos = 0;
    let mut new_pos = 0;

    for (index, op) in ops.iter().enumerate() {
        match op {
            EditOp::Equal { old, new } => {
                let len = old.len();
                if let Some(mut builder) = current.take() {
                    if index < last_change && len <= 2 * context {
                        builder.push(op.clone());
                        current = Some(builder);
                    } else {
                        let trailing = len.min(context);
                        if trailing > 0 {
                            builder.push(EditOp::Equal {
                                old: old.start..old.start + trailing,
                                new: new.start..new.start + trailing,
                            });
                        }
                        hunks.push(builder.finish());
                    }
                }
            }
            EditOp::Delete { .. } | EditOp::Insert { .. } => {
                if current.is_none() {
                    let mut builder = HunkBuilder::new(old_pos, new_pos);
                    // Leading context comes from the tail of the equal run before
                    if let Some(EditOp::Equal { old, new }) = index.checked_sub(1).map(|p| &ops[p])
                    {
                        let take = old.len().min(context);
                        if take > 0 {
                            builder = HunkBuilder::new(old.end - take, new.end - take);
                            builder.push(EditOp::Equal {
                                old: old.end - take..old.end,
                                new: new.end - take..new.end,
                            });
                        }
                    }
                    current = Some(builder);
                }
                if let Some(builder) = current.as_mut() {
                    builder.push(op.clone());
                }
            }
        }

        old_pos += op.old_len();
        new_pos += op.new_len();
    }

    if let Some(builder) = current {
        hunks.push(builder.finish());
    }

    hunks
}
