use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diff_hunk::{build_hunks, DiffHunk};
use crate::edit_op::EditOp;
use crate::error::DiffError;
use crate::patch;
use crate::token::{Comparison, DiffGranularity, Token};
use crate::unified::UnifiedDiff;

/// Token counts over a whole diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffStats {
    /// Tokens only in the new version
    pub added: usize,

    /// Tokens only in the old version
    pub removed: usize,

    /// Tokens in both versions
    pub unchanged: usize,
}

impl DiffStats {
    fn from_ops(ops: &[EditOp]) -> Self {
        ops.iter().fold(Self::default(), |mut stats, op| {
            match op {
                EditOp::Equal { old, .. } => stats.unchanged += old.len(),
                EditOp::Delete { old } => stats.removed += old.len(),
                EditOp::Insert { new } => stats.added += new.len(),
            }
            stats
        })
    }
}

/// A pair of tokens aligned as equal whose texts are not byte-identical.
///
/// Only produced when the comparison ignores whitespace or line endings.
/// Patching writes the text of the side being rebuilt, so both texts are
/// kept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EqualRewrite {
    pub old_index: usize,
    pub new_index: usize,
    pub old_text: String,
    pub new_text: String,
}

/// The outcome of comparing two texts.
///
/// Holds the full edit script, the display hunks built from it and summary
/// counts. It owns all of its text, so it outlives the compared inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffResult {
    granularity: DiffGranularity,
    context_lines: usize,
    comparison: Comparison,
    ops: Vec<EditOp>,
    hunks: Vec<DiffHunk>,
    rewrites: Vec<EqualRewrite>,
    stats: DiffStats,
}

impl DiffResult {
    pub(crate) fn new(
        granularity: DiffGranularity,
        context_lines: usize,
        comparison: Comparison,
        old: &[Token<'_>],
        new: &[Token<'_>],
        ops: Vec<EditOp>,
    ) -> Self {
        let mut hunks = build_hunks(&ops, context_lines);
        for hunk in &mut hunks {
            hunk.bind_lines(old, new);
        }
        let stats = DiffStats::from_ops(&ops);
        let rewrites = equal_rewrites(old, new, &ops);

        debug!(
            "{} diff: {} hunks, +{} -{} ={}",
            granularity,
            hunks.len(),
            stats.added,
            stats.removed,
            stats.unchanged
        );

        Self {
            granularity,
            context_lines,
            comparison,
            ops,
            hunks,
            rewrites,
            stats,
        }
    }

    /// The unit the texts were compared in
    pub fn granularity(&self) -> DiffGranularity {
        self.granularity
    }

    /// Context tokens kept around each change
    pub fn context_lines(&self) -> usize {
        self.context_lines
    }

    /// Whether whitespace differences were ignored when comparing
    pub fn ignores_whitespace(&self) -> bool {
        self.comparison.ignore_whitespace
    }

    /// Whether CRLF and LF line endings compared equal
    pub fn ignores_line_endings(&self) -> bool {
        self.comparison.ignore_line_endings
    }

    pub(crate) fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// The complete edit script
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    /// Get the hunks
    pub fn hunks(&self) -> &[DiffHunk] {
        &self.hunks
    }

    /// Equal token pairs whose texts differ, ordered by position
    pub fn rewrites(&self) -> &[EqualRewrite] {
        &self.rewrites
    }

    /// Get the number of hunks
    pub fn hunk_count(&self) -> usize {
        self.hunks.len()
    }

    /// Get a hunk by index
    pub fn hunk(&self, index: usize) -> Option<&DiffHunk> {
        self.hunks.get(index)
    }

    pub fn stats(&self) -> DiffStats {
        self.stats
    }

    /// Number of added tokens
    pub fn added(&self) -> usize {
        self.stats.added
    }

    /// Number of removed tokens
    pub fn removed(&self) -> usize {
        self.stats.removed
    }

    /// Number of unchanged tokens
    pub fn unchanged(&self) -> usize {
        self.stats.unchanged
    }

    /// Check if the diff has any changes
    pub fn has_changes(&self) -> bool {
        self.stats.added > 0 || self.stats.removed > 0
    }

    /// True when the texts compared equal under the diff's settings
    pub fn is_identical(&self) -> bool {
        !self.has_changes()
    }

    /// Render as a unified diff
    pub fn to_unified(&self) -> String {
        UnifiedDiff::new(self).to_string()
    }

    /// Rebuild the new text from the old one
    pub fn apply(&self, original: &str) -> Result<String, DiffError> {
        patch::apply_hunks(original, self)
    }

    /// Rebuild the old text from the new one
    pub fn revert(&self, revised: &str) -> Result<String, DiffError> {
        patch::revert_hunks(revised, self)
    }
}

fn equal_rewrites(old: &[Token<'_>], new: &[Token<'_>], ops: &[EditOp]) -> Vec<EqualRewrite> {
    ops.iter()
        .filter_map(|op| match op {
            EditOp::Equal { old: o, new: n } => Some(o.clone().zip(n.clone())),
            _ => None,
        })
        .flatten()
        .filter(|&(i, j)| old[i].text() != new[j].text())
        .map(|(i, j)| EqualRewrite {
            old_index: i,
            new_index: j,
            old_text: old[i].text().to_string(),
            new_text: new[j].text().to_string(),
        })
        .collect()
}
