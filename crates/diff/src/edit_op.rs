use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// One step of an edit script over two token sequences.
///
/// `old` ranges index the original sequence and `new` ranges the revised
/// one. Walking a valid script in order visits every index of both
/// sequences exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EditOp {
    /// Tokens present in both sequences
    Equal {
        old: Range<usize>,
        new: Range<usize>,
    },

    /// Tokens only present in the original sequence
    Delete { old: Range<usize> },

    /// Tokens only present in the revised sequence
    Insert { new: Range<usize> },
}

impl EditOp {
    /// The span of the original sequence this op covers, if any
    pub fn old_range(&self) -> Option<Range<usize>> {
        match self {
            Self::Equal { old, .. } | Self::Delete { old } => Some(old.clone()),
            Self::Insert { .. } => None,
        }
    }

    /// The span of the revised sequence this op covers, if any
    pub fn new_range(&self) -> Option<Range<usize>> {
        match self {
            Self::Equal { new, .. } | Self::Insert { new } => Some(new.clone()),
            Self::Delete { .. } => None,
        }
    }

    /// Number of original tokens covered
    pub fn old_len(&self) -> usize {
        self.old_range().map_or(0, |range| range.len())
    }

    /// Number of revised tokens covered
    pub fn new_len(&self) -> usize {
        self.new_range().map_or(0, |range| range.len())
    }

    /// Whether this op changes anything
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Equal { .. })
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal { old, new } => write!(f, "equal old[{old:?}] new[{new:?}]"),
            Self::Delete { old } => write!(f, "delete old[{old:?}]"),
            Self::Insert { new } => write!(f, "insert new[{new:?}]"),
        }
    }
}

/// Check that `ops` walk both sequences in order, without gaps or overlap,
/// and end exactly at `old_len` and `new_len`.
pub(crate) fn check_coverage(
    ops: &[EditOp],
    old_len: usize,
    new_len: usize,
) -> Result<(), DiffError> {
    let mut old_pos = 0;
    let mut new_pos = 0;

    for op in ops {
        if let Some(old) = op.old_range() {
            check_span(op, "old", &old, old_pos, old_len)?;
            old_pos = old.end;
        }
        if let Some(new) = op.new_range() {
            check_span(op, "new", &new, new_pos, new_len)?;
            new_pos = new.end;
        }
        if let EditOp::Equal { old, new } = op {
            if old.len() != new.len() {
                return Err(DiffError::reconstruction(
                    op,
                    format!("equal spans differ in length ({} vs {})", old.len(), new.len()),
                ));
            }
        }
    }

    if old_pos != old_len || new_pos != new_len {
        return Err(DiffError::Reconstruction {
            op: ops.last().cloned(),
            reason: format!(
                "ops cover {old_pos} of {old_len} old and {new_pos} of {new_len} new tokens"
            ),
        });
    }

    Ok(())
}

fn check_span(
    op: &EditOp,
    side: &str,
    span: &Range<usize>,
    expected_start: usize,
    len: usize,
) -> Result<(), DiffError> {
    if span.start != expected_start {
        return Err(DiffError::reconstruction(
            op,
            format!("{side} span starts at {} but {expected_start} was expected", span.start),
        ));
    }
    if span.end < span.start || span.end > len {
        return Err(DiffError::reconstruction(
            op,
            format!("{side} span {span:?} is outside 0..{len}"),
        ));
    }
    Ok(())
}

/// Merge neighbouring ops of the same kind and order every change run as
/// one delete followed by one insert.
pub(crate) fn coalesce(ops: &[EditOp]) -> Vec<EditOp> {
    let mut merged: Vec<EditOp> = Vec::with_capacity(ops.len());
    let mut pending_delete: Option<Range<usize>> = None;
    let mut pending_insert: Option<Range<usize>> = None;

    fn flush(
        merged: &mut Vec<EditOp>,
        delete: &mut Option<Range<usize>>,
        insert: &mut Option<Range<usize>>,
    ) {
        if let Some(old) = delete.take() {
            merged.push(EditOp::Delete { old });
        }
        if let Some(new) = insert.take() {
            merged.push(EditOp::Insert { new });
        }
    }

    for op in ops {
        match op {
            EditOp::Equal { old, new } => {
                if old.is_empty() {
                    continue;
                }
                flush(&mut merged, &mut pending_delete, &mut pending_insert);
                match merged.last_mut() {
                    Some(EditOp::Equal {
                        old: last_old,
                        new: last_new,
                    }) if last_old.end == old.start && last_new.end == new.start => {
                        last_old.end = old.end;
                        last_new.end = new.end;
                    }
                    _ => merged.push(op.clone()),
                }
            }
            EditOp::Delete { old } => extend(&mut pending_delete, old),
            EditOp::Insert { new } => extend(&mut pending_insert, new),
        }
    }
    flush(&mut merged, &mut pending_delete, &mut pending_insert);

    merged
}

fn extend(pending: &mut Option<Range<usize>>, span: &Range<usize>) {
    if span.is_empty() {
        return;
    }
    match pending {
        Some(range) => range.end = span.end,
        None => *pending = Some(span.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn coverage_accepts_complete_script() {
        let ops = vec![
            EditOp::Equal { old: 0..1, new: 0..1 },
            EditOp::Delete { old: 1..2 },
            EditOp::Insert { new: 1..3 },
        ];
        assert!(check_coverage(&ops, 2, 3).is_ok());
    }

    #[test]
    fn coverage_rejects_gap() {
        let ops = vec![
            EditOp::Equal { old: 0..1, new: 0..1 },
            EditOp::Delete { old: 2..3 },
        ];
        let err = check_coverage(&ops, 3, 1).unwrap_err();
        assert!(matches!(
            err,
            DiffError::Reconstruction { op: Some(EditOp::Delete { .. }), .. }
        ));
    }

    #[test]
    fn coverage_rejects_short_script() {
        let ops = vec![EditOp::Equal { old: 0..1, new: 0..1 }];
        assert!(check_coverage(&ops, 2, 1).is_err());
    }

    #[test]
    fn coalesce_orders_deletes_first() {
        let ops = vec![
            EditOp::Equal { old: 0..1, new: 0..1 },
            EditOp::Insert { new: 1..2 },
            EditOp::Delete { old: 1..2 },
            EditOp::Insert { new: 2..3 },
            EditOp::Equal { old: 2..3, new: 3..4 },
            EditOp::Equal { old: 3..4, new: 4..5 },
        ];
        assert_eq!(
            coalesce(&ops),
            vec![
                EditOp::Equal { old: 0..1, new: 0..1 },
                EditOp::Delete { old: 1..2 },
                EditOp::Insert { new: 1..3 },
                EditOp::Equal { old: 2..4, new: 3..5 },
            ]
        );
    }
}
