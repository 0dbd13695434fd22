//! Rebuilding one side of a diff from the other.
//!
//! The token-level functions replay an edit script over both token
//! sequences. The text-level functions only need a [`DiffResult`] and one
//! input text: unchanged text between hunks is copied from the input and
//! every hunk is checked against the input before it is applied. Tokens
//! that only compared equal under a relaxed comparison are written with
//! the text of the side being rebuilt.

use std::collections::HashMap;

use log::debug;

use crate::diff_result::DiffResult;
use crate::edit_op::{check_coverage, EditOp};
use crate::error::DiffError;
use crate::token::{tokenize, Token};

/// Rebuild `new` from `old` and the script: equal and deleted spans are
/// read from `old`, inserted spans from `new`.
pub fn apply_ops<'a>(
    old: &[Token<'a>],
    new: &[Token<'a>],
    ops: &[EditOp],
) -> Result<Vec<Token<'a>>, DiffError> {
    check_coverage(ops, old.len(), new.len())?;

    let mut rebuilt = Vec::with_capacity(new.len());
    for op in ops {
        match op {
            EditOp::Equal { old: span, .. } => rebuilt.extend_from_slice(&old[span.clone()]),
            EditOp::Insert { new: span } => rebuilt.extend_from_slice(&new[span.clone()]),
            EditOp::Delete { .. } => {}
        }
    }
    Ok(rebuilt)
}

/// Rebuild `old` from `new` and the script: equal and inserted spans are
/// read from `new`, deleted spans from `old`.
pub fn revert_ops<'a>(
    old: &[Token<'a>],
    new: &[Token<'a>],
    ops: &[EditOp],
) -> Result<Vec<Token<'a>>, DiffError> {
    check_coverage(ops, old.len(), new.len())?;

    let mut rebuilt = Vec::with_capacity(old.len());
    for op in ops {
        match op {
            EditOp::Equal { new: span, .. } => rebuilt.extend_from_slice(&new[span.clone()]),
            EditOp::Delete { old: span } => rebuilt.extend_from_slice(&old[span.clone()]),
            EditOp::Insert { .. } => {}
        }
    }
    Ok(rebuilt)
}

/// Apply `result` to the text it was computed from, producing the new text
pub fn apply_hunks(original: &str, result: &DiffResult) -> Result<String, DiffError> {
    patch_text(original, result, Direction::Forward)
}

/// Apply `result` backwards to the new text, producing the old text
pub fn revert_hunks(revised: &str, result: &DiffResult) -> Result<String, DiffError> {
    patch_text(revised, result, Direction::Backward)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// What one op does to the text being patched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Input token stays
    Keep,
    /// Input token is dropped
    Drop,
    /// Hunk text is written
    Write,
}

fn step(op: &EditOp, direction: Direction) -> Step {
    match (op, direction) {
        (EditOp::Equal { .. }, _) => Step::Keep,
        (EditOp::Delete { .. }, Direction::Forward) | (EditOp::Insert { .. }, Direction::Backward) => {
            Step::Drop
        }
        (EditOp::Insert { .. }, Direction::Forward) | (EditOp::Delete { .. }, Direction::Backward) => {
            Step::Write
        }
    }
}

fn patch_text<'i>(
    input: &'i str,
    result: &'i DiffResult,
    direction: Direction,
) -> Result<String, DiffError> {
    let tokens = tokenize(input, result.granularity());
    let comparison = result.comparison();
    let rewrites: HashMap<usize, &'i str> = result
        .rewrites()
        .iter()
        .map(|rewrite| match direction {
            Direction::Forward => (rewrite.old_index, rewrite.new_text.as_str()),
            Direction::Backward => (rewrite.new_index, rewrite.old_text.as_str()),
        })
        .collect();
    let kept = |token: &Token<'i>| -> &'i str {
        rewrites.get(&token.index()).copied().unwrap_or(token.text())
    };
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;

    for hunk in result.hunks() {
        let range = match direction {
            Direction::Forward => &hunk.old_range,
            Direction::Backward => &hunk.new_range,
        };
        if range.start < cursor || range.end() > tokens.len() {
            debug!("hunk {} rejected at token {}", hunk.header(), cursor);
            return Err(DiffError::Reconstruction {
                op: hunk.ops.first().cloned(),
                reason: format!(
                    "hunk {} does not fit an input of {} tokens after token {}",
                    hunk.header(),
                    tokens.len(),
                    cursor
                ),
            });
        }
        output.extend(tokens[cursor..range.start].iter().map(kept));
        cursor = range.start;

        let mut lines = hunk.lines.iter();
        for op in &hunk.ops {
            let step = step(op, direction);
            let count = match op {
                EditOp::Insert { .. } => op.new_len(),
                _ => op.old_len(),
            };

            for _ in 0..count {
                let line = lines.next().ok_or_else(|| {
                    DiffError::reconstruction(op, format!("hunk {} is missing lines", hunk.header()))
                })?;

                if step == Step::Write {
                    output.push_str(&line.text);
                    continue;
                }

                let token = tokens.get(cursor).ok_or_else(|| {
                    DiffError::reconstruction(op, format!("input ends at token {cursor}"))
                })?;
                if !comparison.same(token.text(), &line.text) {
                    return Err(DiffError::reconstruction(
                        op,
                        format!(
                            "token {cursor} reads {:?} but the hunk expects {:?}",
                            token.text(),
                            line.text
                        ),
                    ));
                }
                if step == Step::Keep {
                    output.push_str(kept(token));
                }
                cursor += 1;
            }
        }
    }

    output.extend(tokens[cursor..].iter().map(kept));
    Ok(output)
}
