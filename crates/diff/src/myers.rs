//! Token alignment.
//!
//! This is Myers' linear-space O(ND) algorithm: each region is split at a
//! "middle snake" found by searching the edit graph from both ends, and the
//! two halves are solved independently. The halves are kept on an explicit
//! work stack instead of the call stack, so deep splits on large inputs
//! cost heap memory rather than stack frames.
//!
//! The middle snake search and its `V` table follow the Myers implementation
//! of the `similar` crate (`algorithms/myers.rs`, Apache-2.0, Armin Ronacher).
//!
//! Every region first has its common prefix and suffix matched greedily.
//! Once all matches are known they are sorted, and pure insertions and
//! deletions are slid as far down as equal tokens allow. The emitted script
//! then lists each change run as its deletions followed by its insertions.
//! Together these rules make equal runs as long and as early as possible
//! and keep the output identical for identical input.

use std::ops::{Index, IndexMut, Range};

use log::{debug, trace};

use crate::cancel::{checkpoint, CancellationToken};
use crate::edit_op::{coalesce, EditOp};
use crate::error::DiffError;
use crate::token::{Comparison, Token, TokenInterner};

/// Compute a minimal edit script turning `old` into `new`.
///
/// Tokens are compared by their exact text. An empty `old` yields a single
/// insert, an empty `new` a single delete, and equal sequences a single
/// equal op (or nothing when both are empty).
pub fn align<'a>(old: &[Token<'a>], new: &[Token<'a>]) -> Vec<EditOp> {
    let mut interner = TokenInterner::new(Comparison::default());
    let old_keys = interner.intern(old);
    let new_keys = interner.intern(new);

    match align_keys(&old_keys, &new_keys, None) {
        Ok(ops) => ops,
        Err(err) => unreachable!("alignment without a cancellation token failed: {err}"),
    }
}

/// Align two sequences of interned token keys
pub(crate) fn align_keys(
    old: &[u32],
    new: &[u32],
    cancel: Option<&CancellationToken>,
) -> Result<Vec<EditOp>, DiffError> {
    let snakes = find_snakes(old, new, cancel)?;
    let snakes = slide_forward(old, new, snakes);
    let ops = ops_from_snakes(&snakes, old.len(), new.len());

    debug!(
        "aligned {} old and {} new tokens into {} ops (edit distance {})",
        old.len(),
        new.len(),
        ops.len(),
        ops.iter()
            .filter(|op| op.is_change())
            .map(|op| op.old_len() + op.new_len())
            .sum::<usize>()
    );

    Ok(ops)
}

/// A diagonal run of matching tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snake {
    old: usize,
    new: usize,
    len: usize,
}

impl Snake {
    fn old_end(&self) -> usize {
        self.old + self.len
    }

    fn new_end(&self) -> usize {
        self.new + self.len
    }
}

/// Furthest-reaching x per diagonal, indexed by signed diagonal `k`
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d],
        }
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.v[(k + self.offset) as usize]
    }
}

fn max_d(old_len: usize, new_len: usize) -> usize {
    (old_len + new_len + 1) / 2 + 1
}

fn common_prefix_len(
    old: &[u32],
    old_range: Range<usize>,
    new: &[u32],
    new_range: Range<usize>,
) -> usize {
    old[old_range]
        .iter()
        .zip(&new[new_range])
        .take_while(|(a, b)| a == b)
        .count()
}

fn common_suffix_len(
    old: &[u32],
    old_range: Range<usize>,
    new: &[u32],
    new_range: Range<usize>,
) -> usize {
    old[old_range]
        .iter()
        .rev()
        .zip(new[new_range].iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Collect every matched run of an optimal alignment, ordered by position
fn find_snakes(
    old: &[u32],
    new: &[u32],
    cancel: Option<&CancellationToken>,
) -> Result<Vec<Snake>, DiffError> {
    let max_d = max_d(old.len(), new.len());
    let mut vf = V::new(max_d);
    let mut vb = V::new(max_d);

    let mut snakes = Vec::new();
    let mut work = vec![(0..old.len(), 0..new.len())];

    while let Some((mut old_range, mut new_range)) = work.pop() {
        checkpoint(cancel)?;

        let prefix = common_prefix_len(old, old_range.clone(), new, new_range.clone());
        if prefix > 0 {
            snakes.push(Snake {
                old: old_range.start,
                new: new_range.start,
                len: prefix,
            });
            old_range.start += prefix;
            new_range.start += prefix;
        }

        let suffix = common_suffix_len(old, old_range.clone(), new, new_range.clone());
        if suffix > 0 {
            old_range.end -= suffix;
            new_range.end -= suffix;
            snakes.push(Snake {
                old: old_range.end,
                new: new_range.end,
                len: suffix,
            });
        }

        // Pure insertions and deletions need no matching
        if old_range.is_empty() || new_range.is_empty() {
            continue;
        }

        let split = find_middle_snake(
            old,
            old_range.clone(),
            new,
            new_range.clone(),
            &mut vf,
            &mut vb,
            cancel,
        )?;

        if let Some((x, y)) = split {
            trace!(
                "split old {:?} / new {:?} at ({}, {})",
                old_range,
                new_range,
                x,
                y
            );
            work.push((x..old_range.end, y..new_range.end));
            work.push((old_range.start..x, new_range.start..y));
        }
    }

    snakes.sort_unstable_by_key(|snake| snake.old);
    Ok(snakes)
}

/// Find the point where a forward and a backward furthest-reaching path of
/// an optimal script overlap.
///
/// Returns absolute coordinates of a point on an optimal path strictly
/// inside the region, so both halves are smaller problems.
fn find_middle_snake(
    old: &[u32],
    old_range: Range<usize>,
    new: &[u32],
    new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
    cancel: Option<&CancellationToken>,
) -> Result<Option<(usize, usize)>, DiffError> {
    let n = old_range.len();
    let m = new_range.len();

    // The parity of the script length matches the parity of delta
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;

    vf[1] = 0;
    vb[1] = 0;

    let d_max = max_d(n, m);

    for d in 0..d_max as isize {
        checkpoint(cancel)?;

        // Forward
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let y = (x as isize - k) as usize;

            let (x0, y0) = (x, y);
            if x < n && y < m {
                x += common_prefix_len(
                    old,
                    old_range.start + x..old_range.end,
                    new,
                    new_range.start + y..new_range.end,
                );
            }

            vf[k] = x;

            if odd && (k - delta).abs() <= d - 1 && vf[k] + vb[-(k - delta)] >= n {
                return Ok(Some((x0 + old_range.start, y0 + new_range.start)));
            }
        }

        // Backward, with x and y counted from the end of the region
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;

            if x < n && y < m {
                let advance = common_suffix_len(
                    old,
                    old_range.start..old_range.start + n - x,
                    new,
                    new_range.start..new_range.start + m - y,
                );
                x += advance;
                y += advance;
            }

            vb[k] = x;

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                return Ok(Some((n - x + old_range.start, m - y + new_range.start)));
            }
        }
    }

    Ok(None)
}

/// Move pure insertions and deletions down while the token after the change
/// equals its first token.
///
/// Each step trades one match for another of the same pair of tokens, so the
/// number of matches (and therefore the edit distance) never changes.
fn slide_forward(old: &[u32], new: &[u32], found: Vec<Snake>) -> Vec<Snake> {
    // The empty origin snake lets a leading change slide like any other
    let mut snakes = Vec::with_capacity(found.len() + 1);
    snakes.push(Snake {
        old: 0,
        new: 0,
        len: 0,
    });

    for snake in found {
        match snakes.last_mut() {
            Some(last) if last.old_end() == snake.old && last.new_end() == snake.new => {
                last.len += snake.len;
            }
            _ => snakes.push(snake),
        }
    }

    for i in 1..snakes.len() {
        loop {
            let (prev, next) = (snakes[i - 1], snakes[i]);
            if next.len == 0 {
                break;
            }

            let gap_old = prev.old_end()..next.old;
            let gap_new = prev.new_end()..next.new;
            let slides = match (gap_old.is_empty(), gap_new.is_empty()) {
                (false, true) => old[gap_old.start] == old[next.old],
                (true, false) => new[gap_new.start] == new[next.new],
                _ => false,
            };
            if !slides {
                break;
            }

            snakes[i - 1].len += 1;
            snakes[i].old += 1;
            snakes[i].new += 1;
            snakes[i].len -= 1;
        }
    }

    snakes
}

fn ops_from_snakes(snakes: &[Snake], old_len: usize, new_len: usize) -> Vec<EditOp> {
    fn push_gap(ops: &mut Vec<EditOp>, old: Range<usize>, new: Range<usize>) {
        if !old.is_empty() {
            ops.push(EditOp::Delete { old });
        }
        if !new.is_empty() {
            ops.push(EditOp::Insert { new });
        }
    }

    let mut ops = Vec::with_capacity(snakes.len() * 3 + 2);
    let (mut old_pos, mut new_pos) = (0, 0);

    for snake in snakes.iter().filter(|snake| snake.len > 0) {
        push_gap(&mut ops, old_pos..snake.old, new_pos..snake.new);
        ops.push(EditOp::Equal {
            old: snake.old..snake.old_end(),
            new: snake.new..snake.new_end(),
        });
        old_pos = snake.old_end();
        new_pos = snake.new_end();
    }
    push_gap(&mut ops, old_pos..old_len, new_pos..new_len);

    coalesce(&ops)
}
