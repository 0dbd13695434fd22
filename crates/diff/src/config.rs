use log::debug;
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;
use crate::diff_result::DiffResult;
use crate::error::{DiffError, Side};
use crate::myers::align_keys;
use crate::token::{tokenize, Comparison, DiffGranularity, TokenInterner};

/// Options for comparing two texts.
///
/// ```
/// use text_diff::{DiffConfig, DiffGranularity};
///
/// let result = DiffConfig::default()
///     .granularity(DiffGranularity::Word)
///     .context_lines(1)
///     .diff("The cat sat", "The dog sat");
/// assert_eq!(result.added(), 1);
/// assert_eq!(result.removed(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffConfig {
    granularity: DiffGranularity,
    context_lines: usize,
    ignore_whitespace: bool,
    ignore_line_endings: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            granularity: DiffGranularity::Line,
            context_lines: 3,
            ignore_whitespace: false,
            ignore_line_endings: false,
        }
    }
}

impl DiffConfig {
    /// Set the unit texts are compared in
    pub fn granularity(mut self, granularity: DiffGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set how many unchanged tokens surround each change in a hunk
    pub fn context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    /// Treat tokens that only differ in whitespace as equal.
    ///
    /// This affects comparison only; hunks and rendered output keep the
    /// original text.
    pub fn ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }

    /// Treat `\r\n` and `\n` line endings as equal when comparing
    pub fn ignore_line_endings(mut self, ignore: bool) -> Self {
        self.ignore_line_endings = ignore;
        self
    }

    fn comparison(&self) -> Comparison {
        Comparison {
            ignore_whitespace: self.ignore_whitespace,
            ignore_line_endings: self.ignore_line_endings,
        }
    }

    /// Compare two texts
    pub fn diff(&self, old: &str, new: &str) -> DiffResult {
        match self.run(old, new, None) {
            Ok(result) => result,
            Err(err) => unreachable!("diff without a cancellation token failed: {err}"),
        }
    }

    /// Compare two texts, giving up with [`DiffError::Cancelled`] once
    /// `cancel` is triggered
    pub fn diff_cancellable(
        &self,
        old: &str,
        new: &str,
        cancel: &CancellationToken,
    ) -> Result<DiffResult, DiffError> {
        self.run(old, new, Some(cancel))
    }

    /// Compare two byte buffers holding UTF-8 text
    pub fn diff_bytes(&self, old: &[u8], new: &[u8]) -> Result<DiffResult, DiffError> {
        let old = decode(Side::Old, old)?;
        let new = decode(Side::New, new)?;
        Ok(self.diff(old, new))
    }

    /// Compare many independent pairs in parallel, keeping input order
    pub fn diff_batch(&self, pairs: &[(&str, &str)]) -> Vec<DiffResult> {
        debug!("diffing {} pairs in parallel", pairs.len());
        pairs
            .par_iter()
            .map(|(old, new)| self.diff(old, new))
            .collect()
    }

    /// Compare two texts and render the result as a unified diff
    pub fn unified_diff(&self, old: &str, new: &str) -> String {
        self.diff(old, new).to_unified()
    }

    fn run(
        &self,
        old: &str,
        new: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<DiffResult, DiffError> {
        let old_tokens = tokenize(old, self.granularity);
        let new_tokens = tokenize(new, self.granularity);

        let comparison = self.comparison();
        let mut interner = TokenInterner::new(comparison);
        let old_keys = interner.intern(&old_tokens);
        let new_keys = interner.intern(&new_tokens);
        debug!(
            "comparing {} old and {} new {} tokens ({} distinct)",
            old_tokens.len(),
            new_tokens.len(),
            self.granularity,
            interner.distinct()
        );

        let ops = align_keys(&old_keys, &new_keys, cancel)?;

        Ok(DiffResult::new(
            self.granularity,
            self.context_lines,
            comparison,
            &old_tokens,
            &new_tokens,
            ops,
        ))
    }
}

fn decode(side: Side, bytes: &[u8]) -> Result<&str, DiffError> {
    std::str::from_utf8(bytes).map_err(|err| DiffError::InvalidInput {
        side,
        reason: format!("not valid UTF-8 after byte {}", err.valid_up_to()),
    })
}
