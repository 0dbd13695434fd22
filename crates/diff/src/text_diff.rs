use crate::config::DiffConfig;
use crate::diff_result::DiffResult;
use crate::error::DiffError;
use crate::token::DiffGranularity;

/// Shortcuts for the common diff operations
pub struct TextDiff;

impl TextDiff {
    /// Start building a diff with non-default options
    pub fn configure() -> DiffConfig {
        DiffConfig::default()
    }

    /// Create a line diff between two texts
    pub fn diff(old_text: &str, new_text: &str) -> DiffResult {
        DiffConfig::default().diff(old_text, new_text)
    }

    /// Create a diff between two texts at the given granularity
    pub fn diff_with_granularity(
        old_text: &str,
        new_text: &str,
        granularity: DiffGranularity,
    ) -> DiffResult {
        DiffConfig::default()
            .granularity(granularity)
            .diff(old_text, new_text)
    }

    /// Generate a unified diff string (like git diff)
    pub fn unified_diff(old_text: &str, new_text: &str, context_lines: usize) -> String {
        DiffConfig::default()
            .context_lines(context_lines)
            .unified_diff(old_text, new_text)
    }

    /// Generate a unified diff string at the given granularity
    pub fn unified_diff_with_granularity(
        old_text: &str,
        new_text: &str,
        context_lines: usize,
        granularity: DiffGranularity,
    ) -> String {
        DiffConfig::default()
            .granularity(granularity)
            .context_lines(context_lines)
            .unified_diff(old_text, new_text)
    }

    /// Rebuild the new text of `result` from its old text
    pub fn apply(original: &str, result: &DiffResult) -> Result<String, DiffError> {
        result.apply(original)
    }

    /// Rebuild the old text of `result` from its new text
    pub fn revert(revised: &str, result: &DiffResult) -> Result<String, DiffError> {
        result.revert(revised)
    }
}
