use std::borrow::Cow;
use std::fmt;

use crate::diff_result::DiffResult;
use crate::token::DiffGranularity;

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// Displays a [`DiffResult`] in unified diff format.
///
/// Each hunk starts with its `@@` header followed by one line per token,
/// prefixed with `-`, `+` or a space. Line tokens are written unchanged; a
/// line without a terminator is flagged the way `diff -u` does. Word and
/// character tokens are written with `\`, `\n` and `\r` escaped so every
/// token stays on one output line.
pub struct UnifiedDiff<'r> {
    result: &'r DiffResult,
}

impl<'r> UnifiedDiff<'r> {
    pub fn new(result: &'r DiffResult) -> Self {
        Self { result }
    }
}

impl fmt::Display for UnifiedDiff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line_mode = self.result.granularity() == DiffGranularity::Line;

        for hunk in self.result.hunks() {
            writeln!(f, "{}", hunk.header())?;
            for line in &hunk.lines {
                let prefix = line.line_type.prefix();
                if !line_mode {
                    writeln!(f, "{prefix}{}", escape_terminators(&line.text))?;
                } else if line.text.ends_with('\n') {
                    write!(f, "{prefix}{}", line.text)?;
                } else {
                    writeln!(f, "{prefix}{}", line.text)?;
                    writeln!(f, "{NO_NEWLINE_MARKER}")?;
                }
            }
        }

        Ok(())
    }
}

fn escape_terminators(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Render `result` as unified diff text; an empty diff renders as ""
pub fn render_unified(result: &DiffResult) -> String {
    UnifiedDiff::new(result).to_string()
}
