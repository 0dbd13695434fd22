use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;

use derive_more::Display;
use ropey::Rope;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unit two texts are compared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffGranularity {
    /// One token per line, line terminator included
    #[default]
    #[display(fmt = "line")]
    Line,

    /// One token per run of whitespace or non-whitespace characters
    #[display(fmt = "word")]
    Word,

    /// One token per character
    #[display(fmt = "character")]
    Character,
}

/// An indivisible comparison unit borrowed from its source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Token<'a> {
    text: &'a str,
    index: usize,
    offset: usize,
    line: usize,
}

impl<'a> Token<'a> {
    /// The exact source text of this token
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Position of this token in its sequence (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Byte offset of this token in its source text
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Source line (0-based) the token starts on
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte range of this token in its source text
    pub fn byte_range(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    /// Whether the token carries its own line terminator
    pub fn ends_with_newline(&self) -> bool {
        self.text.ends_with('\n')
    }
}

/// Split `text` into tokens of the given granularity.
///
/// Concatenating the text of every returned token yields `text` byte for
/// byte. Empty input yields no tokens.
pub fn tokenize(text: &str, granularity: DiffGranularity) -> Vec<Token<'_>> {
    if text.is_empty() {
        return Vec::new();
    }

    match granularity {
        DiffGranularity::Line => tokenize_lines(text),
        DiffGranularity::Word => with_source_lines(text, split_words(text)),
        DiffGranularity::Character => with_source_lines(
            text,
            text.char_indices()
                .map(|(offset, ch)| offset..offset + ch.len_utf8())
                .collect(),
        ),
    }
}

fn tokenize_lines(text: &str) -> Vec<Token<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .enumerate()
        .map(|(index, line)| {
            let token = Token {
                text: line,
                index,
                offset,
                line: index,
            };
            offset += line.len();
            token
        })
        .collect()
}

/// Byte ranges of alternating whitespace and non-whitespace runs
fn split_words(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (offset, ch) in text.char_indices() {
        let is_whitespace = ch.is_whitespace();
        match in_whitespace {
            Some(previous) if previous != is_whitespace => {
                ranges.push(start..offset);
                start = offset;
            }
            _ => {}
        }
        in_whitespace = Some(is_whitespace);
    }
    ranges.push(start..text.len());

    ranges
}

/// Attach source line numbers to sub-line tokens
fn with_source_lines(text: &str, ranges: Vec<Range<usize>>) -> Vec<Token<'_>> {
    let rope = Rope::from_str(text);
    ranges
        .into_iter()
        .enumerate()
        .map(|(index, range)| Token {
            text: &text[range.clone()],
            index,
            offset: range.start,
            line: rope.byte_to_line(range.start),
        })
        .collect()
}

/// Which differences are invisible to token comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) struct Comparison {
    pub ignore_whitespace: bool,
    pub ignore_line_endings: bool,
}

impl Comparison {
    /// The text a token is compared by
    pub fn key<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.ignore_whitespace {
            return Cow::Owned(text.split_whitespace().collect::<Vec<_>>().join(" "));
        }
        if self.ignore_line_endings {
            if let Some(stripped) = text.strip_suffix("\r\n") {
                return Cow::Owned(format!("{stripped}\n"));
            }
        }
        Cow::Borrowed(text)
    }

    pub fn same(&self, left: &str, right: &str) -> bool {
        self.key(left) == self.key(right)
    }
}

/// Maps comparison keys to small integers for the lifetime of one diff
pub(crate) struct TokenInterner<'a> {
    comparison: Comparison,
    ids: HashMap<Cow<'a, str>, u32>,
}

impl<'a> TokenInterner<'a> {
    pub fn new(comparison: Comparison) -> Self {
        Self {
            comparison,
            ids: HashMap::new(),
        }
    }

    /// Intern every token, returning one id per token.
    ///
    /// Tokens interned through the same interner get equal ids exactly when
    /// their comparison keys are equal.
    pub fn intern(&mut self, tokens: &[Token<'a>]) -> Vec<u32> {
        tokens
            .iter()
            .map(|token| {
                let key = self.comparison.key(token.text);
                let next = self.ids.len() as u32;
                *self.ids.entry(key).or_insert(next)
            })
            .collect()
    }

    /// Number of distinct keys seen so far
    pub fn distinct(&self) -> usize {
        self.ids.len()
    }
}
