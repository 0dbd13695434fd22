// Text diff engine
// Tokenizes two texts, aligns them with Myers' algorithm and groups the
// edit script into unified-diff style hunks.

mod cancel;
mod config;
mod diff_hunk;
mod diff_result;
mod edit_op;
mod error;
mod myers;
mod patch;
mod text_diff;
mod token;
mod unified;

pub use cancel::CancellationToken;
pub use config::DiffConfig;
pub use diff_hunk::{build_hunks, DiffHunk, DiffHunkRange, DiffHunkStatus, DiffLine, DiffLineType};
pub use diff_result::{DiffResult, DiffStats, EqualRewrite};
pub use edit_op::EditOp;
pub use error::{DiffError, Side};
pub use myers::align;
pub use patch::{apply_hunks, apply_ops, revert_hunks, revert_ops};
pub use text_diff::TextDiff;
pub use token::{tokenize, DiffGranularity, Token};
pub use unified::{render_unified, UnifiedDiff};
