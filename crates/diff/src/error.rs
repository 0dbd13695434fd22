use derive_more::Display;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::edit_op::EditOp;

/// Which of the two compared inputs an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    #[display(fmt = "old")]
    Old,

    #[display(fmt = "new")]
    New,
}

/// Errors produced while diffing or applying a diff
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DiffError {
    /// An input could not be read as text
    #[error("invalid {side} input: {reason}")]
    InvalidInput { side: Side, reason: String },

    /// An edit script or hunk does not fit the text it was applied to.
    ///
    /// Edit scripts produced by this crate never trigger this on the inputs
    /// they were computed from, so seeing it for those indicates a bug.
    #[error("edit script does not reconstruct its input: {reason}")]
    Reconstruction { op: Option<EditOp>, reason: String },

    /// The caller asked the computation to stop
    #[error("diff cancelled")]
    Cancelled,
}

impl DiffError {
    pub(crate) fn reconstruction(op: &EditOp, reason: impl Into<String>) -> Self {
        Self::Reconstruction {
            op: Some(op.clone()),
            reason: format!("{op}: {}", reason.into()),
        }
    }

    /// True when the error only reports a cancellation request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
