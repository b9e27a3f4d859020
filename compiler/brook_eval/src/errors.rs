//! Render errors and outcomes.

use std::io;

use thiserror::Error;

/// Why a render stopped early with an error.
///
/// Template logic is total, so the only source of failure is the sink the
/// output is written to.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write template output: {0}")]
    Output(#[from] io::Error),
}

/// How a render that did not fail ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every statement ran.
    Completed,
    /// The context's cancellation token fired. Output written before the
    /// cancellation point stays in the sink.
    Cancelled,
}

impl RenderOutcome {
    pub fn is_completed(self) -> bool {
        matches!(self, RenderOutcome::Completed)
    }
}
