//! Typed errors for trace loading and verification.
//!
//! Every condition here is fatal for the verification run it occurs in:
//! nothing is retried, skipped, or downgraded to a warning, because the whole
//! point of a replay is exact behavioral agreement with the trace.

use crate::machine::Action;
use crate::state::{PeerState, Side};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for tcp-conform operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The trace file does not exist. Traces are produced by a separate
    /// offline `quint` run and cannot be regenerated here.
    #[error("Trace file not found: {0}")]
    TraceNotFound(PathBuf),

    /// The trace exists but does not decode into an ordered step sequence.
    #[error("Malformed trace: {detail}")]
    TraceMalformed {
        /// What failed to decode, naming the state index and field involved.
        detail: String,
    },

    /// A step names an action outside the known set.
    #[error("Step {step}: unknown action '{action}'")]
    UnknownAction { step: usize, action: String },

    /// The machine refused the step's action in its current state. The trace
    /// and the model disagree on which transitions are reachable.
    #[error("Step {step}: action '{action}' rejected by the model")]
    TransitionRejected { step: usize, action: Action },

    /// The machine's state after a step disagrees with the trace.
    #[error(
        "State divergence at step {step} ({side}): expected {expected}, observed {observed}\n{diff}"
    )]
    StateDivergence {
        step: usize,
        /// Endpoint whose tag diverged first.
        side: Side,
        expected: PeerState,
        observed: PeerState,
        /// Unified diff of the full expected/observed state pair.
        diff: String,
    },
}

/// Result type alias using tcp-conform's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
