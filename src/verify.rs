//! Trace replay and conformance checking.
//!
//! Replays a loaded trace against a fresh [`HandshakeMachine`], comparing
//! both endpoint tags after every step. The replay is strict, in-order, and
//! fail-fast: no retries, no skipping, no partial acceptance.

use crate::error::{Error, Result};
use crate::machine::{Action, HandshakeMachine};
use crate::state::{PeerState, Side};
use crate::trace::{Expected, Trace};
use similar::{ChangeTag, TextDiff};
use std::path::Path;
use tracing::{debug, info};

/// Replay a trace against the handshake model.
///
/// For each step: decode the action name, apply it to the machine, then
/// compare the machine's (client, server) tags against the step's
/// expectation. The first divergence of any kind aborts the run.
pub fn verify_trace(trace: &Trace) -> Result<()> {
    let mut machine = HandshakeMachine::new();
    debug!("initial state verified");

    for step in &trace.steps {
        let action = Action::from_name(&step.action).ok_or_else(|| Error::UnknownAction {
            step: step.index,
            action: step.action.clone(),
        })?;
        debug!(step = step.index, %action, "applying action");

        if !action.apply(&mut machine) {
            return Err(Error::TransitionRejected {
                step: step.index,
                action,
            });
        }

        let (client, server) = machine.current_state();
        if client != step.expected.client {
            return Err(divergence(
                step.index,
                Side::Client,
                step.expected,
                (client, server),
            ));
        }
        if server != step.expected.server {
            return Err(divergence(
                step.index,
                Side::Server,
                step.expected,
                (client, server),
            ));
        }
    }

    info!(steps = trace.steps.len(), "trace verified");
    Ok(())
}

/// Load a trace file and verify it in one call.
pub fn verify_path(path: impl AsRef<Path>) -> Result<()> {
    let trace = crate::trace::load_trace(path)?;
    verify_trace(&trace)
}

fn divergence(
    step: usize,
    side: Side,
    expected: Expected,
    observed: (PeerState, PeerState),
) -> Error {
    let (expected_tag, observed_tag) = match side {
        Side::Client => (expected.client, observed.0),
        Side::Server => (expected.server, observed.1),
    };
    let diff = unified_diff(
        &format!("(client: {}, server: {})", expected.client, expected.server),
        &format!("(client: {}, server: {})", observed.0, observed.1),
    );
    Error::StateDivergence {
        step,
        side,
        expected: expected_tag,
        observed: observed_tag,
        diff,
    }
}

/// Produce a unified diff between the expected and observed renderings.
fn unified_diff(left: &str, right: &str) -> String {
    let diff = TextDiff::from_lines(left, right);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        output.push_str(sign);
        output.push_str(change.value());
        if !change.value().ends_with('\n') {
            output.push('\n');
        }
    }

    output
}
