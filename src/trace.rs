//! Loading of Quint ITF traces.
//!
//! A trace is an ITF JSON document whose `states` array records one model
//! state per step. Each state carries the `mbt::actionTaken` auxiliary
//! variable plus the `client_state`/`server_state` sum values. This module is
//! a pure format-to-structure decoder: it performs every shape check and
//! leaves protocol logic to the verifier.

use crate::error::{Error, Result};
use crate::state::PeerState;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Expected (client, server) tags after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expected {
    pub client: PeerState,
    pub server: PeerState,
}

/// One replayable step of a loaded trace.
///
/// State 0 of the ITF document (the initial configuration) is consumed
/// during loading, so every step held by a [`Trace`] carries expected tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Index of this step in the ITF `states` array (always >= 1).
    pub index: usize,
    /// Raw action name; decoded by the verifier.
    pub action: String,
    /// Tags the model must exhibit after applying the action.
    pub expected: Expected,
}

/// An ordered, replayable trace.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    /// Steps in replay order, starting at ITF state index 1.
    pub steps: Vec<TraceStep>,
}

/// Load a trace from an ITF JSON file.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::TraceNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        malformed(format!("failed to read {}: {e}", path.display()))
    })?;
    trace_from_str(&content)
}

/// Parse a trace from an ITF JSON string.
pub fn trace_from_str(json: &str) -> Result<Trace> {
    // Parse directly via serde_json to avoid itf::trace_from_str's
    // decode() step, which loses type info through deserialize_any.
    let itf_trace: itf::Trace<itf::Value> = serde_json::from_str(json)
        .map_err(|e| malformed(format!("invalid ITF JSON: {e}")))?;

    let mut steps = Vec::with_capacity(itf_trace.states.len().saturating_sub(1));
    for (index, itf_state) in itf_trace.states.iter().enumerate() {
        let state = &itf_state.value;
        if !matches!(state, itf::Value::Record(_)) {
            return Err(malformed(format!("state {index}: expected an ITF record")));
        }

        let action = field_string(state, "mbt::actionTaken", index)?;
        if index == 0 {
            // The initial configuration is fixed; its action is not replayed.
            debug!(action = action.as_deref().unwrap_or("init"), "initial state");
            continue;
        }

        let action =
            action.ok_or_else(|| malformed(format!("state {index}: missing `mbt::actionTaken`")))?;
        let expected = Expected {
            client: peer_tag(state, "client_state", index)?,
            server: peer_tag(state, "server_state", index)?,
        };

        steps.push(TraceStep {
            index,
            action,
            expected,
        });
    }

    debug!(steps = steps.len(), "trace loaded");
    Ok(Trace { steps })
}

fn malformed(detail: String) -> Error {
    Error::TraceMalformed { detail }
}

/// Look up a field of an ITF record.
fn field<'a>(state: &'a itf::Value, name: &str) -> Option<&'a itf::Value> {
    match state {
        itf::Value::Record(rec) => rec.get(name),
        _ => None,
    }
}

/// Extract an optional string field from an ITF record.
fn field_string(state: &itf::Value, name: &str, index: usize) -> Result<Option<String>> {
    field(state, name)
        .map(|v| String::deserialize(v.clone()))
        .transpose()
        .map_err(|e| malformed(format!("state {index}: bad `{name}`: {e}")))
}

/// Extract a peer-state tag from a Quint sum value (`{"tag": ..., "value": ...}`).
fn peer_tag(state: &itf::Value, name: &str, index: usize) -> Result<PeerState> {
    let sum = field(state, name)
        .ok_or_else(|| malformed(format!("state {index}: missing `{name}`")))?;
    let tag = field_string(sum, "tag", index)?
        .ok_or_else(|| malformed(format!("state {index}: `{name}` is not a tagged sum value")))?;
    PeerState::from_tag(&tag)
        .ok_or_else(|| malformed(format!("state {index}: unknown `{name}` tag '{tag}'")))
}
