//! tcp-conform: a typed model of the TCP three-way handshake, checked
//! against Quint-generated ITF traces.
//!
//! Two independent layers enforce the same invariant:
//!
//! 1. **Representation**: [`HandshakeState`] is a closed five-variant enum,
//!    each variant fixing both endpoint tags. Of the sixteen (client, server)
//!    pairings two independent fields could express, the eleven invalid ones
//!    are not constructible at all.
//! 2. **Reachability**: [`HandshakeMachine`] only advances along the single
//!    legal path `Init -> SynSent -> SynRcvd -> ClientEstablished ->
//!    FullyEstablished`; an action applied outside its precondition is a
//!    rejected no-op, never a crash.
//!
//! Conformance with the formal model is established by replaying a trace
//! produced by `quint` (ITF JSON with MBT annotations) against the machine
//! and comparing both endpoint tags after every step.
//!
//! # Quick start
//!
//! ```
//! use tcp_conform::{trace_from_str, verify_trace};
//!
//! let json = r##"{
//!     "#meta": {"format": "ITF"},
//!     "vars": ["client_state", "server_state", "mbt::actionTaken"],
//!     "states": [
//!         {"#meta": {"index": 0}, "mbt::actionTaken": "init",
//!          "client_state": {"tag": "Init", "value": {"#tup": []}},
//!          "server_state": {"tag": "Init", "value": {"#tup": []}}},
//!         {"#meta": {"index": 1}, "mbt::actionTaken": "SendSyn",
//!          "client_state": {"tag": "SynSent", "value": {"#tup": []}},
//!          "server_state": {"tag": "Init", "value": {"#tup": []}}}
//!     ]
//! }"##;
//!
//! let trace = trace_from_str(json)?;
//! verify_trace(&trace)?;
//! # Ok::<(), tcp_conform::Error>(())
//! ```

pub mod error;
pub mod machine;
pub mod state;
pub mod trace;
pub mod verify;

// Re-export core types for convenience
pub use error::{Error, Result};
pub use machine::{Action, HandshakeMachine};
pub use state::{HandshakeState, PeerState, Side};
pub use trace::{load_trace, trace_from_str, Expected, Trace, TraceStep};
pub use verify::{verify_path, verify_trace};
