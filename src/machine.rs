//! Transition engine for the four-step handshake.
//!
//! [`HandshakeMachine`] owns the current [`HandshakeState`] and advances it
//! one action at a time along the single legal path
//! `Init -> SynSent -> SynRcvd -> ClientEstablished -> FullyEstablished`.
//! Each transition is gated on its unique source variant: invoked anywhere
//! else it leaves the state untouched and reports `false`. Together with the
//! closed representation in [`HandshakeState`], no call sequence can observe
//! an invalid (client, server) pairing.

use crate::state::{HandshakeState, PeerState};
use std::fmt;

/// The handshake model under verification.
#[derive(Debug)]
pub struct HandshakeMachine {
    state: HandshakeState,
}

impl HandshakeMachine {
    /// A fresh machine in the `Init` state.
    pub const fn new() -> Self {
        Self {
            state: HandshakeState::Init,
        }
    }

    /// Client sends its SYN: `Init` -> `SynSent`.
    pub fn send_syn(&mut self) -> bool {
        match self.state {
            HandshakeState::Init => {
                self.state = HandshakeState::SynSent;
                true
            }
            _ => false,
        }
    }

    /// Server receives the SYN: `SynSent` -> `SynRcvd`.
    pub fn receive_syn(&mut self) -> bool {
        match self.state {
            HandshakeState::SynSent => {
                self.state = HandshakeState::SynRcvd;
                true
            }
            _ => false,
        }
    }

    /// Client receives the SYN-ACK: `SynRcvd` -> `ClientEstablished`.
    pub fn receive_syn_ack(&mut self) -> bool {
        match self.state {
            HandshakeState::SynRcvd => {
                self.state = HandshakeState::ClientEstablished;
                true
            }
            _ => false,
        }
    }

    /// Server receives the final ACK: `ClientEstablished` -> `FullyEstablished`.
    pub fn receive_ack(&mut self) -> bool {
        match self.state {
            HandshakeState::ClientEstablished => {
                self.state = HandshakeState::FullyEstablished;
                true
            }
            _ => false,
        }
    }

    /// Current system state variant.
    pub const fn state(&self) -> HandshakeState {
        self.state
    }

    /// The (client, server) tag pair of the current variant.
    pub const fn current_state(&self) -> (PeerState, PeerState) {
        (self.state.client(), self.state.server())
    }
}

impl Default for HandshakeMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoded trace action.
///
/// Traces carry actions as strings; decoding them into this closed set up
/// front keeps string handling out of the replay logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Initialization marker, only meaningful on a trace's first state.
    Init,
    SendSyn,
    ReceiveSyn,
    ReceiveSynAck,
    ReceiveAck,
}

impl Action {
    /// Decode an action name as it appears in a trace.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "init" => Some(Self::Init),
            "SendSyn" => Some(Self::SendSyn),
            "ReceiveSyn" => Some(Self::ReceiveSyn),
            "ReceiveSynAck" => Some(Self::ReceiveSynAck),
            "ReceiveAck" => Some(Self::ReceiveAck),
            _ => None,
        }
    }

    /// The action name as traces spell it.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::SendSyn => "SendSyn",
            Self::ReceiveSyn => "ReceiveSyn",
            Self::ReceiveSynAck => "ReceiveSynAck",
            Self::ReceiveAck => "ReceiveAck",
        }
    }

    /// Apply this action to a machine, reporting whether it was accepted.
    ///
    /// `Init` is always accepted and never touches the machine.
    pub fn apply(self, machine: &mut HandshakeMachine) -> bool {
        match self {
            Self::Init => true,
            Self::SendSyn => machine.send_syn(),
            Self::ReceiveSyn => machine.receive_syn(),
            Self::ReceiveSynAck => machine.receive_syn_ack(),
            Self::ReceiveAck => machine.receive_ack(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
