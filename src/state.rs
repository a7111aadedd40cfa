//! Closed representation of handshake state.
//!
//! Two layers make up the model's state: [`PeerState`], the per-endpoint tag
//! a trace carries for `client_state`/`server_state`, and [`HandshakeState`],
//! the system state proper. The latter is a closed five-variant enum in which
//! every variant fixes both endpoint tags at once, so the eleven (client,
//! server) pairings the handshake can never reach are not representable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handshake progress of a single endpoint.
///
/// Both endpoints share one tag set; each role only ever occupies a subset
/// (`SynSent` is client-only, `SynRcvd` server-only). Variant names are the
/// literal tag strings found in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerState {
    /// Handshake not yet started.
    Init,
    /// Client has sent its SYN.
    SynSent,
    /// Server has received the SYN.
    SynRcvd,
    /// Endpoint considers the connection established.
    Established,
}

impl PeerState {
    /// Decode a trace tag string.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Init" => Some(Self::Init),
            "SynSent" => Some(Self::SynSent),
            "SynRcvd" => Some(Self::SynRcvd),
            "Established" => Some(Self::Established),
            _ => None,
        }
    }

    /// The tag string as traces spell it.
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Init => "Init",
            Self::SynSent => "SynSent",
            Self::SynRcvd => "SynRcvd",
            Self::Established => "Established",
        }
    }
}

impl fmt::Display for PeerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// One of the five reachable system states.
///
/// There is no constructor taking free-form endpoint tags; the pair for each
/// variant is fixed by [`client`](Self::client) and [`server`](Self::server).
/// A value like "server `Established` under a client still at `Init`" simply
/// has no representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    /// Neither endpoint has acted.
    Init,
    /// Client sent SYN; server has not seen it.
    SynSent,
    /// Server received the SYN and answered with SYN-ACK.
    SynRcvd,
    /// Client saw the SYN-ACK and considers itself connected.
    ClientEstablished,
    /// Both endpoints are established.
    FullyEstablished,
}

impl HandshakeState {
    /// Client-side tag fixed by this variant.
    pub const fn client(self) -> PeerState {
        match self {
            Self::Init => PeerState::Init,
            Self::SynSent | Self::SynRcvd => PeerState::SynSent,
            Self::ClientEstablished | Self::FullyEstablished => PeerState::Established,
        }
    }

    /// Server-side tag fixed by this variant.
    pub const fn server(self) -> PeerState {
        match self {
            Self::Init | Self::SynSent => PeerState::Init,
            Self::SynRcvd | Self::ClientEstablished => PeerState::SynRcvd,
            Self::FullyEstablished => PeerState::Established,
        }
    }
}

/// Which endpoint a comparison refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Client,
    Server,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Client => "client",
            Self::Server => "server",
        })
    }
}
