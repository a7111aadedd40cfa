//! End-to-end tests for trace loading and verification.

use serde_json::{json, Value};
use tcp_conform::{
    load_trace, trace_from_str, verify_path, verify_trace, Action, Error, PeerState, Side,
};

/// Quint encodes sum values as tagged records.
fn sum(tag: &str) -> Value {
    json!({"tag": tag, "value": {"#tup": []}})
}

/// Build an ITF trace document from (action, client tag, server tag) triples.
fn itf_trace(states: &[(&str, &str, &str)]) -> String {
    let states: Vec<Value> = states
        .iter()
        .enumerate()
        .map(|(i, (action, client, server))| {
            json!({
                "#meta": {"index": i},
                "mbt::actionTaken": action,
                "client_state": sum(client),
                "server_state": sum(server),
            })
        })
        .collect();
    json!({
        "#meta": {"format": "ITF", "source": "tcp.qnt"},
        "vars": ["client_state", "server_state", "mbt::actionTaken"],
        "states": states,
    })
    .to_string()
}

/// The full handshake as quint records it.
const HAPPY: [(&str, &str, &str); 5] = [
    ("init", "Init", "Init"),
    ("SendSyn", "SynSent", "Init"),
    ("ReceiveSyn", "SynSent", "SynRcvd"),
    ("ReceiveSynAck", "Established", "SynRcvd"),
    ("ReceiveAck", "Established", "Established"),
];

#[test]
fn test_happy_path_trace_verifies() {
    let trace = trace_from_str(&itf_trace(&HAPPY)).unwrap();
    assert_eq!(trace.steps.len(), 4);
    assert_eq!(trace.steps[0].index, 1);
    assert_eq!(trace.steps[0].action, "SendSyn");

    assert!(verify_trace(&trace).is_ok());
}

#[test]
fn test_divergence_reports_step_side_and_tags() {
    let mut states = HAPPY;
    // Claim the server is still Init after it answered the SYN-ACK.
    states[3] = ("ReceiveSynAck", "Established", "Init");

    let trace = trace_from_str(&itf_trace(&states)).unwrap();
    match verify_trace(&trace) {
        Err(Error::StateDivergence {
            step,
            side,
            expected,
            observed,
            diff,
        }) => {
            assert_eq!(step, 3);
            assert_eq!(side, Side::Server);
            assert_eq!(expected, PeerState::Init);
            assert_eq!(observed, PeerState::SynRcvd);
            assert!(diff.contains("server: Init"));
            assert!(diff.contains("server: SynRcvd"));
        }
        other => panic!("expected a state divergence, got {other:?}"),
    }
}

#[test]
fn test_client_divergence_reported_before_server() {
    let mut states = HAPPY;
    states[1] = ("SendSyn", "Established", "Established");

    let trace = trace_from_str(&itf_trace(&states)).unwrap();
    match verify_trace(&trace) {
        Err(Error::StateDivergence { step, side, .. }) => {
            assert_eq!(step, 1);
            assert_eq!(side, Side::Client);
        }
        other => panic!("expected a state divergence, got {other:?}"),
    }
}

#[test]
fn test_skipping_ahead_is_rejected() {
    let states = [
        ("init", "Init", "Init"),
        ("ReceiveAck", "Established", "Established"),
    ];

    let trace = trace_from_str(&itf_trace(&states)).unwrap();
    match verify_trace(&trace) {
        Err(Error::TransitionRejected { step, action }) => {
            assert_eq!(step, 1);
            assert_eq!(action, Action::ReceiveAck);
        }
        other => panic!("expected a rejected transition, got {other:?}"),
    }
}

#[test]
fn test_unknown_action_reported_with_step_index() {
    let mut states = HAPPY;
    states[2] = ("Frobnicate", "SynSent", "SynRcvd");

    let trace = trace_from_str(&itf_trace(&states)).unwrap();
    match verify_trace(&trace) {
        Err(Error::UnknownAction { step, action }) => {
            assert_eq!(step, 2);
            assert_eq!(action, "Frobnicate");
        }
        other => panic!("expected an unknown action, got {other:?}"),
    }
}

#[test]
fn test_replay_is_deterministic() {
    let mut states = HAPPY;
    states[3] = ("ReceiveSynAck", "Established", "Init");
    let json = itf_trace(&states);

    let failing_step = |json: &str| -> usize {
        let trace = trace_from_str(json).unwrap();
        match verify_trace(&trace) {
            Err(Error::StateDivergence { step, .. }) => step,
            other => panic!("expected a state divergence, got {other:?}"),
        }
    };

    assert_eq!(failing_step(&json), failing_step(&json));
}

#[test]
fn test_missing_trace_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.itf.json");

    match verify_path(&path) {
        Err(Error::TraceNotFound(p)) => assert_eq!(p, path),
        other => panic!("expected trace-not-found, got {other:?}"),
    }
}

#[test]
fn test_verify_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.itf.json");
    std::fs::write(&path, itf_trace(&HAPPY)).unwrap();

    let trace = load_trace(&path).unwrap();
    assert_eq!(trace.steps.len(), 4);
    assert!(verify_path(&path).is_ok());
}

#[test]
fn test_invalid_json_is_malformed() {
    match trace_from_str("{ not json") {
        Err(Error::TraceMalformed { detail }) => assert!(detail.contains("invalid ITF JSON")),
        other => panic!("expected malformed trace, got {other:?}"),
    }
}

#[test]
fn test_states_must_be_a_sequence() {
    let json = r##"{"#meta": {"format": "ITF"}, "vars": [], "states": 42}"##;
    assert!(matches!(
        trace_from_str(json),
        Err(Error::TraceMalformed { .. })
    ));
}

#[test]
fn test_missing_expected_tags_is_malformed() {
    let states: Vec<Value> = vec![
        json!({"mbt::actionTaken": "init",
               "client_state": sum("Init"), "server_state": sum("Init")}),
        json!({"mbt::actionTaken": "SendSyn"}),
    ];
    let json = json!({
        "#meta": {"format": "ITF"},
        "vars": ["client_state", "server_state", "mbt::actionTaken"],
        "states": states,
    })
    .to_string();

    match trace_from_str(&json) {
        Err(Error::TraceMalformed { detail }) => {
            assert!(detail.contains("client_state"), "got: {detail}");
            assert!(detail.contains("state 1"), "got: {detail}");
        }
        other => panic!("expected malformed trace, got {other:?}"),
    }
}

#[test]
fn test_unknown_state_tag_is_malformed() {
    let mut states = HAPPY;
    states[2] = ("ReceiveSyn", "SynSent", "Frobnicate");

    match trace_from_str(&itf_trace(&states)) {
        Err(Error::TraceMalformed { detail }) => {
            assert!(detail.contains("Frobnicate"), "got: {detail}");
            assert!(detail.contains("server_state"), "got: {detail}");
        }
        other => panic!("expected malformed trace, got {other:?}"),
    }
}

#[test]
fn test_missing_action_is_malformed() {
    let states: Vec<Value> = vec![
        json!({"mbt::actionTaken": "init",
               "client_state": sum("Init"), "server_state": sum("Init")}),
        json!({"client_state": sum("SynSent"), "server_state": sum("Init")}),
    ];
    let json = json!({
        "#meta": {"format": "ITF"},
        "vars": ["client_state", "server_state", "mbt::actionTaken"],
        "states": states,
    })
    .to_string();

    match trace_from_str(&json) {
        Err(Error::TraceMalformed { detail }) => {
            assert!(detail.contains("mbt::actionTaken"), "got: {detail}");
        }
        other => panic!("expected malformed trace, got {other:?}"),
    }
}

#[test]
fn test_initial_state_action_is_not_validated() {
    let mut states = HAPPY;
    states[0] = ("whatever", "Init", "Init");

    let trace = trace_from_str(&itf_trace(&states)).unwrap();
    assert!(verify_trace(&trace).is_ok());
}

#[test]
fn test_empty_states_verifies_trivially() {
    let json = itf_trace(&[]);
    let trace = trace_from_str(&json).unwrap();
    assert!(trace.steps.is_empty());
    assert!(verify_trace(&trace).is_ok());
}
