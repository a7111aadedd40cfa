//! Example: verify a handshake trace end to end.
//!
//! Writes a small ITF trace to disk, replays it against the model, then
//! shows what a diverging trace reports.
//!
//! Run with: cargo run --example verify_trace

use tcp_conform::{trace_from_str, verify_path, verify_trace};

const HAPPY_TRACE: &str = r##"{
    "#meta": {"format": "ITF", "source": "tcp.qnt"},
    "vars": ["client_state", "server_state", "mbt::actionTaken"],
    "states": [
        {"#meta": {"index": 0}, "mbt::actionTaken": "init",
         "client_state": {"tag": "Init", "value": {"#tup": []}},
         "server_state": {"tag": "Init", "value": {"#tup": []}}},
        {"#meta": {"index": 1}, "mbt::actionTaken": "SendSyn",
         "client_state": {"tag": "SynSent", "value": {"#tup": []}},
         "server_state": {"tag": "Init", "value": {"#tup": []}}},
        {"#meta": {"index": 2}, "mbt::actionTaken": "ReceiveSyn",
         "client_state": {"tag": "SynSent", "value": {"#tup": []}},
         "server_state": {"tag": "SynRcvd", "value": {"#tup": []}}},
        {"#meta": {"index": 3}, "mbt::actionTaken": "ReceiveSynAck",
         "client_state": {"tag": "Established", "value": {"#tup": []}},
         "server_state": {"tag": "SynRcvd", "value": {"#tup": []}}},
        {"#meta": {"index": 4}, "mbt::actionTaken": "ReceiveAck",
         "client_state": {"tag": "Established", "value": {"#tup": []}},
         "server_state": {"tag": "Established", "value": {"#tup": []}}}
    ]
}"##;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The usual workflow: quint wrote a trace file, we replay it.
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("trace.itf.json");
    std::fs::write(&path, HAPPY_TRACE)?;

    verify_path(&path)?;
    println!("Trace {} verified successfully", path.display());

    // A trace that claims the server never answered diverges at step 3.
    let bad = HAPPY_TRACE.replacen(
        r##"{"#meta": {"index": 3}, "mbt::actionTaken": "ReceiveSynAck",
         "client_state": {"tag": "Established", "value": {"#tup": []}},
         "server_state": {"tag": "SynRcvd", "value": {"#tup": []}}}"##,
        r##"{"#meta": {"index": 3}, "mbt::actionTaken": "ReceiveSynAck",
         "client_state": {"tag": "Established", "value": {"#tup": []}},
         "server_state": {"tag": "Init", "value": {"#tup": []}}}"##,
        1,
    );

    let trace = trace_from_str(&bad)?;
    match verify_trace(&trace) {
        Ok(()) => println!("unexpected: bad trace verified"),
        Err(e) => println!("Diverging trace reported:\n{e}"),
    }

    Ok(())
}
