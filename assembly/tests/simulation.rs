use btcscript_asm::{
    decode_response, Literal, SimulationError, SimulationRequest, SimulationSession,
    SimulatorClient, Template, Trace,
};

// What the interpreter sends back for a satisfied pay-to-pubkey spend:
// every snapshot carries the remaining program, the stack, and an
// annotation, and the terminal stack is a lone truthy element.
const P2PK_VALID: &str = r#"{
    "steps": [
        {"script": ["SIGNATURE", "PUBKEY", "OP_CHECKSIG"], "stack": [], "message": "Initial setup", "failed": false},
        {"script": ["PUBKEY", "OP_CHECKSIG"], "stack": ["SIGNATURE"], "message": "Pushed <SIGNATURE> to stack", "failed": false},
        {"script": ["OP_CHECKSIG"], "stack": ["PUBKEY", "SIGNATURE"], "message": "Pushed <PUBKEY> to stack", "failed": false},
        {"script": [], "stack": ["1"], "message": "Performed CHECKSIG; Pushed <1> to stack", "failed": false}
    ],
    "valid": true
}"#;

// The same spend with a signature that does not verify: the terminal
// stack is a lone zero.
const P2PK_INVALID: &str = r#"{
    "steps": [
        {"script": ["SIGNATURE", "PUBKEY", "OP_CHECKSIG"], "stack": [], "message": "Initial setup", "failed": false},
        {"script": ["PUBKEY", "OP_CHECKSIG"], "stack": ["SIGNATURE"], "message": "Pushed <SIGNATURE> to stack", "failed": false},
        {"script": ["OP_CHECKSIG"], "stack": ["PUBKEY", "SIGNATURE"], "message": "Pushed <PUBKEY> to stack", "failed": false},
        {"script": [], "stack": ["0"], "message": "Performed CHECKSIG; Pushed <0> to stack", "failed": false}
    ],
    "valid": false
}"#;

#[test]
fn request_text_matches_what_the_trace_replays() {
    let pair = Template::PayToPubkey {
        pubkey: Literal::data("PUBKEY"),
        signature: Literal::data("SIGNATURE"),
    }
    .generate()
    .unwrap();
    let request = SimulationRequest::from_pair(&pair);
    assert_eq!(request.script, "SIGNATURE PUBKEY OP_CHECKSIG");

    let trace = decode_response(P2PK_VALID).unwrap();
    let submitted: Vec<&str> = request.script.split_whitespace().collect();
    assert_eq!(trace.steps()[0].script, submitted);
}

#[test]
fn terminal_one_means_valid_terminal_zero_means_invalid() {
    assert!(decode_response(P2PK_VALID).unwrap().valid());
    assert!(!decode_response(P2PK_INVALID).unwrap().valid());
}

#[test]
fn replay_walks_the_whole_trace() {
    let mut session = SimulationSession::new();
    session.deliver(decode_response(P2PK_VALID)).unwrap();

    let stepper = session.stepper_mut().unwrap();
    assert_eq!(stepper.position(), 0);
    assert_eq!(stepper.current().annotation(), "Initial setup");

    stepper.next();
    stepper.next();
    stepper.next();
    assert_eq!(stepper.position(), 3);
    assert_eq!(stepper.current().stack, vec!["1"]);

    // Saturates at the final snapshot.
    stepper.next();
    assert_eq!(stepper.position(), 3);

    stepper.first();
    stepper.previous();
    assert_eq!(stepper.position(), 0);

    assert!(stepper.trace().valid());
}

#[test]
fn failed_attempts_never_disturb_the_replay() {
    let mut session = SimulationSession::new();
    session.deliver(decode_response(P2PK_VALID)).unwrap();
    session.stepper_mut().unwrap().next();
    session.stepper_mut().unwrap().next();

    // A rejection from the interpreter.
    let err = session
        .deliver(decode_response(r#"{"detail": "unknown opcode OP_BOGUS"}"#))
        .unwrap_err();
    assert!(matches!(err, SimulationError::MalformedScript(_)));

    // A dead service.
    let err = session
        .deliver(decode_response("<html>502 Bad Gateway</html>"))
        .unwrap_err();
    assert!(matches!(err, SimulationError::ServiceFailure(_)));

    let stepper = session.stepper().unwrap();
    assert_eq!(stepper.position(), 2);
    assert_eq!(stepper.trace().len(), 4);
    assert!(stepper.trace().valid());
}

#[test]
fn a_new_trace_replaces_the_old_one_and_rewinds() {
    let mut session = SimulationSession::new();
    session.deliver(decode_response(P2PK_VALID)).unwrap();
    session.stepper_mut().unwrap().last();

    session.deliver(decode_response(P2PK_INVALID)).unwrap();
    let stepper = session.stepper().unwrap();
    assert_eq!(stepper.position(), 0);
    assert!(!stepper.trace().valid());
}

// A client that answers from canned bodies, standing in for the HTTP
// transport a real deployment would use.
struct CannedSimulator;

impl SimulatorClient for CannedSimulator {
    fn simulate(&self, request: &SimulationRequest) -> Result<Trace, SimulationError> {
        match request.script.as_str() {
            "SIGNATURE PUBKEY OP_CHECKSIG" => decode_response(P2PK_VALID),
            _ => Err(SimulationError::MalformedScript(format!(
                "no fixture for: {}",
                request.script
            ))),
        }
    }
}

#[test]
fn a_client_feeds_the_session() {
    let pair = Template::PayToPubkey {
        pubkey: Literal::data("PUBKEY"),
        signature: Literal::data("SIGNATURE"),
    }
    .generate()
    .unwrap();

    let client = CannedSimulator;
    let mut session = SimulationSession::new();
    session
        .deliver(client.simulate(&SimulationRequest::from_pair(&pair)))
        .unwrap();
    assert!(session.stepper().unwrap().trace().valid());

    let unknown = SimulationRequest::new("OP_RETURN");
    let err = session.deliver(client.simulate(&unknown)).unwrap_err();
    assert!(matches!(err, SimulationError::MalformedScript(_)));
    // The earlier trace is still loaded.
    assert_eq!(session.stepper().unwrap().trace().len(), 4);
}

// An in-trace failure is part of a delivered trace, not a request error:
// the delivery succeeds and the verdict comes out invalid.
#[test]
fn snapshot_failures_are_not_request_errors() {
    let body = r#"{
        "steps": [
            {"script": ["OP_VERIFY"], "stack": ["0"], "message": "Initial setup", "failed": false},
            {"script": [], "stack": [], "message": "Performed verify on 0; Verify failed", "failed": true}
        ],
        "valid": false
    }"#;
    let mut session = SimulationSession::new();
    session.deliver(decode_response(body)).unwrap();
    assert!(!session.stepper().unwrap().trace().valid());
}
