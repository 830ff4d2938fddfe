use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use btcscript_asm::{
    decode_response, Assembler, Literal, RenderOptions, ScriptRole, SimulationSession, Template,
};

// The interpreter's response for `1 1 OP_ADD`, kept here so the demo runs
// without the simulation service.
const ADD_RESPONSE: &str = r#"{
    "steps": [
        {"script": ["1", "1", "OP_ADD"], "stack": [], "message": "Initial setup", "failed": false},
        {"script": ["1", "OP_ADD"], "stack": ["1"], "message": "Pushed <1> to stack", "failed": false},
        {"script": ["OP_ADD"], "stack": ["1", "1"], "message": "Pushed <1> to stack", "failed": false},
        {"script": [], "stack": ["2"], "message": "Performed ADD on <1> and <1>; Pushed <2> to stack", "failed": false}
    ],
    "valid": true
}"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut assembler = Assembler::new();
    assembler.apply(&Template::PayToPubkeyHash {
        pubkey_hash: Literal::placeholder("PUBKEYHASH"),
        signature: Literal::placeholder("SIGNATURE"),
        pubkey: Literal::placeholder("PUBKEY"),
    })?;

    let options = RenderOptions::default();
    println!("pay-to-pubkey-hash");
    println!(
        "  locking:   {}",
        assembler.render(ScriptRole::Locking, &options).join(" ")
    );
    println!(
        "  unlocking: {}",
        assembler.render(ScriptRole::Unlocking, &options).join(" ")
    );
    println!("  program:   {}", assembler.program_text());
    println!();

    let mut session = SimulationSession::new();
    session.deliver(decode_response(ADD_RESPONSE))?;
    let stepper = session
        .stepper_mut()
        .context("delivery succeeded, so the session holds a trace")?;

    println!("replaying 1 1 OP_ADD");
    loop {
        let snapshot = stepper.current();
        println!("step {}: {}", stepper.position(), snapshot.annotation());
        println!("  script: {:?}", snapshot.script);
        println!("  stack:  {:?}", snapshot.stack);

        if stepper.position() + 1 == stepper.trace().len() {
            break;
        }
        stepper.next();
    }

    let verdict = if stepper.trace().valid() {
        "valid"
    } else {
        "invalid"
    };
    println!("verdict: {verdict} script");

    Ok(())
}
