//! The boundary to the external interpreter.
//!
//! The interpreter is a separate service: it takes a textual script
//! program and replies with either a full trace or a rejection. This
//! module owns the wire shapes and the decoding rules; transport itself is
//! behind [`SimulatorClient`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::stepper::{Snapshot, Trace};
use crate::templates::ScriptPair;

/// A simulation submission: the whole program as whitespace-delimited
/// tokens, unlocking script first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub script: String,
}

impl SimulationRequest {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
        }
    }

    pub fn from_pair(pair: &ScriptPair) -> Self {
        Self::new(pair.program_text())
    }
}

/// The two ways a simulation attempt dies.
///
/// Both are terminal for the attempt and neither touches replay state.
/// They are distinct from a snapshot's `failed` flag, which is part of a
/// successfully delivered trace.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// The interpreter understood the request and rejected the script.
    #[error("malformed script: {0}")]
    MalformedScript(String),

    /// The interpreter could not be reached or said something unintelligible.
    #[error("simulation service failure: {0}")]
    ServiceFailure(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct SimulationResponse {
    steps: Vec<Snapshot>,
    valid: bool,
}

// FastAPI-style rejection body.
#[derive(Debug, Deserialize)]
struct RejectionResponse {
    detail: String,
}

/// Decodes an interpreter response body.
///
/// A body that parses as a trace is a trace; a parseable rejection body is
/// a malformed-script error; anything else is a service failure. The
/// verdict is derived locally from the snapshots; the wire `valid` field
/// is only cross-checked.
pub fn decode_response(body: &str) -> Result<Trace, SimulationError> {
    if let Ok(response) = serde_json::from_str::<SimulationResponse>(body) {
        let reported = response.valid;
        let trace = Trace::new(response.steps)
            .map_err(|err| SimulationError::MalformedScript(err.to_string()))?;
        if trace.valid() != reported {
            warn!(
                reported,
                derived = trace.valid(),
                "interpreter verdict disagrees with derived verdict"
            );
        }
        return Ok(trace);
    }

    match serde_json::from_str::<RejectionResponse>(body) {
        Ok(rejection) => Err(SimulationError::MalformedScript(rejection.detail)),
        Err(err) => Err(SimulationError::ServiceFailure(err.to_string())),
    }
}

/// Transport abstraction over the interpreter service.
///
/// Implementations perform the exchange however they like (HTTP, a local
/// process, a canned fixture) and report transport problems as
/// [`SimulationError::ServiceFailure`].
pub trait SimulatorClient {
    fn simulate(&self, request: &SimulationRequest) -> Result<Trace, SimulationError>;
}
