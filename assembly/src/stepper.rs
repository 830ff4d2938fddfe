//! Replay of a finished simulation.
//!
//! The external interpreter runs a script once and hands back the full
//! snapshot sequence; everything here is read-only navigation over that
//! sequence. The stepper never re-executes anything, which is what makes
//! seeking in either direction free.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::simulate::SimulationError;

/// One point in a simulation: the not-yet-executed remainder of the
/// program, the machine stack, and a description of what just happened.
///
/// Both sequences hold display strings; the interpreter renders them before
/// sending. The top of the stack is the first element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub script: Vec<String>,
    pub stack: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub failed: bool,
}

impl Snapshot {
    pub fn new(
        script: Vec<String>,
        stack: Vec<String>,
        message: impl Into<String>,
        failed: bool,
    ) -> Self {
        Self {
            script,
            stack,
            message: Some(message.into()),
            failed,
        }
    }

    /// The human-readable annotation, empty if the interpreter sent none.
    pub fn annotation(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("a trace must contain at least one snapshot")]
pub struct EmptyTrace;

/// The complete, ordered snapshot sequence of one simulation, with its
/// verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<Snapshot>,
    valid: bool,
}

// A terminal stack element is falsy when it is the zero push in any of the
// spellings the interpreter produces.
fn is_truthy(value: &str) -> bool {
    !matches!(value, "" | "0" | "OP_0")
}

impl Trace {
    /// Wraps a snapshot sequence, deriving the verdict.
    ///
    /// The script passes iff no snapshot failed and the terminal stack is
    /// exactly one truthy element.
    pub fn new(steps: Vec<Snapshot>) -> Result<Self, EmptyTrace> {
        let last = steps.last().ok_or(EmptyTrace)?;
        let clean = !steps.iter().any(|step| step.failed);
        let valid = clean
            && last.stack.len() == 1
            && last.stack.first().is_some_and(|top| is_truthy(top));
        Ok(Self { steps, valid })
    }

    pub fn steps(&self) -> &[Snapshot] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Traces are never empty, but the accessor keeps call sites honest.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The verdict for the whole trace. Fixed at construction; moving the
    /// stepper never changes it.
    pub fn valid(&self) -> bool {
        self.valid
    }
}

/// A seekable cursor over one trace.
///
/// All four transitions saturate at the edges: stepping past either end is
/// a no-op, not an error.
#[derive(Debug, Clone)]
pub struct TraceStepper {
    trace: Trace,
    position: usize,
}

impl TraceStepper {
    /// Starts replay at the first snapshot.
    pub fn new(trace: Trace) -> Self {
        Self { trace, position: 0 }
    }

    /// Replaces the trace wholesale and rewinds to the start.
    pub fn load(&mut self, trace: Trace) {
        debug!(steps = trace.len(), valid = trace.valid(), "loaded new trace");
        self.trace = trace;
        self.position = 0;
    }

    pub fn first(&mut self) {
        self.position = 0;
    }

    pub fn previous(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn next(&mut self) {
        self.position = (self.position + 1).min(self.trace.len() - 1);
    }

    pub fn last(&mut self) {
        self.position = self.trace.len() - 1;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> &Snapshot {
        &self.trace.steps()[self.position]
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }
}

/// Holds the replay state across simulation attempts.
///
/// A new trace only ever lands through [`SimulationSession::deliver`]; a
/// failed or canceled attempt leaves the previous trace and the cursor
/// position exactly where they were.
#[derive(Debug, Default)]
pub struct SimulationSession {
    stepper: Option<TraceStepper>,
}

impl SimulationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the outcome of a simulation request.
    ///
    /// On success the session starts replaying the new trace from the
    /// first snapshot. On failure the error is passed back and the current
    /// stepper, if any, is untouched.
    pub fn deliver(&mut self, outcome: Result<Trace, SimulationError>) -> Result<(), SimulationError> {
        let trace = outcome?;
        match &mut self.stepper {
            Some(stepper) => stepper.load(trace),
            None => self.stepper = Some(TraceStepper::new(trace)),
        }
        Ok(())
    }

    pub fn stepper(&self) -> Option<&TraceStepper> {
        self.stepper.as_ref()
    }

    pub fn stepper_mut(&mut self) -> Option<&mut TraceStepper> {
        self.stepper.as_mut()
    }
}
