//! Core library for composing, inspecting, and replaying Bitcoin-style
//! stack scripts.
//!
//! The pieces line up with a construction-and-replay session: the opcode
//! catalog says what instructions exist, [`Template`] and [`Assembler`]
//! build the locking/unlocking script pair, [`parse_program`] reads the
//! same scripts back from text, and [`TraceStepper`] replays the snapshot
//! sequence an external interpreter produced for them.

mod assembler;
mod opcodes;
mod parser;
mod script;
mod simulate;
mod stepper;
mod templates;

pub use assembler::{Assembler, ScriptRole};
pub use opcodes::{by_category, catalog, enabled, listing, lookup, Category, Opcode, OpcodeInfo};
pub use parser::{parse_program, ParseError};
pub use script::{AssembleError, Instruction, Literal, RenderOptions, Script};
pub use simulate::{decode_response, SimulationError, SimulationRequest, SimulatorClient};
pub use stepper::{EmptyTrace, SimulationSession, Snapshot, Trace, TraceStepper};
pub use templates::{ScriptPair, Template, TemplateError, MAX_MULTISIG_KEYS};
