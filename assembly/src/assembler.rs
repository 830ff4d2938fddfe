//! The construction session: two scripts, one assembler.
//!
//! The locking and unlocking scripts share every editing and rendering
//! operation, so a single assembler owns both and takes the target role as
//! a parameter. Each operation touches exactly one script; the other is
//! never observable through it.

use tracing::debug;

use crate::script::{AssembleError, Instruction, RenderOptions, Script};
use crate::templates::{ScriptPair, Template, TemplateError};

/// Which of the session's two scripts an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptRole {
    Locking,
    Unlocking,
}

impl std::fmt::Display for ScriptRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Locking => "locking",
            Self::Unlocking => "unlocking",
        })
    }
}

/// Owns the in-progress script pair for one construction session.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    scripts: ScriptPair,
}

impl Assembler {
    /// A fresh session: both scripts empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pair(scripts: ScriptPair) -> Self {
        Self { scripts }
    }

    pub fn script(&self, role: ScriptRole) -> &Script {
        match role {
            ScriptRole::Locking => &self.scripts.locking,
            ScriptRole::Unlocking => &self.scripts.unlocking,
        }
    }

    fn script_mut(&mut self, role: ScriptRole) -> &mut Script {
        match role {
            ScriptRole::Locking => &mut self.scripts.locking,
            ScriptRole::Unlocking => &mut self.scripts.unlocking,
        }
    }

    /// Appends an instruction to the end of one script.
    pub fn push(&mut self, role: ScriptRole, instruction: impl Into<Instruction>) {
        let instruction = instruction.into();
        debug!(%role, %instruction, "append");
        self.script_mut(role).push(instruction);
    }

    /// Removes the instruction at `index` from one script.
    pub fn remove(&mut self, role: ScriptRole, index: usize) -> Result<Instruction, AssembleError> {
        let removed = self.script_mut(role).remove(index)?;
        debug!(%role, index, instruction = %removed, "remove");
        Ok(removed)
    }

    /// Renders one script for display. Read-only.
    pub fn render(&self, role: ScriptRole, options: &RenderOptions) -> Vec<String> {
        self.script(role).render(options)
    }

    /// Replaces both scripts with a template's output.
    ///
    /// Generation is validated up front, so on error the session's scripts
    /// are exactly what they were before the call.
    pub fn apply(&mut self, template: &Template) -> Result<(), TemplateError> {
        self.scripts = template.generate()?;
        Ok(())
    }

    pub fn pair(&self) -> &ScriptPair {
        &self.scripts
    }

    pub fn into_pair(self) -> ScriptPair {
        self.scripts
    }

    /// The combined program text, unlocking script first.
    pub fn program_text(&self) -> String {
        self.scripts.program_text()
    }
}
