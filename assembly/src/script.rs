//! The script data model: catalog instructions and literal pushes arranged
//! in an ordered, editable sequence.

use smallvec::SmallVec;
use thiserror::Error;

use crate::opcodes::Opcode;

/// A non-catalog push of caller-supplied data.
///
/// Carries two values: `raw` is the token submitted to the interpreter, and
/// `display` is what a reader sees. For concrete data the two coincide;
/// placeholder literals display in angle brackets (`<SIGNATURE>`) while
/// submitting the bare token.
#[derive(Debug, Clone)]
pub struct Literal {
    raw: String,
    display: String,
}

impl Literal {
    /// A concrete data push: numbers, hashes, keys entered by the caller.
    pub fn data(value: impl Into<String>) -> Self {
        let raw = value.into();
        Self {
            display: raw.clone(),
            raw,
        }
    }

    /// A stand-in for data not yet known, e.g. `placeholder("SIGNATURE")`.
    pub fn placeholder(name: impl Into<String>) -> Self {
        let raw = name.into();
        Self {
            display: format!("<{raw}>"),
            raw,
        }
    }

    /// The token submitted to the interpreter.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The reader-facing rendering.
    pub fn display_value(&self) -> &str {
        &self.display
    }
}

// A literal's identity is the token it submits; how it displays is
// presentation state and does not distinguish two literals.
impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Literal {}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}

/// One element of a script: a catalog opcode or a literal push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Op(Opcode),
    Push(Literal),
}

impl Instruction {
    /// The token this instruction contributes to interpreter-facing script
    /// text.
    pub fn token(&self) -> &str {
        match self {
            Self::Op(op) => op.mnemonic(),
            Self::Push(literal) => literal.raw(),
        }
    }

    /// Renders the instruction for display under the given options.
    ///
    /// Literals are unaffected by either option: they have no prefix to
    /// strip and no code to show.
    pub fn render(&self, options: &RenderOptions) -> String {
        match self {
            Self::Op(op) => {
                let name = if options.show_prefix {
                    op.mnemonic()
                } else {
                    op.mnemonic().trim_start_matches("OP_")
                };
                if options.show_hex {
                    format!("{name} ({})", op.hex())
                } else {
                    name.to_string()
                }
            }
            Self::Push(literal) => literal.display_value().to_string(),
        }
    }
}

impl From<Opcode> for Instruction {
    fn from(op: Opcode) -> Self {
        Self::Op(op)
    }
}

impl From<Literal> for Instruction {
    fn from(literal: Literal) -> Self {
        Self::Push(literal)
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Display options for rendered scripts and instructions.
///
/// `show_prefix` keeps or strips the `OP_` mnemonic prefix; `show_hex`
/// appends each catalog instruction's code. Both are view-layer state and
/// never touch the underlying script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_prefix: bool,
    pub show_hex: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_prefix: true,
            show_hex: true,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssembleError {
    #[error("index {index} is out of range for a script of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An ordered sequence of instructions under construction.
///
/// Scripts only ever grow at the end or lose one position at a time; they
/// are never reordered. Two scripts never share storage, so editing one
/// cannot be observed through another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    items: SmallVec<[Instruction; 8]>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Instruction] {
        &self.items
    }

    /// Appends an instruction at the end.
    pub fn push(&mut self, instruction: impl Into<Instruction>) {
        self.items.push(instruction.into());
    }

    /// Removes and returns the instruction at `index`.
    ///
    /// Fails without mutating when `index` is past the end, so a stale
    /// index from the display layer cannot corrupt the script.
    pub fn remove(&mut self, index: usize) -> Result<Instruction, AssembleError> {
        if index >= self.items.len() {
            return Err(AssembleError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Renders every instruction in order. Read-only.
    pub fn render(&self, options: &RenderOptions) -> Vec<String> {
        self.items.iter().map(|item| item.render(options)).collect()
    }
}

impl FromIterator<Instruction> for Script {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// The interpreter submission format: raw tokens joined by single spaces.
impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(item.token())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::Opcode;

    fn options(show_prefix: bool, show_hex: bool) -> RenderOptions {
        RenderOptions {
            show_prefix,
            show_hex,
        }
    }

    #[test]
    fn append_then_remove_yields_empty() {
        for instruction in [
            Instruction::Op(Opcode::OP_DUP),
            Instruction::Push(Literal::data("42")),
        ] {
            let mut script = Script::new();
            script.push(instruction);
            assert_eq!(script.remove(0).map(|_| ()), Ok(()));
            assert_eq!(script, Script::new());
        }
    }

    #[test]
    fn remove_out_of_range_leaves_script_unchanged() {
        let mut script = Script::new();
        script.push(Opcode::OP_DUP);
        script.push(Opcode::OP_HASH160);
        let before = script.clone();

        let err = script.remove(2).unwrap_err();
        assert_eq!(err, AssembleError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(script, before);

        assert!(Script::new().remove(0).is_err());
    }

    #[test]
    fn remove_is_positional() {
        let mut script = Script::new();
        script.push(Opcode::OP_DUP);
        script.push(Literal::data("abc"));
        script.push(Opcode::OP_EQUAL);

        let removed = script.remove(1).unwrap();
        assert_eq!(removed, Instruction::Push(Literal::data("abc")));
        assert_eq!(
            script.items(),
            [
                Instruction::Op(Opcode::OP_DUP),
                Instruction::Op(Opcode::OP_EQUAL)
            ]
        );
    }

    #[test]
    fn render_prefix_and_hex_combinations() {
        let mut script = Script::new();
        script.push(Opcode::OP_DUP);
        script.push(Literal::placeholder("PUBKEY"));

        assert_eq!(
            script.render(&options(true, false)),
            vec!["OP_DUP", "<PUBKEY>"]
        );
        assert_eq!(script.render(&options(false, false)), vec!["DUP", "<PUBKEY>"]);
        assert_eq!(
            script.render(&options(true, true)),
            vec!["OP_DUP (0x76)", "<PUBKEY>"]
        );
        assert_eq!(
            script.render(&options(false, true)),
            vec!["DUP (0x76)", "<PUBKEY>"]
        );
    }

    #[test]
    fn stripping_the_prefix_matches_unprefixed_rendering() {
        for info in crate::opcodes::catalog() {
            let with = Instruction::Op(info.opcode).render(&options(true, false));
            let without = Instruction::Op(info.opcode).render(&options(false, false));
            assert_eq!(with.trim_start_matches("OP_"), without);
        }
    }

    #[test]
    fn display_is_the_submission_format() {
        let mut script = Script::new();
        script.push(Literal::placeholder("SIGNATURE"));
        script.push(Literal::data("7"));
        script.push(Opcode::OP_CHECKSIG);
        assert_eq!(script.to_string(), "SIGNATURE 7 OP_CHECKSIG");
    }

    #[test]
    fn rendering_never_mutates() {
        let mut script = Script::new();
        script.push(Opcode::OP_RETURN);
        let before = script.clone();
        let _ = script.render(&RenderOptions::default());
        assert_eq!(script, before);
    }
}
