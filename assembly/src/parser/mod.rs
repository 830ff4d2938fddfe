//! Parsing of interpreter-facing script text.
//!
//! The text format is the one scripts serialize to: whitespace-delimited
//! tokens, with catalog instructions spelled by mnemonic and everything
//! else a push. Parsing a script's `Display` output reproduces the script.

use pest::iterators::Pair;
use pest::Parser;
use thiserror::Error;

mod tests;

use crate::opcodes::Opcode;
use crate::script::{Instruction, Literal, Script};

#[derive(pest_derive::Parser)]
#[grammar = "parser/script.pest"]
struct ScriptParser;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An `OP_`-prefixed token the catalog does not know. Reported by name
    /// so the caller can point at the offending token.
    #[error("unknown opcode: {0}")]
    UnknownOpcode(String),

    // The pest error is flattened to its rendering; the position detail it
    // carries is already in the message.
    #[error("malformed script text: {0}")]
    Malformed(String),
}

/// Parses a whole script program into its instruction sequence.
pub fn parse_program(input: &str) -> Result<Script, ParseError> {
    let mut pairs = ScriptParser::parse(Rule::program, input)
        .map_err(|err| ParseError::Malformed(err.to_string()))?;
    let program = pairs.next().expect("a successful parse yields a program");

    let mut script = Script::new();
    for pair in program.into_inner() {
        match pair.as_rule() {
            Rule::token => script.push(parse_token(first_inner(pair))?),
            Rule::EOI => (),
            rule => unreachable!("program contains only tokens, got {rule:?}"),
        }
    }
    Ok(script)
}

#[inline]
fn first_inner(pair: Pair<'_, Rule>) -> Pair<'_, Rule> {
    pair.into_inner()
        .next()
        .expect("a token wraps exactly one inner rule")
}

fn parse_token(token: Pair<'_, Rule>) -> Result<Instruction, ParseError> {
    match token.as_rule() {
        Rule::mnemonic => {
            let name = token.as_str();
            Opcode::from_mnemonic(name)
                .map(Instruction::Op)
                .ok_or_else(|| ParseError::UnknownOpcode(name.to_string()))
        }
        Rule::placeholder => {
            let name = token
                .as_str()
                .trim_start_matches('<')
                .trim_end_matches('>');
            Ok(Instruction::Push(Literal::placeholder(name)))
        }
        Rule::number | Rule::word => Ok(Instruction::Push(Literal::data(token.as_str()))),
        rule => unreachable!("token rules are exhaustive, got {rule:?}"),
    }
}
