//! Canonical script pairs for the standard output patterns.
//!
//! Each template maps role-specific placeholder inputs to the locking and
//! unlocking instruction sequences for one well-known script shape. The
//! generator is pure: the same template always yields the same pair, and a
//! rejected template yields nothing at all.

use thiserror::Error;
use tracing::debug;

use crate::opcodes::Opcode;
use crate::script::{Literal, Script};

/// Consensus cap on multisig participants.
pub const MAX_MULTISIG_KEYS: usize = 20;

/// A finished locking/unlocking pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptPair {
    pub locking: Script,
    pub unlocking: Script,
}

impl ScriptPair {
    /// The combined program in execution order: the unlocking script runs
    /// first, then the locking script it is trying to satisfy.
    pub fn program_text(&self) -> String {
        let unlocking = self.unlocking.to_string();
        let locking = self.locking.to_string();
        match (unlocking.is_empty(), locking.is_empty()) {
            (true, _) => locking,
            (_, true) => unlocking,
            _ => format!("{unlocking} {locking}"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("multisig threshold must satisfy 1 <= m <= n <= 20, got m={required} n={total}")]
    InvalidThreshold { required: usize, total: usize },

    #[error("{role} count mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        role: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// One standard script pattern plus the placeholder payload that fills it.
///
/// Literal inputs are taken verbatim; the generator checks counts and
/// roles, never content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Locking: `<pubkey> OP_CHECKSIG`; unlocking: `<signature>`.
    PayToPubkey { pubkey: Literal, signature: Literal },
    /// Locking: `OP_DUP OP_HASH160 <pubkey hash> OP_EQUALVERIFY OP_CHECKSIG`;
    /// unlocking: `<signature> <pubkey>`.
    PayToPubkeyHash {
        pubkey_hash: Literal,
        signature: Literal,
        pubkey: Literal,
    },
    /// m-of-n bare multisig. The unlocking script starts with an OP_0 dummy:
    /// OP_CHECKMULTISIG pops one element more than it verifies, and every
    /// spender has carried the extra element ever since.
    Multisig {
        required: usize,
        total: usize,
        signatures: Vec<Literal>,
        pubkeys: Vec<Literal>,
    },
    /// Locking: `OP_HASH160 <script hash> OP_EQUAL`; unlocking: the redeem
    /// script's own instructions followed by its serialized text as a final
    /// push.
    PayToScriptHash {
        script_hash: Literal,
        redeem_script: Script,
    },
    /// Provably unspendable data carrier: `OP_RETURN <data>` with no
    /// meaningful unlocking script.
    DataCarrier { data: Literal },
    /// No template at all: both scripts start empty and are built by hand.
    Freeform,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PayToPubkey { .. } => "pay-to-pubkey",
            Self::PayToPubkeyHash { .. } => "pay-to-pubkey-hash",
            Self::Multisig { .. } => "multisig",
            Self::PayToScriptHash { .. } => "pay-to-script-hash",
            Self::DataCarrier { .. } => "data-carrier",
            Self::Freeform => "freeform",
        }
    }

    /// Builds the locking/unlocking pair for this template.
    ///
    /// Validation happens before any script is constructed, so a failed
    /// generation has no partial output for a caller to pick up by mistake.
    pub fn generate(&self) -> Result<ScriptPair, TemplateError> {
        self.validate()?;
        let pair = self.build();
        debug!(
            template = self.name(),
            locking_len = pair.locking.len(),
            unlocking_len = pair.unlocking.len(),
            "generated script pair"
        );
        Ok(pair)
    }

    fn validate(&self) -> Result<(), TemplateError> {
        let Self::Multisig {
            required,
            total,
            signatures,
            pubkeys,
        } = self
        else {
            return Ok(());
        };

        if *required < 1 || required > total || *total > MAX_MULTISIG_KEYS {
            return Err(TemplateError::InvalidThreshold {
                required: *required,
                total: *total,
            });
        }
        if signatures.len() != *required {
            return Err(TemplateError::ArityMismatch {
                role: "signature",
                expected: *required,
                actual: signatures.len(),
            });
        }
        if pubkeys.len() != *total {
            return Err(TemplateError::ArityMismatch {
                role: "public key",
                expected: *total,
                actual: pubkeys.len(),
            });
        }
        Ok(())
    }

    fn build(&self) -> ScriptPair {
        let mut pair = ScriptPair::default();
        match self {
            Self::PayToPubkey { pubkey, signature } => {
                pair.locking.push(pubkey.clone());
                pair.locking.push(Opcode::OP_CHECKSIG);
                pair.unlocking.push(signature.clone());
            }
            Self::PayToPubkeyHash {
                pubkey_hash,
                signature,
                pubkey,
            } => {
                pair.locking.push(Opcode::OP_DUP);
                pair.locking.push(Opcode::OP_HASH160);
                pair.locking.push(pubkey_hash.clone());
                pair.locking.push(Opcode::OP_EQUALVERIFY);
                pair.locking.push(Opcode::OP_CHECKSIG);
                pair.unlocking.push(signature.clone());
                pair.unlocking.push(pubkey.clone());
            }
            Self::Multisig {
                required,
                total,
                signatures,
                pubkeys,
            } => {
                // Thresholds go in as numeric pushes: the interpreter's text
                // format reads bare integers as data, and n may exceed what
                // the small-constant opcodes can express.
                pair.locking.push(Literal::data(required.to_string()));
                for pubkey in pubkeys {
                    pair.locking.push(pubkey.clone());
                }
                pair.locking.push(Literal::data(total.to_string()));
                pair.locking.push(Opcode::OP_CHECKMULTISIG);

                pair.unlocking.push(Opcode::OP_0);
                for signature in signatures {
                    pair.unlocking.push(signature.clone());
                }
            }
            Self::PayToScriptHash {
                script_hash,
                redeem_script,
            } => {
                pair.locking.push(Opcode::OP_HASH160);
                pair.locking.push(script_hash.clone());
                pair.locking.push(Opcode::OP_EQUAL);

                for instruction in redeem_script {
                    pair.unlocking.push(instruction.clone());
                }
                pair.unlocking
                    .push(Literal::data(redeem_script.to_string()));
            }
            Self::DataCarrier { data } => {
                pair.locking.push(Opcode::OP_RETURN);
                pair.locking.push(data.clone());
            }
            Self::Freeform => {}
        }
        pair
    }
}
