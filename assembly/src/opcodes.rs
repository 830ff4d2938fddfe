//! The instruction catalog.
//!
//! Every opcode the script language defines, keyed by mnemonic and by its
//! one-byte consensus code. The catalog is static data assembled once at
//! first use; nothing in it changes at runtime, and codes and mnemonics of
//! existing entries are stable across catalog revisions so that shared
//! script text keeps meaning the same thing.

use ahash::AHashMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
use strum_macros::{Display, EnumCount, EnumIter};

/// Functional grouping of catalog entries, used for display filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Category {
    #[strum(serialize = "constants")]
    Constants,
    #[strum(serialize = "flow control")]
    FlowControl,
    #[strum(serialize = "stack")]
    Stack,
    #[strum(serialize = "splice")]
    Splice,
    #[strum(serialize = "bitwise logic")]
    BitwiseLogic,
    #[strum(serialize = "arithmetic")]
    Arithmetic,
    #[strum(serialize = "crypto")]
    Crypto,
    #[strum(serialize = "locktime")]
    Locktime,
}

/// One catalog entry: the opcode plus everything a reader needs to know
/// about it. The operand fields describe stack shape for documentation
/// purposes only; they are never interpreted.
#[derive(Debug)]
pub struct OpcodeInfo {
    pub opcode: Opcode,
    pub mnemonic: &'static str,
    pub category: Category,
    pub operand_input: &'static str,
    pub operand_output: &'static str,
    pub description: &'static str,
    /// Disabled opcodes were removed from consensus long ago but stay in the
    /// catalog for reference and display.
    pub enabled: bool,
}

macro_rules! opcodes {
    ($(
        $name:ident = $code:literal, $category:ident, $status:ident,
        $input:literal, $output:literal, $desc:literal;
    )*) => {
        /// Every catalog instruction, with its consensus code as the
        /// discriminant. Literal pushes are not opcodes; see
        /// [`crate::script::Literal`].
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, TryFromPrimitive, IntoPrimitive,
        )]
        #[repr(u8)]
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        pub enum Opcode {
            $($name = $code,)*
        }

        static CATALOG: &[OpcodeInfo] = &[
            $(OpcodeInfo {
                opcode: Opcode::$name,
                mnemonic: stringify!($name),
                category: Category::$category,
                operand_input: $input,
                operand_output: $output,
                description: $desc,
                enabled: opcodes!(@enabled $status),
            },)*
        ];
    };
    (@enabled enabled) => { true };
    (@enabled disabled) => { false };
}

opcodes! {
    // Constants
    OP_0 = 0x00, Constants, enabled,
        "Nothing.", "(empty value)",
        "An empty array of bytes is pushed onto the stack. (This is not a no-op: an item is added to the stack.)";
    OP_PUSHDATA1 = 0x4c, Constants, enabled,
        "(special)", "data",
        "The next byte contains the number of bytes to be pushed onto the stack.";
    OP_PUSHDATA2 = 0x4d, Constants, enabled,
        "(special)", "data",
        "The next two bytes contain the number of bytes to be pushed onto the stack in little endian order.";
    OP_PUSHDATA4 = 0x4e, Constants, enabled,
        "(special)", "data",
        "The next four bytes contain the number of bytes to be pushed onto the stack in little endian order.";
    OP_1NEGATE = 0x4f, Constants, enabled,
        "Nothing.", "-1",
        "The number -1 is pushed onto the stack.";
    OP_RESERVED = 0x50, Constants, enabled,
        "Nothing.", "Nothing / fail",
        "Transaction is invalid unless occurring in an unexecuted OP_IF branch.";
    OP_1 = 0x51, Constants, enabled,
        "Nothing.", "1",
        "The number 1 is pushed onto the stack.";
    OP_2 = 0x52, Constants, enabled,
        "Nothing.", "2",
        "The number 2 is pushed onto the stack.";
    OP_3 = 0x53, Constants, enabled,
        "Nothing.", "3",
        "The number 3 is pushed onto the stack.";
    OP_4 = 0x54, Constants, enabled,
        "Nothing.", "4",
        "The number 4 is pushed onto the stack.";
    OP_5 = 0x55, Constants, enabled,
        "Nothing.", "5",
        "The number 5 is pushed onto the stack.";
    OP_6 = 0x56, Constants, enabled,
        "Nothing.", "6",
        "The number 6 is pushed onto the stack.";
    OP_7 = 0x57, Constants, enabled,
        "Nothing.", "7",
        "The number 7 is pushed onto the stack.";
    OP_8 = 0x58, Constants, enabled,
        "Nothing.", "8",
        "The number 8 is pushed onto the stack.";
    OP_9 = 0x59, Constants, enabled,
        "Nothing.", "9",
        "The number 9 is pushed onto the stack.";
    OP_10 = 0x5a, Constants, enabled,
        "Nothing.", "10",
        "The number 10 is pushed onto the stack.";
    OP_11 = 0x5b, Constants, enabled,
        "Nothing.", "11",
        "The number 11 is pushed onto the stack.";
    OP_12 = 0x5c, Constants, enabled,
        "Nothing.", "12",
        "The number 12 is pushed onto the stack.";
    OP_13 = 0x5d, Constants, enabled,
        "Nothing.", "13",
        "The number 13 is pushed onto the stack.";
    OP_14 = 0x5e, Constants, enabled,
        "Nothing.", "14",
        "The number 14 is pushed onto the stack.";
    OP_15 = 0x5f, Constants, enabled,
        "Nothing.", "15",
        "The number 15 is pushed onto the stack.";
    OP_16 = 0x60, Constants, enabled,
        "Nothing.", "16",
        "The number 16 is pushed onto the stack.";

    // Flow control
    OP_NOP = 0x61, FlowControl, enabled,
        "Nothing.", "Nothing",
        "Does nothing.";
    OP_VER = 0x62, FlowControl, enabled,
        "Nothing.", "Nothing / fail",
        "Transaction is invalid unless occurring in an unexecuted OP_IF branch.";
    OP_IF = 0x63, FlowControl, enabled,
        "<expression> if [statements] [else [statements]]* endif", "Nothing",
        "If the top stack value is not False, the statements are executed. The top stack value is removed.";
    OP_NOTIF = 0x64, FlowControl, enabled,
        "<expression> notif [statements] [else [statements]]* endif", "Nothing",
        "If the top stack value is False, the statements are executed. The top stack value is removed.";
    OP_VERIF = 0x65, FlowControl, enabled,
        "Nothing.", "fail",
        "Transaction is invalid even when occurring in an unexecuted OP_IF branch.";
    OP_VERNOTIF = 0x66, FlowControl, enabled,
        "Nothing.", "fail",
        "Transaction is invalid even when occurring in an unexecuted OP_IF branch.";
    OP_ELSE = 0x67, FlowControl, enabled,
        "<expression> if [statements] [else [statements]]* endif", "Nothing",
        "If the preceding OP_IF or OP_NOTIF or OP_ELSE was not executed then these statements are and if the preceding OP_IF or OP_NOTIF or OP_ELSE was executed then these statements are not.";
    OP_ENDIF = 0x68, FlowControl, enabled,
        "<expression> if [statements] [else [statements]]* endif", "Nothing",
        "Ends an if/else block. All blocks must end, or the transaction is invalid. An OP_ENDIF without OP_IF earlier is also invalid.";
    OP_VERIFY = 0x69, FlowControl, enabled,
        "True / false", "Nothing / fail",
        "Marks transaction as invalid if top stack value is not true. The top stack value is removed.";
    OP_RETURN = 0x6a, FlowControl, enabled,
        "Nothing", "fail",
        "Marks transaction as invalid. A standard way of attaching extra data to transactions is to add a zero-value output with a scriptPubKey consisting of OP_RETURN followed by data.";

    // Stack
    OP_TOALTSTACK = 0x6b, Stack, enabled,
        "x1", "(alt)x1",
        "Puts the input onto the top of the alt stack. Removes it from the main stack.";
    OP_FROMALTSTACK = 0x6c, Stack, enabled,
        "(alt)x1", "x1",
        "Puts the input onto the top of the main stack. Removes it from the alt stack.";
    OP_2DROP = 0x6d, Stack, enabled,
        "x1 x2", "Nothing",
        "Removes the top two stack items.";
    OP_2DUP = 0x6e, Stack, enabled,
        "x1 x2", "x1 x2 x1 x2",
        "Duplicates the top two stack items.";
    OP_3DUP = 0x6f, Stack, enabled,
        "x1 x2 x3", "x1 x2 x3 x1 x2 x3",
        "Duplicates the top three stack items.";
    OP_2OVER = 0x70, Stack, enabled,
        "x1 x2 x3 x4", "x1 x2 x3 x4 x1 x2",
        "Copies the pair of items two spaces back in the stack to the front.";
    OP_2ROT = 0x71, Stack, enabled,
        "x1 x2 x3 x4 x5 x6", "x3 x4 x5 x6 x1 x2",
        "The fifth and sixth items back are moved to the top of the stack.";
    OP_2SWAP = 0x72, Stack, enabled,
        "x1 x2 x3 x4", "x3 x4 x1 x2",
        "Swaps the top two pairs of items.";
    OP_IFDUP = 0x73, Stack, enabled,
        "x", "x / x x",
        "If the top stack value is not 0, duplicate it.";
    OP_DEPTH = 0x74, Stack, enabled,
        "Nothing", "<Stack size>",
        "Puts the number of stack items onto the stack.";
    OP_DROP = 0x75, Stack, enabled,
        "x", "Nothing",
        "Removes the top stack item.";
    OP_DUP = 0x76, Stack, enabled,
        "x", "x x",
        "Duplicates the top stack item.";
    OP_NIP = 0x77, Stack, enabled,
        "x1 x2", "x2",
        "Removes the second-to-top stack item.";
    OP_OVER = 0x78, Stack, enabled,
        "x1 x2", "x1 x2 x1",
        "Copies the second-to-top stack item to the top.";
    OP_PICK = 0x79, Stack, enabled,
        "xn ... x2 x1 x0 <n>", "xn ... x2 x1 x0 xn",
        "The item n back in the stack is copied to the top.";
    OP_ROLL = 0x7a, Stack, enabled,
        "xn ... x2 x1 x0 <n>", "... x2 x1 x0 xn",
        "The item n back in the stack is moved to the top.";
    OP_ROT = 0x7b, Stack, enabled,
        "x1 x2 x3", "x2 x3 x1",
        "The 3rd item down the stack is moved to the top.";
    OP_SWAP = 0x7c, Stack, enabled,
        "x1 x2", "x2 x1",
        "The top two items on the stack are swapped.";
    OP_TUCK = 0x7d, Stack, enabled,
        "x1 x2", "x2 x1 x2",
        "The item at the top of the stack is copied and inserted before the second-to-top item.";

    // Splice
    OP_CAT = 0x7e, Splice, disabled,
        "x1 x2", "out",
        "Concatenates two strings.";
    OP_SUBSTR = 0x7f, Splice, disabled,
        "in begin size", "out",
        "Returns a section of a string.";
    OP_LEFT = 0x80, Splice, disabled,
        "in size", "out",
        "Keeps only characters left of the specified point in a string.";
    OP_RIGHT = 0x81, Splice, disabled,
        "in size", "out",
        "Keeps only characters right of the specified point in a string.";
    OP_SIZE = 0x82, Splice, enabled,
        "in", "size",
        "Pushes the string length of the top element of the stack (without popping it).";

    // Bitwise logic
    OP_INVERT = 0x83, BitwiseLogic, disabled,
        "in", "out",
        "Flips all of the bits in the input.";
    OP_AND = 0x84, BitwiseLogic, disabled,
        "x1 x2", "out",
        "Boolean and between each bit in the inputs.";
    OP_OR = 0x85, BitwiseLogic, disabled,
        "x1 x2", "out",
        "Boolean or between each bit in the inputs.";
    OP_XOR = 0x86, BitwiseLogic, disabled,
        "x1 x2", "out",
        "Boolean exclusive or between each bit in the inputs.";
    OP_EQUAL = 0x87, BitwiseLogic, enabled,
        "x1 x2", "True / false",
        "Returns 1 if the inputs are exactly equal, 0 otherwise.";
    OP_EQUALVERIFY = 0x88, BitwiseLogic, enabled,
        "x1 x2", "Nothing / fail",
        "Same as OP_EQUAL, but runs OP_VERIFY afterward.";

    // Arithmetic
    OP_RESERVED1 = 0x89, Arithmetic, enabled,
        "Nothing.", "Nothing / fail",
        "Transaction is invalid unless occurring in an unexecuted OP_IF branch.";
    OP_RESERVED2 = 0x8a, Arithmetic, enabled,
        "Nothing.", "Nothing / fail",
        "Transaction is invalid unless occurring in an unexecuted OP_IF branch.";
    OP_1ADD = 0x8b, Arithmetic, enabled,
        "in", "out",
        "1 is added to the input.";
    OP_1SUB = 0x8c, Arithmetic, enabled,
        "in", "out",
        "1 is subtracted from the input.";
    OP_2MUL = 0x8d, Arithmetic, disabled,
        "in", "out",
        "The input is multiplied by 2.";
    OP_2DIV = 0x8e, Arithmetic, disabled,
        "in", "out",
        "The input is divided by 2.";
    OP_NEGATE = 0x8f, Arithmetic, enabled,
        "in", "out",
        "The sign of the input is flipped.";
    OP_ABS = 0x90, Arithmetic, enabled,
        "in", "out",
        "The input is made positive.";
    OP_NOT = 0x91, Arithmetic, enabled,
        "in", "out",
        "If the input is 0 or 1, it is flipped. Otherwise the output will be 0.";
    OP_0NOTEQUAL = 0x92, Arithmetic, enabled,
        "in", "out",
        "Returns 0 if the input is 0. 1 otherwise.";
    OP_ADD = 0x93, Arithmetic, enabled,
        "a b", "out",
        "a is added to b.";
    OP_SUB = 0x94, Arithmetic, enabled,
        "a b", "out",
        "b is subtracted from a.";
    OP_MUL = 0x95, Arithmetic, disabled,
        "a b", "out",
        "a is multiplied by b.";
    OP_DIV = 0x96, Arithmetic, disabled,
        "a b", "out",
        "a is divided by b.";
    OP_MOD = 0x97, Arithmetic, disabled,
        "a b", "out",
        "Returns the remainder after dividing a by b.";
    OP_LSHIFT = 0x98, Arithmetic, disabled,
        "a b", "out",
        "Shifts a left b bits, preserving sign.";
    OP_RSHIFT = 0x99, Arithmetic, disabled,
        "a b", "out",
        "Shifts a right b bits, preserving sign.";
    OP_BOOLAND = 0x9a, Arithmetic, enabled,
        "a b", "out",
        "If both a and b are not 0, the output is 1. Otherwise 0.";
    OP_BOOLOR = 0x9b, Arithmetic, enabled,
        "a b", "out",
        "If a or b is not 0, the output is 1. Otherwise 0.";
    OP_NUMEQUAL = 0x9c, Arithmetic, enabled,
        "a b", "out",
        "Returns 1 if the numbers are equal, 0 otherwise.";
    OP_NUMEQUALVERIFY = 0x9d, Arithmetic, enabled,
        "a b", "Nothing / fail",
        "Same as OP_NUMEQUAL, but runs OP_VERIFY afterward.";
    OP_NUMNOTEQUAL = 0x9e, Arithmetic, enabled,
        "a b", "out",
        "Returns 1 if the numbers are not equal, 0 otherwise.";
    OP_LESSTHAN = 0x9f, Arithmetic, enabled,
        "a b", "out",
        "Returns 1 if a is less than b, 0 otherwise.";
    OP_GREATERTHAN = 0xa0, Arithmetic, enabled,
        "a b", "out",
        "Returns 1 if a is greater than b, 0 otherwise.";
    OP_LESSTHANOREQUAL = 0xa1, Arithmetic, enabled,
        "a b", "out",
        "Returns 1 if a is less than or equal to b, 0 otherwise.";
    OP_GREATERTHANOREQUAL = 0xa2, Arithmetic, enabled,
        "a b", "out",
        "Returns 1 if a is greater than or equal to b, 0 otherwise.";
    OP_MIN = 0xa3, Arithmetic, enabled,
        "a b", "out",
        "Returns the smaller of a and b.";
    OP_MAX = 0xa4, Arithmetic, enabled,
        "a b", "out",
        "Returns the larger of a and b.";
    OP_WITHIN = 0xa5, Arithmetic, enabled,
        "x min max", "out",
        "Returns 1 if x is within the specified range (left-inclusive), 0 otherwise.";

    // Crypto
    OP_RIPEMD160 = 0xa6, Crypto, enabled,
        "in", "hash",
        "The input is hashed using RIPEMD-160.";
    OP_SHA1 = 0xa7, Crypto, enabled,
        "in", "hash",
        "The input is hashed using SHA-1.";
    OP_SHA256 = 0xa8, Crypto, enabled,
        "in", "hash",
        "The input is hashed using SHA-256.";
    OP_HASH160 = 0xa9, Crypto, enabled,
        "in", "hash",
        "The input is hashed twice: first with SHA-256 and then with RIPEMD-160.";
    OP_HASH256 = 0xaa, Crypto, enabled,
        "in", "hash",
        "The input is hashed two times with SHA-256.";
    OP_CODESEPARATOR = 0xab, Crypto, enabled,
        "Nothing", "Nothing",
        "All of the signature checking words will only match signatures to the data after the most recently-executed OP_CODESEPARATOR.";
    OP_CHECKSIG = 0xac, Crypto, enabled,
        "sig pubkey", "True / false",
        "The entire transaction's outputs, inputs, and script (from the most recently-executed OP_CODESEPARATOR to the end) are hashed. The signature used by OP_CHECKSIG must be a valid signature for this hash and public key. If it is, 1 is returned, 0 otherwise.";
    OP_CHECKSIGVERIFY = 0xad, Crypto, enabled,
        "sig pubkey", "Nothing / fail",
        "Same as OP_CHECKSIG, but OP_VERIFY is executed afterward.";
    OP_CHECKMULTISIG = 0xae, Crypto, enabled,
        "x sig1 sig2 ... <number of signatures> pub1 pub2 <number of public keys>", "True / False",
        "Compares the first signature against each public key until it finds an ECDSA match. Starting with the subsequent public key, it compares the second signature against each remaining public key until it finds an ECDSA match. The process is repeated until all signatures have been checked or not enough public keys remain to produce a successful result. All signatures need to match a public key. If all signatures are valid, 1 is returned, 0 otherwise.";
    OP_CHECKMULTISIGVERIFY = 0xaf, Crypto, enabled,
        "x sig1 sig2 ... <number of signatures> pub1 pub2 ... <number of public keys>", "Nothing / fail",
        "Same as OP_CHECKMULTISIG, but OP_VERIFY is executed afterward.";
    OP_CHECKSIGADD = 0xba, Crypto, enabled,
        "sig n pub", "out",
        "Three values are popped from the stack. The integer n is incremented by one and returned to the stack if the signature is valid for the public key and transaction. The integer n is returned to the stack unchanged if the signature is the empty vector. In any other case, the script is invalid. This opcode is only available in tapscript.";

    // Locktime
    OP_CHECKLOCKTIMEVERIFY = 0xb1, Locktime, enabled,
        "x", "x / fail",
        "Marks transaction as invalid if the top stack item is greater than the transaction's nLockTime field, otherwise script evaluation continues as though an OP_NOP was executed. The precise semantics are described in BIP 0065.";
    OP_CHECKSEQUENCEVERIFY = 0xb2, Locktime, enabled,
        "x", "x / fail",
        "Marks transaction as invalid if the relative lock time of the input (enforced by BIP 0068 with nSequence) is not equal to or longer than the value of the top stack item. The precise semantics are described in BIP 0112.";
}

static BY_MNEMONIC: Lazy<AHashMap<&'static str, &'static OpcodeInfo>> =
    Lazy::new(|| CATALOG.iter().map(|info| (info.mnemonic, info)).collect());

static BY_CODE: Lazy<AHashMap<u8, &'static OpcodeInfo>> =
    Lazy::new(|| CATALOG.iter().map(|info| (info.opcode.code(), info)).collect());

/// The whole catalog, in declaration order (categories grouped, codes
/// ascending within each category).
pub fn catalog() -> &'static [OpcodeInfo] {
    CATALOG
}

/// Looks up a catalog entry by its exact mnemonic, e.g. `"OP_DUP"`.
pub fn lookup(mnemonic: &str) -> Option<&'static OpcodeInfo> {
    BY_MNEMONIC.get(mnemonic).copied()
}

/// All entries of one category, preserving catalog order.
pub fn by_category(category: Category) -> impl Iterator<Item = &'static OpcodeInfo> {
    CATALOG.iter().filter(move |info| info.category == category)
}

/// The catalog filtered to entries still part of consensus, preserving
/// catalog order.
pub fn enabled() -> impl Iterator<Item = &'static OpcodeInfo> {
    CATALOG.iter().filter(|info| info.enabled)
}

/// The catalog as the display layer sees it: everything, or only the
/// entries still in consensus.
pub fn listing(show_disabled: bool) -> impl Iterator<Item = &'static OpcodeInfo> {
    CATALOG
        .iter()
        .filter(move |info| show_disabled || info.enabled)
}

impl Opcode {
    /// The one-byte consensus code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The code rendered as `0x`-prefixed hex, e.g. `0x76` for OP_DUP.
    pub fn hex(self) -> String {
        format!("0x{:02x}", self.code())
    }

    pub fn info(self) -> &'static OpcodeInfo {
        BY_CODE
            .get(&self.code())
            .expect("every Opcode variant has a catalog entry")
    }

    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    pub fn category(self) -> Category {
        self.info().category
    }

    pub fn is_enabled(self) -> bool {
        self.info().enabled
    }

    /// Resolves a mnemonic to its opcode, if the catalog knows it.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        lookup(mnemonic).map(|info| info.opcode)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
