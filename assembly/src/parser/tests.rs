#[cfg(test)]
mod test_parser {
    use pest::Parser;

    use crate::opcodes::Opcode;
    use crate::parser::{parse_program, ParseError, Rule, ScriptParser};
    use crate::script::{Instruction, Literal};
    use crate::templates::Template;

    fn ensure_parser_succeeds(rule: Rule, text: &str) {
        let parsed = ScriptParser::parse(rule, text);
        assert!(parsed.is_ok(), "script text failed to parse: {text}");
    }

    fn ensure_parser_fails(rule: Rule, text: &str) {
        let parsed = ScriptParser::parse(rule, text);
        assert!(parsed.is_err(), "script text should not parse: {text}");
    }

    #[test]
    fn grammar_accepts_token_shapes() {
        let ok_programs = [
            "OP_DUP OP_HASH160",
            "1 1 OP_ADD",
            "-1 OP_ABS",
            "<SIGNATURE> <PUBKEY> OP_CHECKSIG",
            "SIG1 PK1",
            "  OP_NOP\n\tOP_NOP  ",
            "",
        ];
        for text in ok_programs {
            ensure_parser_succeeds(Rule::program, text);
        }

        let bad_programs = ["<>", "<SIG NATURE>", "a+b", "OP_DUP ; comment"];
        for text in bad_programs {
            ensure_parser_fails(Rule::program, text);
        }
    }

    #[test]
    fn parses_numbers_and_opcodes() {
        let script = parse_program("1 1 OP_ADD").unwrap();
        assert_eq!(
            script.items(),
            [
                Instruction::Push(Literal::data("1")),
                Instruction::Push(Literal::data("1")),
                Instruction::Op(Opcode::OP_ADD),
            ]
        );
    }

    #[test]
    fn parses_a_pay_to_pubkey_program() {
        let script = parse_program("SIGNATURE PUBKEY OP_CHECKSIG").unwrap();
        assert_eq!(
            script.items(),
            [
                Instruction::Push(Literal::data("SIGNATURE")),
                Instruction::Push(Literal::data("PUBKEY")),
                Instruction::Op(Opcode::OP_CHECKSIG),
            ]
        );
    }

    #[test]
    fn placeholders_keep_their_brackets_for_display() {
        let script = parse_program("<SIGNATURE> OP_CHECKSIG").unwrap();
        let Instruction::Push(literal) = &script.items()[0] else {
            panic!("expected a push");
        };
        assert_eq!(literal.raw(), "SIGNATURE");
        assert_eq!(literal.display_value(), "<SIGNATURE>");
    }

    #[test]
    fn digit_led_words_are_data_not_numbers() {
        let script = parse_program("123abc").unwrap();
        assert_eq!(
            script.items(),
            [Instruction::Push(Literal::data("123abc"))]
        );
    }

    #[test]
    fn unknown_mnemonics_are_reported_by_name() {
        match parse_program("OP_DUP OP_BOGUS") {
            Err(ParseError::UnknownOpcode(name)) => assert_eq!(name, "OP_BOGUS"),
            other => panic!("expected an unknown-opcode error, got {other:?}"),
        }
    }

    #[test]
    fn unbalanced_placeholder_is_malformed() {
        assert!(matches!(
            parse_program("<SIGNATURE OP_CHECKSIG"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn empty_input_is_an_empty_script() {
        assert!(parse_program("").unwrap().is_empty());
        assert!(parse_program("   \n\t").unwrap().is_empty());
    }

    #[test]
    fn rendered_templates_round_trip() {
        let pair = Template::PayToPubkeyHash {
            pubkey_hash: Literal::placeholder("PUBKEYHASH"),
            signature: Literal::placeholder("SIGNATURE"),
            pubkey: Literal::placeholder("PUBKEY"),
        }
        .generate()
        .unwrap();

        let locking = parse_program(&pair.locking.to_string()).unwrap();
        assert_eq!(locking.items(), pair.locking.items());

        let unlocking = parse_program(&pair.unlocking.to_string()).unwrap();
        assert_eq!(unlocking.items(), pair.unlocking.items());
    }
}
