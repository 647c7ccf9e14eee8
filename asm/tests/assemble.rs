use arch::{Mnemonic, Mode};
use asm65::{assemble, Assembler, Config, Diag, Error};

fn bytes(source: &str) -> Vec<u8> {
    match assemble(source) {
        Ok(program) => program.bytes,
        Err(diag) => panic!("{source:?}: {diag}"),
    }
}

fn error(source: &str) -> Diag {
    match assemble(source) {
        Ok(program) => panic!("{source:?} assembled to {:02X?}", program.bytes),
        Err(diag) => diag,
    }
}

macro_rules! case {
    ($name:ident, $code:expr, [$($byte:expr),* $(,)?]) => {
        #[test]
        fn $name() {
            assert_eq!(bytes($code), vec![$($byte),*]);
        }
    };
}

// ----------------------------------------------------------------------------
// Encodings

case!(immediate, "LDA #$05", [0xA9, 0x05]);
case!(
    labels_and_jump,
    "START: LDA #$01 \n STA $10 \n JMP START",
    [0xA9, 0x01, 0x85, 0x10, 0x4C, 0x00, 0x00]
);
case!(zeropage_x, "LDA $00FF,X", [0xB5, 0xFF]);
case!(absolute_x, "LDA $0100,X", [0xBD, 0x00, 0x01]);
case!(absolute, "STA $0200", [0x8D, 0x00, 0x02]);
case!(decimal, "LDA #10\nSTA 300", [0xA9, 0x0A, 0x8D, 0x2C, 0x01]);
case!(indirect_x, "LDA ($10,X)", [0xA1, 0x10]);
case!(indirect_y, "STA ($20),Y", [0x91, 0x20]);
case!(indirect_jump, "JMP ($FFFC)", [0x6C, 0xFC, 0xFF]);
case!(zeropage_y, "LDX $10,Y\nSTX $20,Y", [0xB6, 0x10, 0x96, 0x20]);
case!(widened_y, "LDA $10,Y", [0xB9, 0x10, 0x00]);
case!(widened_jump, "JMP $10\nJSR $20", [0x4C, 0x10, 0x00, 0x20, 0x20, 0x00]);
case!(implied, "inx\ndey\nrts", [0xE8, 0x88, 0x60]);
case!(accumulator, "ASL\nasl a\nLSR A\nROL $10", [0x0A, 0x0A, 0x4A, 0x26, 0x10]);
case!(
    processor_header,
    "    processor 6502\n    .org $F000\nSTART: SEI\n    JMP START",
    [0x78, 0x4C, 0x00, 0xF0]
);
case!(
    comments_and_blanks,
    "; header\n\n   NOP ; one\n\t; two\nNOP",
    [0xEA, 0xEA]
);

// ----------------------------------------------------------------------------
// Symbols

case!(
    forward_and_backward_jumps,
    "JSR SUB\nLOOP: JMP LOOP\nSUB: RTS",
    [0x20, 0x06, 0x00, 0x4C, 0x03, 0x00, 0x60]
);
case!(
    label_only_line,
    "NOP\nHERE:\nTHERE:\n JMP HERE\n JMP THERE",
    [0xEA, 0x4C, 0x01, 0x00, 0x4C, 0x01, 0x00]
);
case!(
    countdown_loop,
    "      LDX #$08\nLOOP: DEX\n      BNE LOOP\n      BRK",
    [0xA2, 0x08, 0xCA, 0xD0, 0xFD, 0x00]
);
case!(
    forward_branch,
    "  BEQ DONE\n  INX\nDONE: RTS",
    [0xF0, 0x01, 0xE8, 0x60]
);
case!(
    indexed_symbol,
    "LDA TABLE,X\nLDX TABLE,Y\nTABLE: .byte 7",
    [0xBD, 0x06, 0x00, 0xBE, 0x06, 0x00, 0x07]
);
case!(
    indirect_symbol,
    "JMP (VECTOR)\nVECTOR: .word $1234",
    [0x6C, 0x03, 0x00, 0x34, 0x12]
);
case!(
    zero_page_label_stays_absolute,
    "PTR: .byte 0\nLDA PTR",
    [0x00, 0xAD, 0x00, 0x00]
);

#[test]
fn labels_are_case_sensitive() {
    let diag = error("loop: NOP\n JMP LOOP");
    assert_eq!(diag.line, 2);
    assert!(matches!(diag.error, Error::UndefinedSymbol(s) if s == "LOOP"));
}

#[test]
fn forward_and_backward_references_are_symmetric() {
    let forward = bytes("JMP L\nBNE L\nLDA L\nL: NOP");
    let backward = bytes(".org $0008\nL: NOP\nJMP L\nBNE L\nLDA L");

    // Same shapes, same widths, independent of reference direction.
    assert_eq!(forward, vec![0x4C, 0x08, 0x00, 0xD0, 0x03, 0xAD, 0x08, 0x00, 0xEA]);
    assert_eq!(backward, vec![0xEA, 0x4C, 0x08, 0x00, 0xD0, 0xFA, 0xAD, 0x08, 0x00]);

    // Jumps and branches agree with the literal-address spelling of the same code.
    assert_eq!(forward[..5], bytes("JMP $0008\nBNE $0008")[..]);
    assert_eq!(backward[1..6], bytes(".org $0009\nJMP $0008\nBNE $0008")[..]);
}

// ----------------------------------------------------------------------------
// Branch range

#[test]
fn branch_forward_limit() {
    let program = assemble("  BNE FAR\n  .org $0081\nFAR: NOP").unwrap();
    assert_eq!(program.bytes[..2], [0xD0, 0x7F]);
    assert_eq!(program.bytes[0x81], 0xEA);

    let diag = error("  BNE FAR\n  .org $0082\nFAR: NOP");
    assert_eq!(diag.line, 1);
    assert!(matches!(
        diag.error,
        Error::BranchRange { addr: 0x0000, target: 0x0082, offset: 128 }
    ));
}

#[test]
fn branch_backward_limit() {
    let program = assemble("BACK: NOP\n  .org $007E\n  BNE BACK").unwrap();
    assert_eq!(program.bytes[0x7E..], [0xD0, 0x80]);

    let diag = error("BACK: NOP\n  .org $007F\n  BNE BACK");
    assert_eq!(diag.line, 3);
    assert!(matches!(diag.error, Error::BranchRange { offset: -129, .. }));
}

#[test]
fn branch_to_literal_address() {
    assert_eq!(bytes(".org $0200\nBEQ $0281"), vec![0xF0, 0x7F]);
    assert_eq!(bytes(".org $0200\nBEQ $0182"), vec![0xF0, 0x80]);
    let diag = error(".org $0200\nBEQ $0282");
    assert_eq!(diag.line, 2);
    assert!(matches!(diag.error, Error::BranchRange { offset: 128, .. }));
}

// ----------------------------------------------------------------------------
// Directives

#[test]
fn origin_sets_location_counter() {
    let program = assemble(".org $C000\nRESET: LDA #$00\n JMP RESET").unwrap();
    assert_eq!(program.origin, 0xC000);
    assert_eq!(program.bytes, vec![0xA9, 0x00, 0x4C, 0x00, 0xC0]);
    assert_eq!(program.symbols.get_val("RESET"), Some(0xC000));
}

#[test]
fn vectors_at_top_of_memory() {
    let program = assemble(
        ".org $FFF0\nRESET: SEI\nNMI: RTI\n.org $FFFA\n.word NMI\n.word RESET\n.word $FFF1",
    )
    .unwrap();
    assert_eq!(program.origin, 0xFFF0);
    assert_eq!(program.bytes.len(), 16);
    assert_eq!(program.bytes[..2], [0x78, 0x40]);
    assert_eq!(program.bytes[10..], [0xF1, 0xFF, 0xF0, 0xFF, 0xF1, 0xFF]);
}

#[test]
fn origin_cannot_move_back() {
    let diag = error("NOP\nNOP\n.org $0001");
    assert_eq!(diag.line, 3);
    assert!(matches!(diag.error, Error::OriginBackwards { origin: 1, end: 2 }));

    // Moving back before anything is emitted is fine.
    assert_eq!(bytes(".org $0800\n.org $0400\nNOP"), vec![0xEA]);
}

#[test]
fn address_overflow() {
    assert_eq!(bytes(".org $FFFD\nJMP $1234"), vec![0x4C, 0x34, 0x12]);

    let diag = error(".org $FFFE\nJMP $1234");
    assert_eq!(diag.line, 2);
    assert!(matches!(diag.error, Error::AddressOverflow { addr: 0xFFFE, len: 3 }));

    let diag = error(".org $FFFF\nNOP\nEND:");
    assert_eq!(diag.line, 3);
}

// ----------------------------------------------------------------------------
// Errors

#[test]
fn duplicate_label() {
    let diag = error("FOO: NOP\nBAR: NOP\nFOO: NOP");
    assert_eq!(diag.line, 3);
    assert!(matches!(diag.error, Error::DuplicateLabel(s) if s == "FOO"));
}

#[test]
fn undefined_symbol() {
    let diag = error("NOP\nJMP NOPE");
    assert_eq!(diag.line, 2);
    assert!(matches!(diag.error, Error::UndefinedSymbol(s) if s == "NOPE"));
}

#[test]
fn unknown_mnemonic() {
    let diag = error("NOP\n  FOO $10");
    assert_eq!(diag.line, 2);
    assert!(matches!(diag.error, Error::UnknownMnemonic(s) if s == "FOO"));
}

#[test]
fn invalid_addressing_mode() {
    let cases = [
        ("STA #$10", Mnemonic::STA, Mode::Immediate),
        ("LDA", Mnemonic::LDA, Mode::Implied),
        ("INX $10", Mnemonic::INX, Mode::ZeroPage),
        ("LDA ($1234)", Mnemonic::LDA, Mode::Indirect),
        ("LDA (VEC)\nVEC: NOP", Mnemonic::LDA, Mode::Indirect),
        ("BNE #$10", Mnemonic::BNE, Mode::Immediate),
        ("BNE TABLE,X\nTABLE: NOP", Mnemonic::BNE, Mode::AbsoluteX),
        ("STX TABLE,Y\nTABLE: NOP", Mnemonic::STX, Mode::AbsoluteY),
        ("STY $1234,X", Mnemonic::STY, Mode::AbsoluteX),
    ];
    for (source, mnemonic, mode) in cases {
        let diag = error(source);
        assert_eq!(diag.line, 1, "{source}");
        match diag.error {
            Error::InvalidAddressingMode(m, md) => assert_eq!((m, md), (mnemonic, mode), "{source}"),
            other => panic!("{source}: {other}"),
        }
    }
}

#[test]
fn invalid_register() {
    assert!(matches!(error("LDA $10,Q").error, Error::InvalidRegister(r) if r == "Q"));
    assert!(matches!(error("LDA ($10,Y)").error, Error::InvalidRegister(r) if r == "Y"));
    assert!(matches!(error("LDA ($10),X").error, Error::InvalidRegister(r) if r == "X"));
}

#[test]
fn invalid_operand_syntax() {
    for source in ["LDA #$1G", "LDA $", "LDA ($10", "LDA (PTR),Y", "LDA #LABEL", "LDA +3"] {
        assert!(
            matches!(error(source).error, Error::InvalidOperandSyntax(_)),
            "{source}"
        );
    }
    assert!(matches!(error("LDA #$100").error, Error::ValueOutOfRange(_, 8)));
}

#[test]
fn split_operand_tokens_are_rejected() {
    for source in ["LDA $1 0", "LDA 1 2", "JMP LA BEL\nLABEL: NOP", "LDA #$0 5"] {
        let diag = error(source);
        assert_eq!(diag.line, 1, "{source}");
        assert!(
            matches!(diag.error, Error::InvalidOperandSyntax(_)),
            "{source}: {}",
            diag.error
        );
    }
    assert_eq!(bytes("LDA  # $05\nSTA ( $20 ) , Y"), vec![0xA9, 0x05, 0x91, 0x20]);
}

#[test]
fn first_error_aborts() {
    // The parse error on line 2 wins over the undefined symbol on line 1.
    let diag = error("JMP NOPE\nLDA #$1G\n");
    assert_eq!(diag.line, 2);
}

// ----------------------------------------------------------------------------
// Configuration

fn with_config(source: &str) -> Result<asm65::Program, Diag> {
    let config = Config::from_yaml(
        "origin: 0xF000\nsymbols:\n  WSYNC: 0x02\n  COLUBK: 0x09\n  PORTA: 0x0280\n",
    )
    .unwrap();
    Assembler::new(&config).assemble(source)
}

#[test]
fn predefined_symbols_behave_like_literals() {
    let program = with_config("STA WSYNC\nSTA COLUBK,X\nLDA PORTA\n.word WSYNC").unwrap();
    assert_eq!(program.origin, 0xF000);
    assert_eq!(
        program.bytes,
        vec![0x85, 0x02, 0x95, 0x09, 0xAD, 0x80, 0x02, 0x02, 0x00]
    );
}

#[test]
fn predefined_symbols_cannot_be_redefined() {
    let diag = with_config("NOP\nWSYNC: NOP").unwrap_err();
    assert_eq!(diag.line, 2);
    assert!(matches!(diag.error, Error::DuplicateLabel(s) if s == "WSYNC"));
}
