use bimap::BiMap;
use once_cell::sync::Lazy;

use crate::{mnemonic::Mnemonic, mode::Mode};

macro_rules! ops {
    ($map:ident, $m:ident: $($mode:ident = $code:expr),+ $(,)?) => {
        $( $map.insert((Mnemonic::$m, Mode::$mode), $code); )+
    };
}

// Documented NMOS 6502 instruction set. Accumulator forms are stored as Implied.
static OPCODES: Lazy<BiMap<(Mnemonic, Mode), u8>> = Lazy::new(|| {
    let mut map: BiMap<(Mnemonic, Mode), u8> = BiMap::new();

    // Load / store
    ops!(map, LDA: Immediate = 0xA9, ZeroPage = 0xA5, ZeroPageX = 0xB5, Absolute = 0xAD,
        AbsoluteX = 0xBD, AbsoluteY = 0xB9, IndirectX = 0xA1, IndirectY = 0xB1);
    ops!(map, LDX: Immediate = 0xA2, ZeroPage = 0xA6, ZeroPageY = 0xB6, Absolute = 0xAE,
        AbsoluteY = 0xBE);
    ops!(map, LDY: Immediate = 0xA0, ZeroPage = 0xA4, ZeroPageX = 0xB4, Absolute = 0xAC,
        AbsoluteX = 0xBC);
    ops!(map, STA: ZeroPage = 0x85, ZeroPageX = 0x95, Absolute = 0x8D, AbsoluteX = 0x9D,
        AbsoluteY = 0x99, IndirectX = 0x81, IndirectY = 0x91);
    ops!(map, STX: ZeroPage = 0x86, ZeroPageY = 0x96, Absolute = 0x8E);
    ops!(map, STY: ZeroPage = 0x84, ZeroPageX = 0x94, Absolute = 0x8C);

    // Arithmetic / logic
    ops!(map, ADC: Immediate = 0x69, ZeroPage = 0x65, ZeroPageX = 0x75, Absolute = 0x6D,
        AbsoluteX = 0x7D, AbsoluteY = 0x79, IndirectX = 0x61, IndirectY = 0x71);
    ops!(map, SBC: Immediate = 0xE9, ZeroPage = 0xE5, ZeroPageX = 0xF5, Absolute = 0xED,
        AbsoluteX = 0xFD, AbsoluteY = 0xF9, IndirectX = 0xE1, IndirectY = 0xF1);
    ops!(map, AND: Immediate = 0x29, ZeroPage = 0x25, ZeroPageX = 0x35, Absolute = 0x2D,
        AbsoluteX = 0x3D, AbsoluteY = 0x39, IndirectX = 0x21, IndirectY = 0x31);
    ops!(map, ORA: Immediate = 0x09, ZeroPage = 0x05, ZeroPageX = 0x15, Absolute = 0x0D,
        AbsoluteX = 0x1D, AbsoluteY = 0x19, IndirectX = 0x01, IndirectY = 0x11);
    ops!(map, EOR: Immediate = 0x49, ZeroPage = 0x45, ZeroPageX = 0x55, Absolute = 0x4D,
        AbsoluteX = 0x5D, AbsoluteY = 0x59, IndirectX = 0x41, IndirectY = 0x51);
    ops!(map, CMP: Immediate = 0xC9, ZeroPage = 0xC5, ZeroPageX = 0xD5, Absolute = 0xCD,
        AbsoluteX = 0xDD, AbsoluteY = 0xD9, IndirectX = 0xC1, IndirectY = 0xD1);
    ops!(map, CPX: Immediate = 0xE0, ZeroPage = 0xE4, Absolute = 0xEC);
    ops!(map, CPY: Immediate = 0xC0, ZeroPage = 0xC4, Absolute = 0xCC);
    ops!(map, BIT: ZeroPage = 0x24, Absolute = 0x2C);

    // Read-modify-write
    ops!(map, INC: ZeroPage = 0xE6, ZeroPageX = 0xF6, Absolute = 0xEE, AbsoluteX = 0xFE);
    ops!(map, DEC: ZeroPage = 0xC6, ZeroPageX = 0xD6, Absolute = 0xCE, AbsoluteX = 0xDE);
    ops!(map, ASL: Implied = 0x0A, ZeroPage = 0x06, ZeroPageX = 0x16, Absolute = 0x0E,
        AbsoluteX = 0x1E);
    ops!(map, LSR: Implied = 0x4A, ZeroPage = 0x46, ZeroPageX = 0x56, Absolute = 0x4E,
        AbsoluteX = 0x5E);
    ops!(map, ROL: Implied = 0x2A, ZeroPage = 0x26, ZeroPageX = 0x36, Absolute = 0x2E,
        AbsoluteX = 0x3E);
    ops!(map, ROR: Implied = 0x6A, ZeroPage = 0x66, ZeroPageX = 0x76, Absolute = 0x6E,
        AbsoluteX = 0x7E);

    // Control flow
    ops!(map, JMP: Absolute = 0x4C, Indirect = 0x6C);
    ops!(map, JSR: Absolute = 0x20);
    ops!(map, RTS: Implied = 0x60);
    ops!(map, RTI: Implied = 0x40);
    ops!(map, BRK: Implied = 0x00);
    ops!(map, BCC: Relative = 0x90);
    ops!(map, BCS: Relative = 0xB0);
    ops!(map, BEQ: Relative = 0xF0);
    ops!(map, BMI: Relative = 0x30);
    ops!(map, BNE: Relative = 0xD0);
    ops!(map, BPL: Relative = 0x10);
    ops!(map, BVC: Relative = 0x50);
    ops!(map, BVS: Relative = 0x70);

    // Implied
    ops!(map, INX: Implied = 0xE8);
    ops!(map, INY: Implied = 0xC8);
    ops!(map, DEX: Implied = 0xCA);
    ops!(map, DEY: Implied = 0x88);
    ops!(map, TAX: Implied = 0xAA);
    ops!(map, TXA: Implied = 0x8A);
    ops!(map, TAY: Implied = 0xA8);
    ops!(map, TYA: Implied = 0x98);
    ops!(map, TSX: Implied = 0xBA);
    ops!(map, TXS: Implied = 0x9A);
    ops!(map, PHA: Implied = 0x48);
    ops!(map, PLA: Implied = 0x68);
    ops!(map, PHP: Implied = 0x08);
    ops!(map, PLP: Implied = 0x28);
    ops!(map, CLC: Implied = 0x18);
    ops!(map, SEC: Implied = 0x38);
    ops!(map, CLD: Implied = 0xD8);
    ops!(map, SED: Implied = 0xF8);
    ops!(map, CLI: Implied = 0x58);
    ops!(map, SEI: Implied = 0x78);
    ops!(map, CLV: Implied = 0xB8);
    ops!(map, NOP: Implied = 0xEA);

    map
});

/// Opcode byte for a mnemonic in the given mode, `None` if the pair is not encodable.
pub fn opcode(mnemonic: Mnemonic, mode: Mode) -> Option<u8> {
    OPCODES.get_by_left(&(mnemonic, mode)).copied()
}

pub fn decode(opcode: u8) -> Option<(Mnemonic, Mode)> {
    OPCODES.get_by_right(&opcode).copied()
}

pub fn entries() -> impl Iterator<Item = (Mnemonic, Mode, u8)> {
    OPCODES.iter().map(|(&(m, mode), &op)| (m, mode, op))
}

/// Modes the mnemonic can be encoded in.
pub fn modes(mnemonic: Mnemonic) -> Vec<Mode> {
    let mut modes: Vec<Mode> = entries()
        .filter(|(m, _, _)| *m == mnemonic)
        .map(|(_, mode, _)| mode)
        .collect();
    modes.sort_by_key(|mode| *mode as u8);
    modes
}
