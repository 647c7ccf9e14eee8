use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    Implied,
    Immediate,
    #[serde(rename = "zeropage")]
    #[strum(serialize = "zeropage")]
    ZeroPage,
    #[serde(rename = "zeropage_x")]
    #[strum(serialize = "zeropage_x")]
    ZeroPageX,
    #[serde(rename = "zeropage_y")]
    #[strum(serialize = "zeropage_y")]
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl Mode {
    /// Number of operand bytes following the opcode.
    pub fn width(&self) -> u16 {
        use Mode::*;
        match self {
            Implied => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndirectX | IndirectY | Relative => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }

    /// Encoded length of an instruction in this mode, opcode included.
    pub fn len(&self) -> u16 {
        1 + self.width()
    }

    /// The 16-bit counterpart of a zero-page mode.
    pub fn widen(&self) -> Option<Mode> {
        match self {
            Mode::ZeroPage => Some(Mode::Absolute),
            Mode::ZeroPageX => Some(Mode::AbsoluteX),
            Mode::ZeroPageY => Some(Mode::AbsoluteY),
            _ => None,
        }
    }
}
