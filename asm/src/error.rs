use arch::{Mnemonic, Mode};
use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown mnemonic: `{0}`")]
    UnknownMnemonic(String),

    #[error("Invalid addressing mode: `{0}` has no {1} form")]
    InvalidAddressingMode(Mnemonic, Mode),

    #[error("Invalid operand syntax: `{0}`")]
    InvalidOperandSyntax(String),

    #[error("Invalid register: `{0}`")]
    InvalidRegister(String),

    #[error("Invalid label: `{0}`")]
    InvalidLabel(String),

    #[error("Value `{0}` does not fit in {1} bits")]
    ValueOutOfRange(String, u8),

    #[error("Re-defined label: `{0}`")]
    DuplicateLabel(String),

    #[error("Undefined symbol: `{0}`")]
    UndefinedSymbol(String),

    #[error("Branch out of range at ${addr:04X} to ${target:04X} (offset {offset})")]
    BranchRange { addr: u16, target: u16, offset: i32 },

    #[error("Address overflow: {len} byte(s) at ${addr:04X} run past $FFFF")]
    AddressOverflow { addr: u32, len: u16 },

    #[error("Origin ${origin:04X} lies below already emitted bytes (end ${end:04X})")]
    OriginBackwards { origin: u16, end: u32 },

    #[error("Length mismatch for `{mnemonic}` {mode}: expected {expected} byte(s), emitted {actual}")]
    LengthMismatch {
        mnemonic: Mnemonic,
        mode: Mode,
        expected: u16,
        actual: usize,
    },

    #[error("Fix-up at ${0:04X} lies outside the program image")]
    PatchOutside(u16),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String, #[source] serde_yaml::Error),

    #[error("Failed to serialize symbols: {0}")]
    SymbolDump(String, #[source] serde_yaml::Error),
}

/// An assembly error tied to the 1-based source line it came from.
#[derive(Error, Debug)]
#[error("line {line}: {error}")]
pub struct Diag {
    pub line: usize,
    #[source]
    pub error: Error,
}

impl Diag {
    pub fn new(line: usize, error: Error) -> Self {
        Diag { line, error }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, lines: &[&str]) {
        cprintln!("<red,bold>error</>: {}", self.error);

        cprintln!("     <blue>--></> <underline>{}:{}</>", file, self.line);
        cprintln!("      <blue>|</>");

        let line_content = self
            .line
            .checked_sub(1)
            .and_then(|idx| lines.get(idx))
            .copied()
            .unwrap_or("");

        cprintln!(" <blue>{:>4} |</> {}", self.line, line_content);
        cprintln!("      <blue>|</>");
    }
}
