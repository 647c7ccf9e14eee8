use arch::{Mnemonic, Mode};

use crate::codegen;
use crate::config::Config;
use crate::error::{Diag, Error};
use crate::image::Image;
use crate::operand::{Form, Operand, Value};
use crate::parser::{Line, Stmt};
use crate::symbols::Symbols;

// Operand bytes emitted for a symbol until its fix-up is applied.
const PLACEHOLDER: u16 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Relative,
    Absolute,
}

/// A placeholder waiting for the address of `symbol`.
#[derive(Debug, Clone)]
pub struct Fixup {
    pub symbol: String,
    pub width: Width,
    /// Address of the instruction or datum holding the placeholder.
    pub addr: u16,
    /// Address of the first placeholder byte.
    pub at: u16,
    pub line: usize,
}

/// Address and size of the bytes emitted for one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub addr: u16,
    pub len: u16,
}

#[derive(Debug, Clone)]
pub struct Program {
    pub origin: u16,
    pub bytes: Vec<u8>,
    pub symbols: Symbols,
    pub records: Vec<Record>,
}

impl Program {
    pub fn bytes_at(&self, addr: u16, len: u16) -> &[u8] {
        let start = match addr.checked_sub(self.origin) {
            Some(start) => start as usize,
            None => return &[],
        };
        self.bytes
            .get(start..start + len as usize)
            .unwrap_or(&[])
    }
}

// Reference still to be bound, `offset` bytes into the emitted data.
struct Pending {
    symbol: String,
    width: Width,
    offset: u16,
}

/// State of one assembly run. Consumed by [`Assembler::assemble`].
pub struct Assembler {
    pc: u32,
    origin: u16,
    symbols: Symbols,
    image: Image,
    fixups: Vec<Fixup>,
    records: Vec<Record>,
}

/// Assemble with the default configuration: origin 0, no predefined symbols.
pub fn assemble(source: &str) -> Result<Program, Diag> {
    Assembler::new(&Config::default()).assemble(source)
}

impl Assembler {
    pub fn new(config: &Config) -> Self {
        Assembler {
            pc: config.origin as u32,
            origin: config.origin,
            symbols: Symbols::with_constants(&config.symbols),
            image: Image::new(),
            fixups: vec![],
            records: vec![],
        }
    }

    pub fn assemble(mut self, source: &str) -> Result<Program, Diag> {
        tracing::trace!("starting pass 1");
        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            self.line(line, raw).map_err(|e| Diag::new(line, e))?;
        }
        tracing::debug!(
            symbols = self.symbols.len(),
            fixups = self.fixups.len(),
            "pass 1 done"
        );

        tracing::trace!("starting pass 2");
        self.resolve()?;

        let program = Program {
            origin: self.image.base().unwrap_or(self.origin),
            bytes: self.image.into_bytes(),
            symbols: self.symbols,
            records: self.records,
        };
        tracing::debug!(
            origin = program.origin,
            size = program.bytes.len(),
            "assembled"
        );
        Ok(program)
    }

    // ------------------------------------------------------------------------
    // Pass 1: define labels, emit bytes and placeholders

    fn line(&mut self, line: usize, raw: &str) -> Result<(), Error> {
        let parsed = Line::parse(raw)?;

        if let Some(label) = parsed.label() {
            let addr = self.addr(0)?;
            self.symbols.define(label, line, addr)?;
        }

        match parsed.stmt() {
            None => Ok(()),
            Some(Stmt::Org(origin)) => self.org(*origin),
            Some(Stmt::Inst(mnemonic, operand)) => self.inst(line, *mnemonic, operand),
            Some(Stmt::Byte(value)) => self.emit(line, &[*value], None),
            Some(Stmt::Word(value)) => self.word(line, value),
        }
    }

    /// Current location counter, checked that `len` more bytes still fit below $10000.
    fn addr(&self, len: u16) -> Result<u16, Error> {
        if self.pc > 0xFFFF || self.pc + len as u32 > 0x10000 {
            return Err(Error::AddressOverflow { addr: self.pc, len });
        }
        Ok(self.pc as u16)
    }

    fn org(&mut self, origin: u16) -> Result<(), Error> {
        if let Some(end) = self.image.end() {
            if (origin as u32) < end {
                return Err(Error::OriginBackwards { origin, end });
            }
        }
        tracing::trace!("origin ${:04X}", origin);
        self.pc = origin as u32;
        Ok(())
    }

    fn inst(&mut self, line: usize, mnemonic: Mnemonic, operand: &Operand) -> Result<(), Error> {
        let addr = self.addr(0)?;
        let expected = self.reserved(mnemonic, operand);
        let (mode, value, pending) = self.select(mnemonic, operand, addr)?;
        let bytes = codegen::encode(mnemonic, mode, value)?;
        if bytes.len() != expected as usize {
            return Err(Error::LengthMismatch {
                mnemonic,
                mode,
                expected,
                actual: bytes.len(),
            });
        }
        self.emit(line, &bytes, pending)
    }

    /// Bytes set aside for an instruction, judged from the operand shape alone.
    fn reserved(&self, mnemonic: Mnemonic, operand: &Operand) -> u16 {
        match operand {
            Operand::Implied => 1,
            Operand::Known(mode, _) => codegen::fit(mnemonic, *mode).len(),
            Operand::Symbol(name, form) => match self.symbols.get_const(name) {
                Some(value) => codegen::fit(mnemonic, form.mode_for(value)).len(),
                None if mnemonic.is_branch() => 2,
                None => 3,
            },
        }
    }

    fn select(
        &self,
        mnemonic: Mnemonic,
        operand: &Operand,
        addr: u16,
    ) -> Result<(Mode, u16, Option<Pending>), Error> {
        match operand {
            Operand::Implied => Ok((Mode::Implied, 0, None)),
            Operand::Known(mode, value) => known(mnemonic, *mode, *value, addr),
            Operand::Symbol(name, form) => {
                if let Some(value) = self.symbols.get_const(name) {
                    return known(mnemonic, form.mode_for(value), value, addr);
                }
                let (mode, width) = if mnemonic.is_branch() {
                    match form {
                        Form::Direct => (Mode::Relative, Width::Relative),
                        _ => return Err(Error::InvalidAddressingMode(mnemonic, form.wide())),
                    }
                } else {
                    (codegen::fit(mnemonic, form.wide()), Width::Absolute)
                };
                let pending = Pending {
                    symbol: name.clone(),
                    width,
                    offset: 1,
                };
                Ok((mode, PLACEHOLDER, Some(pending)))
            }
        }
    }

    fn word(&mut self, line: usize, value: &Value) -> Result<(), Error> {
        match value {
            Value::Literal(v) => self.emit(line, &v.to_le_bytes(), None),
            Value::Symbol(name) => match self.symbols.get_const(name) {
                Some(v) => self.emit(line, &v.to_le_bytes(), None),
                None => {
                    let pending = Pending {
                        symbol: name.clone(),
                        width: Width::Absolute,
                        offset: 0,
                    };
                    self.emit(line, &PLACEHOLDER.to_le_bytes(), Some(pending))
                }
            },
        }
    }

    fn emit(&mut self, line: usize, bytes: &[u8], pending: Option<Pending>) -> Result<(), Error> {
        let len = bytes.len() as u16;
        let addr = self.addr(len)?;
        self.image.emit(addr, bytes);
        self.records.push(Record { line, addr, len });
        if let Some(Pending {
            symbol,
            width,
            offset,
        }) = pending
        {
            self.fixups.push(Fixup {
                symbol,
                width,
                addr,
                at: addr + offset,
                line,
            });
        }
        self.pc += len as u32;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Pass 2: bind every placeholder now that all labels are known

    fn resolve(&mut self) -> Result<(), Diag> {
        for fixup in std::mem::take(&mut self.fixups) {
            let diag = |error| Diag::new(fixup.line, error);
            let target = self
                .symbols
                .get_val(&fixup.symbol)
                .ok_or_else(|| diag(Error::UndefinedSymbol(fixup.symbol.clone())))?;
            let patched = match fixup.width {
                Width::Absolute => self.image.patch(fixup.at, &target.to_le_bytes()),
                Width::Relative => codegen::branch_offset(fixup.addr, target)
                    .and_then(|offset| self.image.patch(fixup.at, &[offset])),
            };
            patched.map_err(diag)?;
            tracing::trace!(
                "patched `{}` = ${:04X} at ${:04X}",
                fixup.symbol,
                target,
                fixup.at
            );
        }
        Ok(())
    }
}

fn known(
    mnemonic: Mnemonic,
    mode: Mode,
    value: u16,
    addr: u16,
) -> Result<(Mode, u16, Option<Pending>), Error> {
    let mode = codegen::fit(mnemonic, mode);
    if mode == Mode::Relative {
        let offset = codegen::branch_offset(addr, value)?;
        return Ok((mode, offset as u16, None));
    }
    Ok((mode, value, None))
}
