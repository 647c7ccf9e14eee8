use arch::{Index, Mode};

use crate::error::Error;

// ----------------------------------------------------------------------------
// Value

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Literal(u16),
    Symbol(String),
}

impl Value {
    /// A numeric literal (`$` hex or bare decimal), otherwise a symbol name.
    pub fn parse(s: &str) -> Result<Value, Error> {
        if is_numeric(s) {
            Ok(Value::Literal(parse_number(s)?))
        } else if is_ident(s) {
            Ok(Value::Symbol(s.to_string()))
        } else {
            Err(Error::InvalidOperandSyntax(s.to_string()))
        }
    }
}

pub fn is_numeric(s: &str) -> bool {
    s.starts_with('$') || s.starts_with(|c: char| c.is_ascii_digit())
}

pub fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '.' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Parse `$hex` or decimal into a 16-bit value.
pub fn parse_number(s: &str) -> Result<u16, Error> {
    let (digits, radix) = match s.strip_prefix('$') {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(Error::InvalidOperandSyntax(s.to_string()));
    }
    u16::from_str_radix(digits, radix).map_err(|_| Error::ValueOutOfRange(s.to_string(), 16))
}

fn byte(s: &str, value: u16) -> Result<u16, Error> {
    if value > 0xFF {
        Err(Error::ValueOutOfRange(s.to_string(), 8))
    } else {
        Ok(value)
    }
}

// Zero-page operands of (zp,X), (zp),Y and #imm must be literals.
fn literal_byte(s: &str, operand: &str) -> Result<u16, Error> {
    if !is_numeric(s) {
        return Err(Error::InvalidOperandSyntax(operand.to_string()));
    }
    byte(s, parse_number(s)?)
}

// ----------------------------------------------------------------------------
// Form

/// Syntactic shape of a memory operand, independent of its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Direct,
    Indexed(Index),
    Indirect,
}

impl Form {
    /// Mode for a value known at this point: zero page below 256, absolute otherwise.
    pub fn mode_for(&self, value: u16) -> Mode {
        if value < 0x100 {
            match self {
                Form::Direct => Mode::ZeroPage,
                Form::Indexed(Index::X) => Mode::ZeroPageX,
                Form::Indexed(Index::Y) => Mode::ZeroPageY,
                Form::Indirect => Mode::Indirect,
            }
        } else {
            self.wide()
        }
    }

    /// Mode for a value bound later through a fix-up.
    pub fn wide(&self) -> Mode {
        match self {
            Form::Direct => Mode::Absolute,
            Form::Indexed(Index::X) => Mode::AbsoluteX,
            Form::Indexed(Index::Y) => Mode::AbsoluteY,
            Form::Indirect => Mode::Indirect,
        }
    }
}

// ----------------------------------------------------------------------------
// Operand

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Known(Mode, u16),
    Symbol(String, Form),
}

impl Operand {
    pub fn parse(text: &str) -> Result<Operand, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Operand::Implied);
        }

        // #imm
        if let Some(rest) = text.strip_prefix('#') {
            return Ok(Operand::Known(Mode::Immediate, literal_byte(rest.trim(), text)?));
        }

        // (ind) (zp,X) (zp),Y
        if let Some(rest) = text.strip_prefix('(') {
            let close = rest
                .find(')')
                .ok_or_else(|| Error::InvalidOperandSyntax(text.to_string()))?;
            let (inner, suffix) = (&rest[..close], rest[close + 1..].trim());

            if suffix.is_empty() {
                return match inner.split_once(',') {
                    Some((base, reg)) => {
                        expect_index(reg.trim(), Index::X)?;
                        Ok(Operand::Known(Mode::IndirectX, literal_byte(base.trim(), text)?))
                    }
                    None => Ok(Operand::with_form(Value::parse(inner.trim())?, Form::Indirect)),
                };
            }

            return match suffix.strip_prefix(',') {
                Some(reg) if !inner.contains(',') => {
                    expect_index(reg.trim(), Index::Y)?;
                    Ok(Operand::Known(Mode::IndirectY, literal_byte(inner.trim(), text)?))
                }
                _ => Err(Error::InvalidOperandSyntax(text.to_string())),
            };
        }

        // val,X val,Y
        if let Some((base, reg)) = text.split_once(',') {
            let reg = reg.trim();
            let index = Index::parse(reg).map_err(|_| Error::InvalidRegister(reg.to_string()))?;
            return Ok(Operand::with_form(Value::parse(base.trim())?, Form::Indexed(index)));
        }

        Ok(Operand::with_form(Value::parse(text)?, Form::Direct))
    }

    fn with_form(value: Value, form: Form) -> Operand {
        match value {
            Value::Literal(v) => Operand::Known(form.mode_for(v), v),
            Value::Symbol(name) => Operand::Symbol(name, form),
        }
    }
}

fn expect_index(reg: &str, want: Index) -> Result<(), Error> {
    match Index::parse(reg) {
        Ok(index) if index == want => Ok(()),
        _ => Err(Error::InvalidRegister(reg.to_string())),
    }
}
