use arch::Mnemonic;

use crate::error::Error;
use crate::operand::{is_ident, is_numeric, parse_number, Operand, Value};

// ----------------------------------------------------------------------------
// Line

/// One physical source line: `[label:] [mnemonic [operand]] [; comment]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    Label(String),
    Labeled(String, Stmt),
    Stmt(Stmt),
}

impl Line {
    pub fn parse(raw: &str) -> Result<Line, Error> {
        let code = strip_comment(raw).trim();
        if code.is_empty() {
            return Ok(Line::Blank);
        }

        // main: ...
        if let Some((label, rest)) = code.split_once(':') {
            let label = label.trim();
            if !is_ident(label) {
                return Err(Error::InvalidLabel(label.to_string()));
            }
            return Ok(match Stmt::parse(rest)? {
                Some(stmt) => Line::Labeled(label.to_string(), stmt),
                None => Line::Label(label.to_string()),
            });
        }

        Ok(match Stmt::parse(code)? {
            Some(stmt) => Line::Stmt(stmt),
            None => Line::Blank,
        })
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Line::Label(label) | Line::Labeled(label, _) => Some(label),
            _ => None,
        }
    }

    pub fn stmt(&self) -> Option<&Stmt> {
        match self {
            Line::Labeled(_, stmt) | Line::Stmt(stmt) => Some(stmt),
            _ => None,
        }
    }
}

fn strip_comment(raw: &str) -> &str {
    match raw.find(';') {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Inst(Mnemonic, Operand),
    Org(u16),
    Byte(u8),
    Word(Value),
}

impl Stmt {
    pub fn parse(code: &str) -> Result<Option<Stmt>, Error> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }
        let (head, operand) = match code.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (code, ""),
        };

        let stmt = match head.to_ascii_lowercase().as_str() {
            // Target selection line of DASM-style sources, nothing to emit.
            ".processor" | "processor" => {
                if operand.is_empty() || operand.contains(char::is_whitespace) {
                    return Err(Error::InvalidOperandSyntax(operand.to_string()));
                }
                return Ok(None);
            }
            ".org" | "org" => Stmt::Org(literal(operand)?),
            ".byte" | "byte" => {
                let value = literal(operand)?;
                let value =
                    u8::try_from(value).map_err(|_| Error::ValueOutOfRange(operand.to_string(), 8))?;
                Stmt::Byte(value)
            }
            ".word" | "word" => Stmt::Word(Value::parse(operand)?),
            _ => {
                let mnemonic = Mnemonic::parse(head)
                    .map_err(|_| Error::UnknownMnemonic(head.to_ascii_uppercase()))?;
                let operand = if mnemonic.accumulator() && operand.eq_ignore_ascii_case("a") {
                    Operand::Implied
                } else {
                    Operand::parse(operand)?
                };
                Stmt::Inst(mnemonic, operand)
            }
        };
        Ok(Some(stmt))
    }
}

fn literal(s: &str) -> Result<u16, Error> {
    if !is_numeric(s) {
        return Err(Error::InvalidOperandSyntax(s.to_string()));
    }
    parse_number(s)
}
