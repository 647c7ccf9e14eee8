use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Defined by `name:` in the source.
    Label,
    /// Predefined before assembly starts.
    Constant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub kind: Kind,
    pub value: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Symbols(IndexMap<String, Symbol>);

impl Symbols {
    pub fn with_constants<'a>(constants: impl IntoIterator<Item = (&'a String, &'a u16)>) -> Self {
        Symbols(
            constants
                .into_iter()
                .map(|(name, &value)| {
                    let symbol = Symbol { kind: Kind::Constant, value, line: None };
                    (name.clone(), symbol)
                })
                .collect(),
        )
    }

    pub fn define(&mut self, name: &str, line: usize, value: u16) -> Result<(), Error> {
        if self.0.contains_key(name) {
            return Err(Error::DuplicateLabel(name.to_string()));
        }
        let symbol = Symbol { kind: Kind::Label, value, line: Some(line) };
        self.0.insert(name.to_string(), symbol);
        Ok(())
    }

    pub fn get_val(&self, name: &str) -> Option<u16> {
        self.0.get(name).map(|sym| sym.value)
    }

    /// Value of a predefined constant; source labels are bound later.
    pub fn get_const(&self, name: &str) -> Option<u16> {
        self.0
            .get(name)
            .filter(|sym| sym.kind == Kind::Constant)
            .map(|sym| sym.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Symbol)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
