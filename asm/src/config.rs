use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Assembly settings, loadable from YAML:
///
/// ```yaml
/// origin: 0xF000
/// symbols:
///   WSYNC: 0x02
///   COLUBK: 0x09
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Initial value of the location counter.
    pub origin: u16,
    /// Constants defined before the first line is read.
    pub symbols: IndexMap<String, u16>,
}

impl Config {
    pub fn load(path: &str) -> Result<Config, Error> {
        let text =
            std::fs::read_to_string(path).map_err(|e| Error::FileRead(path.to_string(), e))?;
        Config::from_yaml(&text).map_err(|e| Error::ConfigParse(path.to_string(), e))
    }

    pub fn from_yaml(text: &str) -> Result<Config, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
