use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Index registers usable in indexed and indirect operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
pub enum Index {
    X,
    Y,
}

impl Index {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_uppercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown index register: {s}")),
        }
    }
}

#[test]
fn test() {
    assert_eq!(Index::parse("x"), Ok(Index::X));
    assert_eq!(Index::parse("Y"), Ok(Index::Y));
    assert!(Index::parse("a").is_err());
    assert!(Index::parse("xy").is_err());
    assert_eq!(Index::Y.to_string(), "Y");
}
