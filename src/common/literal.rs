use crate::error::PlanError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fluent(String);

impl Fluent {
    pub fn new(symbol: impl Into<String>) -> Self {
        Fluent(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Fluent {
    fn from(symbol: &str) -> Self {
        Fluent(symbol.to_string())
    }
}

impl From<String> for Fluent {
    fn from(symbol: String) -> Self {
        Fluent(symbol)
    }
}

impl fmt::Display for Fluent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub fluent: Fluent,
    pub is_pos: bool,
}

impl Literal {
    pub fn new(fluent: impl Into<Fluent>, is_pos: bool) -> Self {
        Literal {
            fluent: fluent.into(),
            is_pos,
        }
    }

    pub fn pos(fluent: impl Into<Fluent>) -> Self {
        Self::new(fluent, true)
    }

    pub fn neg(fluent: impl Into<Fluent>) -> Self {
        Self::new(fluent, false)
    }

    pub fn negate(&self) -> Self {
        Literal {
            fluent: self.fluent.clone(),
            is_pos: !self.is_pos,
        }
    }

    pub fn is_negation_of(&self, other: &Literal) -> bool {
        self.fluent == other.fluent && self.is_pos != other.is_pos
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_pos {
            write!(f, "{}", self.fluent)
        } else {
            write!(f, "~{}", self.fluent)
        }
    }
}

impl FromStr for Literal {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (is_pos, symbol) = match trimmed.strip_prefix('~') {
            Some(rest) => (false, rest.trim()),
            None => (true, trimmed),
        };
        if symbol.is_empty() || symbol.starts_with('~') {
            return Err(PlanError::InvalidLiteral(s.to_string()));
        }
        Ok(Literal::new(symbol, is_pos))
    }
}
