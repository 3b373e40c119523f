//! Numeric value coercion.
//!
//! Value tokens stay integers when the source text is a whole number with
//! no decimal point or exponent, so `40` survives as `40` rather than
//! `40.0` in the output JSON. Unparsable tokens coerce to `None` and the
//! caller decides the skip policy.

use std::fmt;

/// A parameter cell value.
#[derive(Debug, Clone, Copy)]
pub enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    /// Parse a raw token. Non-finite results (`inf`, `nan`) are rejected
    /// along with anything that is not a number.
    pub fn parse(tok: &str) -> Option<Num> {
        if !tok.contains(['.', 'e', 'E']) {
            if let Ok(n) = tok.parse::<i64>() {
                return Some(Num::Int(n));
            }
        }
        tok.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Num::Float)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(f) => f,
        }
    }
}

/// Numeric equality across representations: `0` equals `0.0`. Used for
/// default elision, where the declared default and a cell value may be
/// spelled differently.
impl PartialEq for Num {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Int(n) => write!(f, "{}", n),
            Num::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<Num> for serde_json::Value {
    fn from(n: Num) -> Self {
        match n {
            Num::Int(i) => serde_json::Value::from(i),
            Num::Float(f) => serde_json::Value::from(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_stay_integral() {
        assert_eq!(Num::parse("40"), Some(Num::Int(40)));
        assert_eq!(Num::parse("-3"), Some(Num::Int(-3)));
    }

    #[test]
    fn decimals_and_exponents_become_floats() {
        assert_eq!(Num::parse("31.536"), Some(Num::Float(31.536)));
        assert_eq!(Num::parse("1e3"), Some(Num::Float(1000.0)));
    }

    #[test]
    fn garbage_and_non_finite_tokens_are_rejected() {
        assert_eq!(Num::parse("E01"), None);
        assert_eq!(Num::parse("inf"), None);
        assert_eq!(Num::parse("nan"), None);
        assert_eq!(Num::parse(""), None);
    }

    #[test]
    fn equality_crosses_representations() {
        assert_eq!(Num::Int(0), Num::Float(0.0));
        assert_ne!(Num::Int(1), Num::Float(1.5));
    }
}
