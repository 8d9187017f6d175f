pub mod questions;
pub mod quiz;
pub mod responses;

use serde::Deserialize;

/// Integer field that clients send either as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            IntOrString::Int(v) => Some(*v),
            IntOrString::Str(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let n: IntOrString = serde_json::from_str("4").expect("number");
        let s: IntOrString = serde_json::from_str("\" 4 \"").expect("string");
        assert_eq!(n.as_i64(), Some(4));
        assert_eq!(s.as_i64(), Some(4));

        let bad: IntOrString = serde_json::from_str("\"four\"").expect("string");
        assert_eq!(bad.as_i64(), None);
        assert!(serde_json::from_str::<IntOrString>("4.5").is_err());
    }
}
