//! Solver strategy selector

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Prompting strategy used to obtain candidate answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Chain-of-thought: step-by-step reasoning ending in `#### <answer>`
    #[default]
    Cot,
    /// Program-aided: generated code assigning the result to `answer`
    Pal,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Cot => "cot",
            Strategy::Pal => "pal",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cot" | "chain-of-thought" => Ok(Strategy::Cot),
            "pal" | "program-aided" => Ok(Strategy::Pal),
            other => Err(DomainError::InvalidStrategy(format!(
                "unknown strategy '{}'. Valid: cot, pal",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy() {
        assert_eq!("cot".parse::<Strategy>().ok(), Some(Strategy::Cot));
        assert_eq!("PAL".parse::<Strategy>().ok(), Some(Strategy::Pal));
        assert_eq!(
            "chain-of-thought".parse::<Strategy>().ok(),
            Some(Strategy::Cot)
        );
        assert!("tree".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_default_is_cot() {
        assert_eq!(Strategy::default(), Strategy::Cot);
    }

    #[test]
    fn test_display_roundtrip() {
        for s in [Strategy::Cot, Strategy::Pal] {
            assert_eq!(s.to_string().parse::<Strategy>().ok(), Some(s));
        }
    }
}
