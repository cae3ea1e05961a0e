use crate::error::SqlArchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the model is asked to do with the SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Rewrite for performance within the same dialect
    Optimize,
    /// Translate from the source dialect to a target dialect
    Convert,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimize => f.write_str("Optimize"),
            Self::Convert => f.write_str("Convert"),
        }
    }
}

impl FromStr for Mode {
    type Err = SqlArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "optimize" | "optimise" => Ok(Self::Optimize),
            "convert" | "translate" => Ok(Self::Convert),
            _ => Err(SqlArchError::invalid_input_field(
                format!("Unknown mode '{}'. Expected 'optimize' or 'convert'", s),
                "mode",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("Optimize".parse::<Mode>().unwrap(), Mode::Optimize);
        assert_eq!("convert".parse::<Mode>().unwrap(), Mode::Convert);
        assert!("format".parse::<Mode>().is_err());
    }
}
