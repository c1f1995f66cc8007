use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported revisions of the instruction prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptVersion {
    #[serde(rename = "v0.1")]
    V0_1,
}

pub const CURRENT_VERSION: PromptVersion = PromptVersion::V0_1;

impl PromptVersion {
    pub const ALL: &'static [PromptVersion] = &[PromptVersion::V0_1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V0_1 => "v0.1",
        }
    }

    pub fn valid_values() -> Vec<&'static str> {
        Self::ALL.iter().map(PromptVersion::as_str).collect()
    }
}

impl fmt::Display for PromptVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|version| version.as_str() == normalized)
            .ok_or(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_and_whitespace_insensitively() {
        assert_eq!(" V0.1\n".parse::<PromptVersion>(), Ok(PromptVersion::V0_1));
        assert_eq!("v0.2".parse::<PromptVersion>(), Err("v0.2".to_string()));
    }

    #[test]
    fn valid_values_lists_every_version() {
        assert_eq!(PromptVersion::valid_values(), vec!["v0.1"]);
        assert_eq!(CURRENT_VERSION.to_string(), "v0.1");
    }
}
