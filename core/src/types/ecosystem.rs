use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Ord, PartialOrd, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
}

impl Ecosystem {
    pub const ALL: &'static [Ecosystem] = &[Ecosystem::Npm];

    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ecosystem::Npm => write!(f, "npm"),
        }
    }
}

impl std::str::FromStr for Ecosystem {
    type Err = crate::AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(Ecosystem::Npm),
            other => Err(crate::AuditError::UnknownEcosystem {
                ecosystem: other.to_string(),
                supported: Self::supported(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ecosystem() {
        assert_eq!("NPM".parse::<Ecosystem>().unwrap(), Ecosystem::Npm);
    }

    #[test]
    fn test_parse_unknown_ecosystem() {
        let err = "pip".parse::<Ecosystem>().unwrap_err();
        assert!(err.to_string().contains("Supported ecosystems: npm"));
    }
}
