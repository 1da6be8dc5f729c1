use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Name of a declared model type.
///
/// The model name doubles as the collection name its documents are written
/// to, so it follows collection naming rules: non-empty, no whitespace, no
/// `$` or `.`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelName(String);

impl ModelName {
    /// Create a model name, checking collection naming rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidModelName(name, "must not be empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidModelName(name, "must not contain whitespace"));
        }
        if name.contains(['$', '.']) {
            return Err(TypeError::InvalidModelName(name, "must not contain '$' or '.'"));
        }
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ModelName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ModelName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelName> for String {
    fn from(name: ModelName) -> Self {
        name.0
    }
}

impl PartialEq<str> for ModelName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModelName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Debug for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelName({})", self.0)
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        let name = ModelName::new("Stand").unwrap();
        assert_eq!(name.as_str(), "Stand");
        assert_eq!(name, "Stand");
    }

    #[test]
    fn rejects_empty() {
        assert!(ModelName::new("").is_err());
    }

    #[test]
    fn rejects_whitespace_and_reserved_chars() {
        assert!(ModelName::new("Fruit Stand").is_err());
        assert!(ModelName::new("$cmd").is_err());
        assert!(ModelName::new("system.users").is_err());
    }

    #[test]
    fn serde_rejects_invalid_names() {
        let ok: ModelName = serde_json::from_str("\"Market\"").unwrap();
        assert_eq!(ok, "Market");
        assert!(serde_json::from_str::<ModelName>("\"\"").is_err());
    }

    #[test]
    fn display_is_bare_name() {
        let name: ModelName = "Fruit".parse().unwrap();
        assert_eq!(name.to_string(), "Fruit");
    }
}
