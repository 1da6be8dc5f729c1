use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validation rule attached to a field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRule {
    /// The field must be set and not blank (null, empty or whitespace-only
    /// string, empty array or object).
    Presence,
    /// String length in characters (or array length) must be within bounds.
    /// Absent values are left to `Presence`.
    Length {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
    },
}

impl FieldRule {
    /// Check `value` against this rule; returns the failure message, if any.
    pub fn check(&self, value: Option<&Value>) -> Option<String> {
        match self {
            Self::Presence => {
                if value.map_or(true, is_blank) {
                    Some("can't be blank".into())
                } else {
                    None
                }
            }
            Self::Length { min, max } => {
                let len = match value? {
                    Value::String(s) => s.chars().count(),
                    Value::Array(items) => items.len(),
                    _ => return None,
                };
                if let Some(min) = min.filter(|min| len < *min) {
                    return Some(format!("is too short (minimum is {min})"));
                }
                if let Some(max) = max.filter(|max| len > *max) {
                    return Some(format!("is too long (maximum is {max})"));
                }
                None
            }
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// A declared field and its validation rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<FieldRule>,
}

impl FieldDef {
    /// A field with no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// A field that must be present.
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name).rule(FieldRule::Presence)
    }

    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// A single failed field rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn presence_rejects_missing_and_blank() {
        let rule = FieldRule::Presence;
        assert!(rule.check(None).is_some());
        assert!(rule.check(Some(&Value::Null)).is_some());
        assert!(rule.check(Some(&json!("   "))).is_some());
        assert!(rule.check(Some(&json!([]))).is_some());
        assert!(rule.check(Some(&json!({}))).is_some());
    }

    #[test]
    fn presence_accepts_values() {
        let rule = FieldRule::Presence;
        assert!(rule.check(Some(&json!("Stand 1"))).is_none());
        assert!(rule.check(Some(&json!(0))).is_none());
        assert!(rule.check(Some(&json!(false))).is_none());
    }

    #[test]
    fn length_bounds() {
        let rule = FieldRule::Length {
            min: Some(2),
            max: Some(4),
        };
        assert_eq!(
            rule.check(Some(&json!("a"))).as_deref(),
            Some("is too short (minimum is 2)")
        );
        assert!(rule.check(Some(&json!("abc"))).is_none());
        assert_eq!(
            rule.check(Some(&json!("abcde"))).as_deref(),
            Some("is too long (maximum is 4)")
        );
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        let rule = FieldRule::Length {
            min: None,
            max: Some(3),
        };
        assert!(rule.check(Some(&json!("äöü"))).is_none());
    }

    #[test]
    fn length_ignores_absent_and_non_string_values() {
        let rule = FieldRule::Length {
            min: Some(1),
            max: None,
        };
        assert!(rule.check(None).is_none());
        assert!(rule.check(Some(&json!(12))).is_none());
    }

    #[test]
    fn rules_from_json() {
        let field: FieldDef =
            serde_json::from_str(r#"{"name":"name","rules":["presence",{"length":{"max":20}}]}"#)
                .unwrap();
        assert_eq!(
            field,
            FieldDef::required("name").rule(FieldRule::Length {
                min: None,
                max: Some(20)
            })
        );
    }
}
