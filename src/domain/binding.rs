// Binding templates and resolved props
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a card prop is computed from the runtime snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Binding {
    Literal { value: Value },
    Icon { key: String },
    Path {
        segments: Vec<String>,
        #[serde(default)]
        default: PathDefault,
    },
}

impl Binding {
    pub fn literal(value: Value) -> Self {
        Binding::Literal { value }
    }

    pub fn icon(key: &str) -> Self {
        Binding::Icon {
            key: key.to_string(),
        }
    }

    /// Numeric leaf, `0` when absent.
    pub fn number(path: &str) -> Self {
        Binding::Path {
            segments: split_path(path),
            default: PathDefault::Number,
        }
    }

    /// Collection leaf, `[]` when absent.
    pub fn list(path: &str) -> Self {
        Binding::Path {
            segments: split_path(path),
            default: PathDefault::List,
        }
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('.')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fallback shape for a path whose leaf is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathDefault {
    Number,
    List,
    #[default]
    Null,
}

impl PathDefault {
    pub fn value(self) -> Value {
        match self {
            PathDefault::Number => Value::from(0),
            PathDefault::List => Value::Array(Vec::new()),
            PathDefault::Null => Value::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Sales,
    Purchases,
    Customers,
    Vendors,
    Items,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PropValue {
    Value(Value),
    Icon(Icon),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_binding_tagged_form() {
        let binding: Binding = serde_json::from_value(json!({
            "kind": "path",
            "segments": ["metrics", "total_sales"],
            "default": "number"
        }))
        .unwrap();
        assert_eq!(binding, Binding::number("metrics.total_sales"));

        let literal: Binding =
            serde_json::from_value(json!({"kind": "literal", "value": "data.not.a.path"})).unwrap();
        assert_eq!(literal, Binding::literal(json!("data.not.a.path")));
    }

    #[test]
    fn test_split_path_ignores_empty_segments() {
        assert_eq!(split_path("tables..top_items."), vec!["tables", "top_items"]);
    }
}
