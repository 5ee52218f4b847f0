// Runtime dashboard data snapshot
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metrics, chart series and table rows fetched for the current user.
///
/// The backend owns the shape; the layout engine only traverses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardSnapshot(Value);

impl DashboardSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    /// Walk objects by key and arrays by index. `None` on any miss.
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Value> {
        segments.iter().try_fold(&self.0, |current, segment| {
            let segment = segment.as_ref();
            match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
