// Binding resolver - templates plus snapshot to concrete props
use crate::application::registry::resolve_icon;
use crate::domain::binding::{Binding, PropValue};
use crate::domain::snapshot::DashboardSnapshot;
use serde_json::Value;
use std::collections::BTreeMap;

/// Resolve every prop of a card template. Never fails.
///
/// Unknown icon keys are left out so the widget falls back to no icon.
pub fn resolve_props(
    template: &BTreeMap<String, Binding>,
    snapshot: &DashboardSnapshot,
) -> BTreeMap<String, PropValue> {
    template
        .iter()
        .filter_map(|(name, binding)| {
            resolve_binding(binding, snapshot).map(|value| (name.clone(), value))
        })
        .collect()
}

pub fn resolve_binding(binding: &Binding, snapshot: &DashboardSnapshot) -> Option<PropValue> {
    match binding {
        Binding::Literal { value } => Some(PropValue::Value(value.clone())),
        Binding::Icon { key } => resolve_icon(key).map(PropValue::Icon),
        Binding::Path { segments, default } => {
            let value = match snapshot.lookup(segments.as_slice()) {
                Some(Value::Null) | None => default.value(),
                Some(found) => found.clone(),
            };
            Some(PropValue::Value(value))
        }
    }
}
