// Card domain model
use super::binding::Binding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grid cell position, span and resize bounds of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
}

impl Geometry {
    pub fn new(x: u32, y: u32, width: u32, height: u32, min_width: u32, min_height: u32) -> Self {
        Self {
            x,
            y,
            width: width.max(1),
            height: height.max(1),
            min_width,
            min_height,
        }
    }

    /// Move/resize, keeping the span within its lower bounds.
    pub fn place(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.x = x;
        self.y = y;
        self.width = width.max(self.min_width).max(1);
        self.height = height.max(self.min_height).max(1);
    }
}

/// Opaque per-card metadata the layout store keeps alongside geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub card_id: String,
    pub geometry: Geometry,
    pub visible: bool,
    pub meta: CardMeta,
    /// Registry key. Only ever taken from the built-in schema.
    pub component: String,
    /// Only ever taken from the built-in schema.
    pub props: BTreeMap<String, Binding>,
}

impl Card {
    pub fn new(card_id: &str, component: &str, geometry: Geometry) -> Self {
        Self {
            card_id: card_id.to_string(),
            geometry,
            visible: true,
            meta: CardMeta::default(),
            component: component.to_string(),
            props: BTreeMap::new(),
        }
    }

    pub fn prop(mut self, name: &str, binding: Binding) -> Self {
        self.props.insert(name.to_string(), binding);
        self
    }

    /// Copy geometry, visibility and metadata from a saved entry.
    pub fn apply_saved(&mut self, saved: &SavedCard) {
        self.geometry.x = saved.x;
        self.geometry.y = saved.y;
        self.geometry.width = saved.width.max(1);
        self.geometry.height = saved.height.max(1);
        self.visible = saved.visible;
        self.meta = saved.meta.clone();
    }

    pub fn to_saved(&self) -> SavedCard {
        SavedCard {
            card_id: self.card_id.clone(),
            x: self.geometry.x,
            y: self.geometry.y,
            width: self.geometry.width,
            height: self.geometry.height,
            visible: self.visible,
            meta: self.meta.clone(),
        }
    }

    pub fn to_grid_item(&self) -> GridItem {
        GridItem {
            key: self.card_id.clone(),
            x: self.geometry.x,
            y: self.geometry.y,
            w: self.geometry.width,
            h: self.geometry.height,
            min_w: self.geometry.min_width,
            min_h: self.geometry.min_height,
        }
    }
}

/// One entry of a persisted layout. Carries no component or bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCard {
    pub card_id: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(flatten)]
    pub meta: CardMeta,
}

fn default_visible() -> bool {
    true
}

/// Layout item exchanged with the responsive grid front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    pub key: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(default)]
    pub min_w: u32,
    #[serde(default)]
    pub min_h: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_saved_card_wire_shape() {
        let mut card = Card::new("total-sales", "MetricCard", Geometry::new(0, 0, 2, 2, 2, 2))
            .prop("title", Binding::literal(json!("Total Sales")));
        card.meta.rotation = Some(90);

        let value = serde_json::to_value(card.to_saved()).unwrap();
        assert_eq!(
            value,
            json!({
                "card_id": "total-sales",
                "x": 0,
                "y": 0,
                "width": 2,
                "height": 2,
                "visible": true,
                "rotation": 90
            })
        );
    }

    #[test]
    fn test_saved_card_defaults_visible_and_keeps_config() {
        let saved: SavedCard = serde_json::from_value(json!({
            "card_id": "sales-chart",
            "x": 1,
            "y": 2,
            "width": 6,
            "height": 8,
            "config": {"stacked": true}
        }))
        .unwrap();

        assert!(saved.visible);
        assert_eq!(saved.meta.config, Some(json!({"stacked": true})));
    }

    #[test]
    fn test_place_respects_min_bounds() {
        let mut geometry = Geometry::new(0, 0, 6, 8, 4, 6);
        geometry.place(3, 1, 1, 2);
        assert_eq!((geometry.x, geometry.y, geometry.width, geometry.height), (3, 1, 4, 6));
    }

    #[test]
    fn test_grid_item_uses_camel_case_bounds() {
        let card = Card::new("top-items", "TopItemsTable", Geometry::new(6, 18, 6, 8, 4, 6));
        let value = serde_json::to_value(card.to_grid_item()).unwrap();
        assert_eq!(
            value,
            json!({"key": "top-items", "x": 6, "y": 18, "w": 6, "h": 8, "minW": 4, "minH": 6})
        );
    }
}
