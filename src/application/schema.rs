// Built-in dashboard schema - identity, order, bindings and default geometry
use crate::domain::binding::Binding;
use crate::domain::card::{Card, Geometry};
use serde_json::json;

const TILE_WIDTH: u32 = 2;
const TILE_HEIGHT: u32 = 2;
const PANEL_WIDTH: u32 = 6;
const PANEL_HEIGHT: u32 = 8;
const PANEL_MIN_WIDTH: u32 = 4;
const PANEL_MIN_HEIGHT: u32 = 6;

/// (card_id, title, metric field, icon key)
const METRIC_TILES: [(&str, &str, &str, &str); 6] = [
    ("total-sales", "Total Sales", "total_sales", "sales"),
    ("total-purchases", "Total Purchases", "total_purchases", "purchases"),
    ("total-customers", "Customers", "total_customers", "customers"),
    ("total-vendors", "Vendors", "total_vendors", "vendors"),
    ("total-items", "Items", "total_items", "items"),
    ("low-stock-count", "Low Stock", "low_stock_count", "alert"),
];

/// The canonical card list, in display order.
pub fn default_cards() -> Vec<Card> {
    let mut cards: Vec<Card> = METRIC_TILES
        .iter()
        .enumerate()
        .map(|(i, (id, title, field, icon))| {
            let x = i as u32 * TILE_WIDTH;
            Card::new(
                id,
                "MetricCard",
                Geometry::new(x, 0, TILE_WIDTH, TILE_HEIGHT, TILE_WIDTH, TILE_HEIGHT),
            )
            .prop("title", Binding::literal(json!(title)))
            .prop("value", Binding::number(&format!("metrics.{}", field)))
            .prop("icon", Binding::icon(icon))
        })
        .collect();

    cards.push(panel("sales-chart", "SalesBarChart", "Sales", "data", "charts.sales", 0, 2));
    cards.push(panel(
        "purchases-chart",
        "PurchaseAreaChart",
        "Purchases",
        "data",
        "charts.purchases",
        PANEL_WIDTH,
        2,
    ));
    cards.push(panel(
        "best-customers",
        "BestCustomersTable",
        "Best Customers",
        "rows",
        "tables.best_customers",
        0,
        10,
    ));
    cards.push(panel(
        "stock-alerts",
        "StockAlertTable",
        "Stock Alerts",
        "rows",
        "tables.stock_alerts",
        PANEL_WIDTH,
        10,
    ));
    cards.push(panel(
        "expiring-items",
        "ExpiringItemsTable",
        "Expiring Items",
        "rows",
        "tables.expiring_items",
        0,
        18,
    ));
    cards.push(panel(
        "top-items",
        "TopItemsTable",
        "Top Items",
        "rows",
        "tables.top_items",
        PANEL_WIDTH,
        18,
    ));

    cards
}

fn panel(id: &str, component: &str, title: &str, prop: &str, path: &str, x: u32, y: u32) -> Card {
    Card::new(
        id,
        component,
        Geometry::new(x, y, PANEL_WIDTH, PANEL_HEIGHT, PANEL_MIN_WIDTH, PANEL_MIN_HEIGHT),
    )
    .prop("title", Binding::literal(json!(title)))
    .prop(prop, Binding::list(path))
}
