// Card registry - component names to widget variants
use crate::domain::binding::Icon;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableKind {
    BestCustomers,
    StockAlerts,
    ExpiringItems,
    TopItems,
}

/// Closed set of widgets a card can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "table", rename_all = "kebab-case")]
pub enum CardComponent {
    MetricTile,
    BarChart,
    AreaChart,
    DataTable(TableKind),
}

#[derive(Debug, Clone)]
pub struct CardRegistry {
    components: HashMap<&'static str, CardComponent>,
}

impl CardRegistry {
    pub fn builtin() -> Self {
        let components = HashMap::from([
            ("MetricCard", CardComponent::MetricTile),
            ("SalesBarChart", CardComponent::BarChart),
            ("PurchaseAreaChart", CardComponent::AreaChart),
            ("BestCustomersTable", CardComponent::DataTable(TableKind::BestCustomers)),
            ("StockAlertTable", CardComponent::DataTable(TableKind::StockAlerts)),
            ("ExpiringItemsTable", CardComponent::DataTable(TableKind::ExpiringItems)),
            ("TopItemsTable", CardComponent::DataTable(TableKind::TopItems)),
        ]);
        Self { components }
    }

    /// `None` for names this build does not know; callers skip the card.
    pub fn resolve(&self, name: &str) -> Option<CardComponent> {
        self.components.get(name).copied()
    }
}

pub fn resolve_icon(key: &str) -> Option<Icon> {
    match key {
        "sales" => Some(Icon::Sales),
        "purchases" => Some(Icon::Purchases),
        "customers" => Some(Icon::Customers),
        "vendors" => Some(Icon::Vendors),
        "items" => Some(Icon::Items),
        "alert" => Some(Icon::Alert),
        _ => None,
    }
}
