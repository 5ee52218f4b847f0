// Grid projection - card geometry to per-breakpoint grid layouts
use crate::domain::card::{Card, GridItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub name: String,
    pub min_width: u32,
    pub cols: u32,
}

impl Breakpoint {
    pub fn new(name: &str, min_width: u32, cols: u32) -> Self {
        Self {
            name: name.to_string(),
            min_width,
            cols: cols.max(1),
        }
    }
}

pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new("lg", 1200, 12),
        Breakpoint::new("md", 996, 10),
        Breakpoint::new("sm", 768, 6),
        Breakpoint::new("xs", 480, 4),
        Breakpoint::new("xxs", 0, 2),
    ]
}

/// The breakpoint whose layout is stored as card geometry.
pub fn primary_breakpoint(breakpoints: &[Breakpoint]) -> Option<&Breakpoint> {
    breakpoints.iter().max_by_key(|bp| (bp.cols, bp.min_width))
}

pub fn project_layout<'a, I>(
    cards: I,
    breakpoints: &[Breakpoint],
) -> BTreeMap<String, Vec<GridItem>>
where
    I: IntoIterator<Item = &'a Card>,
{
    let items: Vec<GridItem> = cards.into_iter().map(Card::to_grid_item).collect();
    let primary = primary_breakpoint(breakpoints).map(|bp| bp.name.clone());

    breakpoints
        .iter()
        .map(|bp| {
            let layout = if primary.as_deref() == Some(bp.name.as_str()) {
                items.clone()
            } else {
                items.iter().map(|item| fit_to_columns(item, bp.cols)).collect()
            };
            (bp.name.clone(), layout)
        })
        .collect()
}

fn fit_to_columns(item: &GridItem, cols: u32) -> GridItem {
    let cols = cols.max(1);
    let w = item.w.min(cols).max(1);
    let x = item.x.min(cols - w);
    GridItem {
        key: item.key.clone(),
        x,
        y: item.y,
        w,
        h: item.h,
        min_w: item.min_w.min(w),
        min_h: item.min_h,
    }
}
