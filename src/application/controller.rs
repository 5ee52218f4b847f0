// Dashboard controller - load/merge, view/edit state machine, save and cancel
use crate::application::grid::{project_layout, Breakpoint};
use crate::application::registry::{CardComponent, CardRegistry};
use crate::application::resolver::resolve_props;
use crate::application::services::{DashboardDataService, LayoutStore};
use crate::domain::binding::PropValue;
use crate::domain::card::{Card, Geometry, GridItem, SavedCard};
use crate::domain::snapshot::DashboardSnapshot;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardState {
    Loading,
    Viewing,
    Editing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("dashboard is not in view mode")]
    NotViewing,
    #[error("dashboard is not in edit mode")]
    NotEditing,
    #[error("unknown card: {0}")]
    UnknownCard(String),
    #[error("a layout save is already in flight")]
    SaveInFlight,
    #[error("a dashboard load is already in flight")]
    LoadInFlight,
    #[error("failed to save layout: {0}")]
    SaveFailed(String),
}

/// Results of the two mount-time fetches, kept independent.
pub struct LoadOutcome {
    pub snapshot: anyhow::Result<DashboardSnapshot>,
    pub layout: anyhow::Result<Option<Vec<SavedCard>>>,
}

/// Fetch the data snapshot and the saved layout concurrently.
pub async fn load(data: &dyn DashboardDataService, store: &dyn LayoutStore) -> LoadOutcome {
    let (snapshot, layout) = tokio::join!(data.fetch(), store.load());
    LoadOutcome { snapshot, layout }
}

/// Persist the schema-derived layout for a user with no saved layout.
pub async fn persist_initial(store: &dyn LayoutStore, layout: &[SavedCard]) {
    match store.save(layout).await {
        Ok(()) => tracing::info!(cards = layout.len(), "persisted initial dashboard layout"),
        Err(e) => tracing::warn!(error = %e, "failed to persist initial dashboard layout"),
    }
}

/// Schema cards in schema order, with geometry, visibility and metadata
/// taken from `saved` where a matching `card_id` exists.
///
/// Saved entries unknown to the schema are dropped. For duplicate ids the
/// last entry wins.
pub fn merge_layout(schema: &[Card], saved: &[SavedCard]) -> Vec<Card> {
    let by_id: HashMap<&str, &SavedCard> =
        saved.iter().map(|s| (s.card_id.as_str(), s)).collect();

    let known: HashSet<&str> = schema.iter().map(|c| c.card_id.as_str()).collect();
    for orphan in by_id.keys().filter(|id| !known.contains(*id)) {
        tracing::debug!(card_id = %orphan, "dropping saved layout entry with no schema card");
    }

    schema
        .iter()
        .map(|card| {
            let mut card = card.clone();
            if let Some(saved) = by_id.get(card.card_id.as_str()) {
                card.apply_saved(saved);
            }
            card
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCard {
    pub card_id: String,
    pub component: CardComponent,
    pub props: BTreeMap<String, PropValue>,
    pub geometry: Geometry,
    pub visible: bool,
    /// Hidden card shown at reduced opacity while editing
    pub dimmed: bool,
}

/// Identifies the edit session a save was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket(u64);

#[derive(Debug)]
pub struct PendingSave {
    pub ticket: SaveTicket,
    pub layout: Vec<SavedCard>,
}

#[derive(Debug, Clone)]
enum Mode {
    Loading,
    Viewing,
    Editing { session: u64, pre_edit: Vec<Card> },
}

pub struct DashboardController {
    schema: Vec<Card>,
    cards: Vec<Card>,
    snapshot: DashboardSnapshot,
    mode: Mode,
    edit_sessions: u64,
    /// Outstanding save, kept across cancel and reload until it completes.
    save_in_flight: Option<SaveTicket>,
    load_in_flight: bool,
    last_error: Option<String>,
}

impl DashboardController {
    pub fn new(schema: Vec<Card>) -> Self {
        Self {
            cards: schema.clone(),
            schema,
            snapshot: DashboardSnapshot::empty(),
            mode: Mode::Loading,
            edit_sessions: 0,
            save_in_flight: None,
            load_in_flight: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> DashboardState {
        match self.mode {
            Mode::Loading => DashboardState::Loading,
            Mode::Viewing => DashboardState::Viewing,
            Mode::Editing { .. } => DashboardState::Editing,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.mode, Mode::Editing { .. })
    }

    pub fn is_saving(&self) -> bool {
        self.save_in_flight.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.load_in_flight
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[cfg(test)]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn has_data(&self) -> bool {
        !self.snapshot.is_empty()
    }

    /// Claim the single load slot before fetching. Refused while editing
    /// so edits are not overwritten.
    pub fn begin_load(&mut self) -> Result<(), ControllerError> {
        if self.is_editable() {
            return Err(ControllerError::NotViewing);
        }
        if self.load_in_flight {
            return Err(ControllerError::LoadInFlight);
        }
        self.load_in_flight = true;
        Ok(())
    }

    /// Install fetched data and layout, ending in view mode.
    ///
    /// Returns the layout to persist when the user has no saved layout yet.
    pub fn apply_load(&mut self, outcome: LoadOutcome) -> Option<Vec<SavedCard>> {
        self.snapshot = match outcome.snapshot {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "failed to fetch dashboard data, showing empty dashboard"
                );
                DashboardSnapshot::empty()
            }
        };

        let initial = match outcome.layout {
            Ok(Some(saved)) if !saved.is_empty() => {
                self.cards = merge_layout(&self.schema, &saved);
                None
            }
            Ok(_) => {
                self.cards = self.schema.clone();
                Some(self.cards.iter().map(Card::to_saved).collect())
            }
            Err(e) => {
                // Do not overwrite a layout we could not read.
                tracing::warn!(error = %e, "failed to load saved layout, using defaults");
                self.cards = self.schema.clone();
                None
            }
        };

        self.mode = Mode::Viewing;
        self.load_in_flight = false;
        tracing::info!(cards = self.cards.len(), "dashboard loaded");
        initial
    }

    /// Cards the grid shows in the current state.
    pub fn displayed_cards(&self) -> Vec<&Card> {
        match self.mode {
            Mode::Loading => Vec::new(),
            Mode::Viewing => self.cards.iter().filter(|c| c.visible).collect(),
            Mode::Editing { .. } => self.cards.iter().collect(),
        }
    }

    pub fn render(&self, registry: &CardRegistry) -> Vec<RenderedCard> {
        let editing = self.is_editable();
        self.displayed_cards()
            .into_iter()
            .filter_map(|card| {
                let Some(component) = registry.resolve(&card.component) else {
                    tracing::debug!(
                        card_id = %card.card_id,
                        component = %card.component,
                        "no widget registered, skipping card"
                    );
                    return None;
                };
                Some(RenderedCard {
                    card_id: card.card_id.clone(),
                    component,
                    props: resolve_props(&card.props, &self.snapshot),
                    geometry: card.geometry,
                    visible: card.visible,
                    dimmed: editing && !card.visible,
                })
            })
            .collect()
    }

    /// Per-breakpoint grid layouts. While loading, a skeleton built from
    /// the schema defaults.
    pub fn grid_layouts(&self, breakpoints: &[Breakpoint]) -> BTreeMap<String, Vec<GridItem>> {
        match self.mode {
            Mode::Loading => {
                project_layout(self.schema.iter().filter(|c| c.visible), breakpoints)
            }
            _ => project_layout(self.displayed_cards(), breakpoints),
        }
    }

    pub fn enter_edit(&mut self) -> Result<(), ControllerError> {
        if !matches!(self.mode, Mode::Viewing) || self.load_in_flight {
            return Err(ControllerError::NotViewing);
        }
        self.edit_sessions += 1;
        self.mode = Mode::Editing {
            session: self.edit_sessions,
            pre_edit: self.cards.clone(),
        };
        self.last_error = None;
        tracing::info!("entered dashboard edit mode");
        Ok(())
    }

    /// Apply a grid layout-changed callback. Returns the number of cards
    /// updated; outside edit mode the callback is ignored.
    pub fn apply_layout_change(&mut self, items: &[GridItem]) -> usize {
        if !self.is_editable() {
            tracing::debug!("ignoring layout change outside edit mode");
            return 0;
        }

        let mut updated = 0;
        for item in items {
            match self.cards.iter_mut().find(|c| c.card_id == item.key) {
                Some(card) => {
                    card.geometry.place(item.x, item.y, item.w, item.h);
                    updated += 1;
                }
                None => tracing::debug!(key = %item.key, "ignoring unmatched grid item"),
            }
        }
        updated
    }

    /// Flip a card's visibility. Returns the new value.
    pub fn toggle_visibility(&mut self, card_id: &str) -> Result<bool, ControllerError> {
        if !self.is_editable() {
            return Err(ControllerError::NotEditing);
        }
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.card_id == card_id)
            .ok_or_else(|| ControllerError::UnknownCard(card_id.to_string()))?;
        card.visible = !card.visible;
        Ok(card.visible)
    }

    fn edit_session(&self) -> Option<u64> {
        match self.mode {
            Mode::Editing { session, .. } => Some(session),
            _ => None,
        }
    }

    /// Claim the single save slot and build the payload.
    pub fn begin_save(&mut self) -> Result<PendingSave, ControllerError> {
        let session = self.edit_session().ok_or(ControllerError::NotEditing)?;
        if self.save_in_flight.is_some() {
            return Err(ControllerError::SaveInFlight);
        }
        let ticket = SaveTicket(session);
        self.save_in_flight = Some(ticket);
        Ok(PendingSave {
            ticket,
            layout: self.cards.iter().map(Card::to_saved).collect(),
        })
    }

    /// Settle a save. Only the edit session that started it is moved to
    /// view mode or given the error; a stale completion just frees the slot.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        result: anyhow::Result<()>,
    ) -> Result<(), ControllerError> {
        if self.save_in_flight == Some(ticket) {
            self.save_in_flight = None;
        }

        if self.edit_session() != Some(ticket.0) {
            if let Err(e) = &result {
                tracing::warn!(error = %e, "layout save failed after its edit session ended");
            }
            return Ok(());
        }

        match result {
            Ok(()) => {
                self.mode = Mode::Viewing;
                self.last_error = None;
                tracing::info!(cards = self.cards.len(), "dashboard layout saved");
                Ok(())
            }
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::warn!(error = %message, "failed to save dashboard layout");
                self.last_error = Some(message.clone());
                Err(ControllerError::SaveFailed(message))
            }
        }
    }

    /// Drop every edit made since entering edit mode. No-op otherwise.
    pub fn cancel(&mut self) {
        if let Mode::Editing { pre_edit, .. } = &mut self.mode {
            self.cards = std::mem::take(pre_edit);
            self.mode = Mode::Viewing;
            self.last_error = None;
            tracing::info!("cancelled dashboard edit");
        }
    }
}
