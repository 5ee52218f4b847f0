// Application state for HTTP handlers
use crate::application::controller::{load, persist_initial, ControllerError, DashboardController};
use crate::application::grid::Breakpoint;
use crate::application::registry::CardRegistry;
use crate::application::services::{DashboardDataService, LayoutStore};
use crate::infrastructure::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct AppState {
    /// Single owner of the card list; every event goes through this lock.
    pub controller: Mutex<DashboardController>,
    pub registry: CardRegistry,
    pub breakpoints: Vec<Breakpoint>,
    pub data: Arc<dyn DashboardDataService>,
    pub store: Arc<dyn LayoutStore>,
    pub session: Arc<Session>,
}

impl AppState {
    /// Fetch data and layout without holding the controller lock, then
    /// install them. Refused while editing or while another load runs.
    pub async fn mount(&self) -> Result<(), ControllerError> {
        self.controller.lock().await.begin_load()?;

        let outcome = load(self.data.as_ref(), self.store.as_ref()).await;
        let initial = self.controller.lock().await.apply_load(outcome);
        if let Some(initial) = initial {
            persist_initial(self.store.as_ref(), &initial).await;
        }
        Ok(())
    }
}
