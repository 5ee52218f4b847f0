// Service traits for the dashboard's external collaborators
use crate::domain::card::SavedCard;
use crate::domain::snapshot::DashboardSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait DashboardDataService: Send + Sync {
    /// Fetch metrics, chart series and table rows for the current user
    async fn fetch(&self) -> anyhow::Result<DashboardSnapshot>;
}

#[async_trait]
pub trait LayoutStore: Send + Sync {
    /// Load the saved layout; `None` when the user never saved one
    async fn load(&self) -> anyhow::Result<Option<Vec<SavedCard>>>;

    /// Overwrite the whole saved layout
    async fn save(&self, layout: &[SavedCard]) -> anyhow::Result<()>;
}

#[cfg(test)]
pub mod fakes {
    use super::*;
    use std::sync::Mutex;

    pub struct FakeData {
        pub snapshot: Option<DashboardSnapshot>,
    }

    #[async_trait]
    impl DashboardDataService for FakeData {
        async fn fetch(&self) -> anyhow::Result<DashboardSnapshot> {
            self.snapshot
                .clone()
                .ok_or_else(|| anyhow::anyhow!("dashboard endpoint unavailable"))
        }
    }

    /// Records every save; fails loads/saves on demand.
    #[derive(Default)]
    pub struct FakeStore {
        pub saved: Mutex<Option<Vec<SavedCard>>>,
        pub saves: Mutex<Vec<Vec<SavedCard>>>,
        pub fail_load: bool,
        pub fail_save: Mutex<bool>,
    }

    impl FakeStore {
        pub fn with_layout(layout: Vec<SavedCard>) -> Self {
            Self {
                saved: Mutex::new(Some(layout)),
                ..Self::default()
            }
        }

        pub fn save_calls(&self) -> Vec<Vec<SavedCard>> {
            self.saves.lock().unwrap().clone()
        }

        pub fn set_fail_save(&self, fail: bool) {
            *self.fail_save.lock().unwrap() = fail;
        }
    }

    #[async_trait]
    impl LayoutStore for FakeStore {
        async fn load(&self) -> anyhow::Result<Option<Vec<SavedCard>>> {
            if self.fail_load {
                anyhow::bail!("layout endpoint unavailable");
            }
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn save(&self, layout: &[SavedCard]) -> anyhow::Result<()> {
            if *self.fail_save.lock().unwrap() {
                anyhow::bail!("layout save rejected");
            }
            self.saves.lock().unwrap().push(layout.to_vec());
            *self.saved.lock().unwrap() = Some(layout.to_vec());
            Ok(())
        }
    }
}
