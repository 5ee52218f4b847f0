use crate::application::grid::{default_breakpoints, Breakpoint};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub grid: GridSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    pub dashboard_path: String,
    pub layout_path: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GridSettings {
    #[serde(default = "default_breakpoints")]
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            breakpoints: default_breakpoints(),
        }
    }
}

/// Defaults, then `config/dashboard.*`, then `DASHBOARD__*` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_from(config::File::with_name("config/dashboard").required(false))
}

fn load_from<S>(file: S) -> anyhow::Result<AppConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("backend.base_url", "http://127.0.0.1:8000")?
        .set_default("backend.dashboard_path", "/api/dashboard")?
        .set_default("backend.layout_path", "/api/dashboard/layout")?
        .set_default("backend.timeout_secs", 10)?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut app: AppConfig = settings.try_deserialize()?;
    if app.grid.breakpoints.is_empty() {
        app.grid.breakpoints = default_breakpoints();
    }
    Ok(app)
}

/// Join a base URL and an endpoint path with exactly one slash.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
