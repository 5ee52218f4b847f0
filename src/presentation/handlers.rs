// HTTP request handlers
use crate::application::controller::{
    ControllerError, DashboardController, DashboardState, RenderedCard,
};
use crate::application::grid::primary_breakpoint;
use crate::domain::card::GridItem;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub state: DashboardState,
    pub editable: bool,
    pub loading: bool,
    pub saving: bool,
    pub has_data: bool,
    pub last_error: Option<String>,
    pub cards: Vec<RenderedCard>,
    pub layouts: BTreeMap<String, Vec<GridItem>>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct LayoutChangeRequest {
    #[serde(default)]
    pub breakpoint: Option<String>,
    pub layout: Vec<GridItem>,
}

pub struct ApiError(ControllerError);

impl From<ControllerError> for ApiError {
    fn from(err: ControllerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ControllerError::NotViewing
            | ControllerError::NotEditing
            | ControllerError::SaveInFlight
            | ControllerError::LoadInFlight => StatusCode::CONFLICT,
            ControllerError::UnknownCard(_) => StatusCode::NOT_FOUND,
            ControllerError::SaveFailed(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult = Result<Json<DashboardView>, ApiError>;

fn view(state: &AppState, controller: &DashboardController) -> Json<DashboardView> {
    Json(DashboardView {
        state: controller.state(),
        editable: controller.is_editable(),
        loading: controller.is_loading(),
        saving: controller.is_saving(),
        has_data: controller.has_data(),
        last_error: controller.last_error().map(str::to_string),
        cards: controller.render(&state.registry),
        layouts: controller.grid_layouts(&state.breakpoints),
    })
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let controller = state.controller.lock().await;
    view(&state, &controller)
}

/// Refetch data and layout. Refused while editing so edits are not lost.
pub async fn reload_dashboard(State(state): State<Arc<AppState>>) -> ApiResult {
    state.mount().await?;
    let controller = state.controller.lock().await;
    Ok(view(&state, &controller))
}

pub async fn enter_edit(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut controller = state.controller.lock().await;
    controller.enter_edit()?;
    Ok(view(&state, &controller))
}

pub async fn cancel_edit(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let mut controller = state.controller.lock().await;
    controller.cancel();
    view(&state, &controller)
}

/// Grid layout-changed callback
pub async fn change_layout(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LayoutChangeRequest>,
) -> Json<DashboardView> {
    let primary = primary_breakpoint(&state.breakpoints).map(|bp| bp.name.as_str());
    let mut controller = state.controller.lock().await;

    match request.breakpoint.as_deref() {
        Some(breakpoint) if Some(breakpoint) != primary => {
            tracing::debug!(breakpoint, "ignoring layout change for secondary breakpoint");
        }
        _ => {
            let updated = controller.apply_layout_change(&request.layout);
            tracing::debug!(updated, "applied layout change");
        }
    }
    view(&state, &controller)
}

pub async fn toggle_visibility(
    Path(card_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let mut controller = state.controller.lock().await;
    controller.toggle_visibility(&card_id)?;
    Ok(view(&state, &controller))
}

/// The controller lock is released while the store call is in flight.
pub async fn save_layout(State(state): State<Arc<AppState>>) -> ApiResult {
    let pending = state.controller.lock().await.begin_save()?;
    let result = state.store.save(&pending.layout).await;

    let mut controller = state.controller.lock().await;
    controller.finish_save(pending.ticket, result)?;
    Ok(view(&state, &controller))
}

pub async fn session_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({ "active": state.session.is_active().await }))
}

pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignInRequest>,
) -> StatusCode {
    state.session.sign_in(request.token).await;
    StatusCode::NO_CONTENT
}

pub async fn logout(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.invalidate().await;
    StatusCode::NO_CONTENT
}
