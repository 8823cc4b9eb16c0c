//! Admin services - Operazioni di manutenzione

use crate::core::{AppError, AppState, CurrentUser};
use crate::dtos::SweepReportDTO;
use axum::{
    Extension,
    extract::{Json, State},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

/// Esegue subito uno sweep delle scadenze, senza aspettare il tick successivo
#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn run_expiration_sweep(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<SweepReportDTO>, AppError> {
    info!("Manual expiration sweep requested");
    let expired = state.ledger.expire_all(Utc::now()).await?;
    Ok(Json(SweepReportDTO { expired }))
}
