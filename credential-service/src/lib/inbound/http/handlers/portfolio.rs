use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::portfolio::models::Holding;
use crate::portfolio::models::Position;

pub async fn all_holdings(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<Holding>>, ApiError> {
    state
        .portfolio_service
        .all_holdings()
        .await
        .map_err(ApiError::from)
        .map(|holdings| ApiSuccess::new(StatusCode::OK, holdings))
}

pub async fn all_positions(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<Position>>, ApiError> {
    state
        .portfolio_service
        .all_positions()
        .await
        .map_err(ApiError::from)
        .map(|positions| ApiSuccess::new(StatusCode::OK, positions))
}
