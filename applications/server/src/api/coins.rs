/// Coin record API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use numis_core::{Coin, CoinFilter, CoinId, CoinPayload, CoinUpdate, NumisError, RecordStore};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CoinQuery {
    /// Equality filter on the listing flag
    #[serde(default)]
    pub active: Option<bool>,
}

/// GET /api/coins
pub async fn list_coins(
    State(app_state): State<AppState>,
    Query(query): Query<CoinQuery>,
) -> Result<Json<Vec<Coin>>> {
    let coins = app_state
        .records
        .list_coins(CoinFilter {
            active: query.active,
        })
        .await?;
    Ok(Json(coins))
}

/// GET /api/coins/:id
pub async fn get_coin(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Coin>> {
    let id = CoinId::new(id);
    let coin = app_state
        .records
        .get_coin(&id)
        .await?
        .ok_or(NumisError::CoinNotFound(id))?;
    Ok(Json(coin))
}

/// POST /api/coins
pub async fn create_coin(
    State(app_state): State<AppState>,
    Json(payload): Json<CoinPayload>,
) -> Result<(StatusCode, Json<Coin>)> {
    validate_payload(&payload)?;
    let coin = app_state.records.create_coin(payload).await?;
    tracing::info!(coin_id = %coin.id, name = %coin.name, "Coin created");
    Ok((StatusCode::CREATED, Json(coin)))
}

/// PUT /api/coins/:id
///
/// Body is a [`CoinUpdate`]: a full replacement or just the listing flag.
pub async fn update_coin(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(update): Json<CoinUpdate>,
) -> Result<Json<Coin>> {
    if let CoinUpdate::Full(payload) = &update {
        validate_payload(payload)?;
    }
    let id = CoinId::new(id);
    let coin = app_state.records.update_coin(&id, update).await?;
    tracing::info!(coin_id = %coin.id, active = coin.active, "Coin updated");
    Ok(Json(coin))
}

/// DELETE /api/coins/:id
pub async fn delete_coin(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    let id = CoinId::new(id);
    app_state.records.delete_coin(&id).await?;
    tracing::info!(coin_id = %id, "Coin deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Structural checks only; the panel owns the business rules
fn validate_payload(payload: &CoinPayload) -> std::result::Result<(), NumisError> {
    if payload.name.trim().is_empty() {
        return Err(NumisError::invalid_input("name must not be empty"));
    }
    if payload.prices.iter().any(|p| !p.is_valid()) {
        return Err(NumisError::invalid_input("prices must be greater than 0"));
    }
    Ok(())
}
