//! Favourites handlers. All of them require an authenticated user.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use favourites_core::{FavouriteId, Favourites};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::services::FavouritesService;
use crate::state::AppState;

/// Body returned after adding a favourite.
#[derive(Debug, Serialize)]
pub struct FavouritesResponse {
    pub favourites: Favourites,
}

fn parse_item(raw: &str) -> Result<FavouriteId> {
    FavouriteId::parse(raw).map_err(|e| AppError::BadRequest(format!("Invalid favourite id: {e}")))
}

/// List the caller's favourites.
pub async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Favourites>> {
    let favourites = FavouritesService::new(state.users()).list(user.id).await?;
    Ok(Json(favourites))
}

/// Add an item to the caller's favourites.
pub async fn add(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FavouritesResponse>> {
    let item = parse_item(&id)?;
    let favourites = FavouritesService::new(state.users())
        .add(user.id, &item)
        .await?;
    Ok(Json(FavouritesResponse { favourites }))
}

/// Remove an item from the caller's favourites.
pub async fn remove(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Favourites>> {
    let item = parse_item(&id)?;
    let favourites = FavouritesService::new(state.users())
        .remove(user.id, &item)
        .await?;
    Ok(Json(favourites))
}
