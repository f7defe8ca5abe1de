// ============================================================================
// PetFinder API - Pet Handlers
// File: crates/petfinder-api/src/handlers/pets.rs
// ============================================================================
//! Owner-scoped pet CRUD

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use petfinder_core::domain::{NewPet, Pet, PetChanges};
use petfinder_shared::PetId;
use serde::Serialize;

use super::parse_pet_id;
use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeletedPet {
    pub id: PetId,
}

/// GET /api/v1/pets
pub async fn list_pets(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<ApiResponse<Vec<Pet>>>, ApiError> {
    let pets = state.pets.list(&session).await?;
    Ok(Json(ApiResponse::success(pets)))
}

/// POST /api/v1/pets
pub async fn create_pet(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    payload: Result<Json<NewPet>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Pet>>), ApiError> {
    let Json(input) = payload?;
    let pet = state.pets.register(&session, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(pet))))
}

/// GET /api/v1/pets/{pet_id}
pub async fn get_pet(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(pet_id): Path<String>,
) -> Result<Json<ApiResponse<Pet>>, ApiError> {
    let pet_id = parse_pet_id(&pet_id)?;
    let pet = state.pets.get(&session, &pet_id).await?;
    Ok(Json(ApiResponse::success(pet)))
}

/// PATCH /api/v1/pets/{pet_id}
pub async fn update_pet(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(pet_id): Path<String>,
    payload: Result<Json<PetChanges>, JsonRejection>,
) -> Result<Json<ApiResponse<Pet>>, ApiError> {
    let pet_id = parse_pet_id(&pet_id)?;
    let Json(changes) = payload?;
    let pet = state.pets.update(&session, &pet_id, changes).await?;
    Ok(Json(ApiResponse::success(pet)))
}

/// DELETE /api/v1/pets/{pet_id}
pub async fn delete_pet(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(pet_id): Path<String>,
) -> Result<Json<ApiResponse<DeletedPet>>, ApiError> {
    let pet_id = parse_pet_id(&pet_id)?;
    state.pets.remove(&session, &pet_id).await?;
    Ok(Json(ApiResponse::success(DeletedPet { id: pet_id })))
}
