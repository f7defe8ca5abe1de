use axum::{
    extract::{Path, State},
    http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Json,
};
use petfinder_core::domain::Pet;
use petfinder_shared::constants::QR_CACHE_CONTROL_SECS;
use petfinder_shared::utils::file_stem;

use super::parse_pet_id;
use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/pets/{pet_id}/qr - generate, publish and attach
pub async fn generate_qr(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(pet_id): Path<String>,
) -> Result<Json<ApiResponse<Pet>>, ApiError> {
    let pet_id = parse_pet_id(&pet_id)?;
    let pet = state.qr.generate(&session, &pet_id).await?;
    Ok(Json(ApiResponse::success(pet)))
}

/// GET /api/v1/pets/{pet_id}/qr.png - printable download
pub async fn download_qr(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(pet_id): Path<String>,
) -> Result<Response, ApiError> {
    let pet_id = parse_pet_id(&pet_id)?;
    let (pet, image) = state.qr.render(&session, &pet_id).await?;
    let disposition = format!("attachment; filename=\"{}-qr-code.png\"", file_stem(&pet.name));

    Ok((
        [
            (CONTENT_TYPE, image.content_type().to_string()),
            (CONTENT_DISPOSITION, disposition),
            (CACHE_CONTROL, format!("private, max-age={}", QR_CACHE_CONTROL_SECS)),
        ],
        image.png,
    )
        .into_response())
}
