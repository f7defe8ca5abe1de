use axum::{
    extract::{Path, State},
    Json,
};
use petfinder_core::domain::ScanProfile;

use super::parse_pet_id;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /scan/{pet_id} - public profile shown to whoever scans a tag
pub async fn scan_profile(
    State(state): State<AppState>,
    Path(pet_id): Path<String>,
) -> Result<Json<ApiResponse<ScanProfile>>, ApiError> {
    let pet_id = parse_pet_id(&pet_id)?;
    let profile = state.pets.scan_profile(&pet_id).await?;
    Ok(Json(ApiResponse::success(profile)))
}
