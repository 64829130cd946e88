use crate::api::extract::{Json, Path};
use crate::api::ErrorResponse;
use crate::config::Config;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::repo::recipes::recipe_exists;
use axum::{extract::State, response::IntoResponse};
use foodgram_core::short_link::short_url;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShortLinkResponse {
    pub short_link: String,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/get-link",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Short link to the recipe", body = ShortLinkResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_link(
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<Config>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_conn(&pool)?;

    if !recipe_exists(&mut conn, id)? {
        return Err(ApiError::NotFound("Recipe not found"));
    }

    Ok(Json(ShortLinkResponse {
        short_link: short_url(&config.short_link_base_url, id),
    }))
}
