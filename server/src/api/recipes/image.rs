use crate::api::extract::Path;
use crate::api::{image_response, ErrorResponse};
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::schema::recipes;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/image",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe image data", content_type = "image/*"),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_image(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_conn(&pool)?;

    let (data, content_type): (Vec<u8>, String) = recipes::table
        .find(id)
        .select((recipes::image, recipes::image_content_type))
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound("Recipe not found"))?;

    Ok(image_response(data, content_type))
}
