use super::get::{recipe_response, RecipeResponse};
use super::{ingredient_amounts, IngredientAmountRequest};
use crate::api::extract::Json;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::NewRecipe;
use crate::repo;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use foodgram_core::recipe::{validate_name, validate_text};
use foodgram_core::{decode_data_uri, validate_cooking_time, validate_ingredients};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<IngredientAmountRequest>,
    /// Base64 data URI, e.g. `data:image/png;base64,...`
    pub image: String,
    pub name: String,
    pub text: String,
    /// Minutes, at least 1
    pub cooking_time: i32,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateRecipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let items = ingredient_amounts(&req.ingredients);
    validate_ingredients(&items)?;
    validate_cooking_time(req.cooking_time)?;
    let name = validate_name(&req.name)?;
    let text = validate_text(&req.text)?;
    let image = decode_data_uri(&req.image)?;

    let mut conn = get_conn(&pool)?;

    let recipe_id = repo::recipes::create_recipe(
        &mut conn,
        &NewRecipe {
            author_id: user.id,
            name,
            text,
            cooking_time: req.cooking_time,
            image: &image.data,
            image_content_type: &image.content_type,
        },
        &items,
    )?;

    let response = recipe_response(&mut conn, Some(user.id), recipe_id)?;
    Ok((StatusCode::CREATED, Json(response)))
}
