use super::get::{recipe_response, RecipeResponse};
use super::{ingredient_amounts, IngredientAmountRequest};
use crate::api::extract::{Json, Path};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::RecipeChanges;
use crate::repo;
use axum::{extract::State, response::IntoResponse};
use foodgram_core::recipe::{validate_name, validate_text};
use foodgram_core::{
    decode_data_uri, validate_cooking_time, validate_ingredients, IngredientAmount,
    ValidationError,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Omitted fields keep their value, except `ingredients`, which is
/// required and replaces the whole list.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    /// Base64 data URI
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

fn required_ingredients(req: &UpdateRecipeRequest) -> Result<Vec<IngredientAmount>, ValidationError> {
    let items = ingredient_amounts(
        req.ingredients
            .as_deref()
            .ok_or(ValidationError::IngredientsRequired)?,
    );
    validate_ingredients(&items)?;
    Ok(items)
}

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateRecipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let items = required_ingredients(&req)?;

    if let Some(minutes) = req.cooking_time {
        validate_cooking_time(minutes)?;
    }
    let name = req.name.as_deref().map(validate_name).transpose()?;
    let text = req.text.as_deref().map(validate_text).transpose()?;
    let image = req.image.as_deref().map(decode_data_uri).transpose()?;

    let changes = RecipeChanges {
        name,
        text,
        cooking_time: req.cooking_time,
        image: image.as_ref().map(|i| i.data.as_slice()),
        image_content_type: image.as_ref().map(|i| i.content_type.as_str()),
    };

    let mut conn = get_conn(&pool)?;
    repo::recipes::update_recipe(&mut conn, id, user.id, &changes, &items)?;

    Ok(Json(recipe_response(&mut conn, Some(user.id), id)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_ingredients_rejected() {
        let req = UpdateRecipeRequest {
            name: Some("New name".to_string()),
            ..Default::default()
        };
        assert_eq!(
            required_ingredients(&req),
            Err(ValidationError::IngredientsRequired)
        );
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        let req = UpdateRecipeRequest {
            ingredients: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(required_ingredients(&req), Err(ValidationError::NoIngredients));
    }

    #[test]
    fn test_ingredients_pass_through() {
        let req = UpdateRecipeRequest {
            ingredients: Some(vec![IngredientAmountRequest { id: 4, amount: 3 }]),
            ..Default::default()
        };
        assert_eq!(
            required_ingredients(&req),
            Ok(vec![IngredientAmount { id: 4, amount: 3 }])
        );
    }
}
