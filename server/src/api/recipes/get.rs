use std::collections::{HashMap, HashSet};

use super::image_url;
use crate::api::extract::{Json, Path};
use crate::api::users::{user_responses, UserResponse};
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::{Recipe, User};
use crate::repo::relations::{contained, RecipeList};
use crate::schema::{ingredients, recipe_ingredients, recipes, users};
use axum::{extract::State, response::IntoResponse};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeIngredientResponse {
    /// Ingredient ID
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub author: UserResponse,
    pub name: String,
    /// URL of the recipe image
    pub image: String,
    pub text: String,
    /// Minutes
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
    /// Ordered by ingredient name
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Full responses for `recipes`, in the same order, with a fixed number of
/// queries regardless of how many recipes there are.
pub fn recipe_responses(
    conn: &mut PgConnection,
    viewer: Option<i32>,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeResponse>, ApiError> {
    if recipes.is_empty() {
        return Ok(Vec::new());
    }

    let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let author_ids: Vec<i32> = recipes
        .iter()
        .map(|r| r.author_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let authors: Vec<User> = users::table
        .filter(users::id.eq_any(&author_ids))
        .select(User::as_select())
        .load(conn)?;
    let authors: HashMap<i32, UserResponse> = user_responses(conn, viewer, authors)?
        .into_iter()
        .map(|author| (author.id, author))
        .collect();

    let rows: Vec<(i32, i32, String, String, i32)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&recipe_ids))
        .order((ingredients::name.asc(), ingredients::id.asc()))
        .select((
            recipe_ingredients::recipe_id,
            ingredients::id,
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load(conn)?;

    let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredientResponse>> = HashMap::new();
    for (recipe_id, id, name, measurement_unit, amount) in rows {
        ingredients_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(RecipeIngredientResponse {
                id,
                name,
                measurement_unit,
                amount,
            });
    }

    let (favorited, in_cart) = match viewer {
        Some(user_id) => (
            contained(conn, RecipeList::Favorites, user_id, &recipe_ids)?,
            contained(conn, RecipeList::ShoppingCart, user_id, &recipe_ids)?,
        ),
        None => (HashSet::new(), HashSet::new()),
    };

    recipes
        .into_iter()
        .map(|recipe| {
            let author = authors
                .get(&recipe.author_id)
                .cloned()
                .ok_or(ApiError::NotFound("Recipe author not found"))?;

            Ok(RecipeResponse {
                id: recipe.id,
                author,
                image: image_url(recipe.id),
                ingredients: ingredients_by_recipe.remove(&recipe.id).unwrap_or_default(),
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                name: recipe.name,
                text: recipe.text,
                cooking_time: recipe.cooking_time,
                pub_date: recipe.pub_date,
            })
        })
        .collect()
}

/// Load one recipe and build its response.
pub fn recipe_response(
    conn: &mut PgConnection,
    viewer: Option<i32>,
    recipe_id: i32,
) -> Result<RecipeResponse, ApiError> {
    let recipe: Recipe = recipes::table
        .find(recipe_id)
        .select(Recipe::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Recipe not found"))?;

    recipe_responses(conn, viewer, vec![recipe])?
        .pop()
        .ok_or(ApiError::NotFound("Recipe not found"))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    viewer: MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_conn(&pool)?;
    Ok(Json(recipe_response(&mut conn, viewer.id(), id)?))
}
