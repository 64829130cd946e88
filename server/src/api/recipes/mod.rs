pub mod create;
pub mod delete;
pub mod download;
pub mod favorite;
pub mod get;
pub mod get_link;
pub mod image;
pub mod list;
pub mod shopping_cart;
pub mod update;

use crate::models::Recipe;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use foodgram_core::IngredientAmount;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

pub fn image_url(recipe_id: i32) -> String {
    format!("/api/recipes/{recipe_id}/image")
}

/// The compact recipe form used in favorites, cart and subscription
/// responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeShort {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<Recipe> for RecipeShort {
    fn from(recipe: Recipe) -> Self {
        Self {
            image: image_url(recipe.id),
            id: recipe.id,
            name: recipe.name,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// One `{id, amount}` entry of a create or update request.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct IngredientAmountRequest {
    /// Ingredient ID
    pub id: i32,
    pub amount: i32,
}

pub fn ingredient_amounts(items: &[IngredientAmountRequest]) -> Vec<IngredientAmount> {
    items
        .iter()
        .map(|item| IngredientAmount {
            id: item.id,
            amount: item.amount,
        })
        .collect()
}

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/download_shopping_cart",
            get(download::download_shopping_cart),
        )
        .route(
            "/{id}",
            get(get::get_recipe)
                .patch(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/image", get(image::get_image))
        .route("/{id}/get-link", get(get_link::get_link))
        .route(
            "/{id}/favorite",
            post(favorite::add_favorite).delete(favorite::remove_favorite),
        )
        .route(
            "/{id}/shopping_cart",
            post(shopping_cart::add_to_cart).delete(shopping_cart::remove_from_cart),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        image::get_image,
        get_link::get_link,
        favorite::add_favorite,
        favorite::remove_favorite,
        shopping_cart::add_to_cart,
        shopping_cart::remove_from_cart,
        download::download_shopping_cart,
    ),
    components(schemas(
        RecipeShort,
        IngredientAmountRequest,
        list::ListRecipesResponse,
        get::RecipeResponse,
        get::RecipeIngredientResponse,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
        get_link::ShortLinkResponse,
    ))
)]
pub struct ApiDoc;
