use super::get::{recipe_responses, RecipeResponse};
use crate::api::extract::{Json, Query};
use crate::api::pagination::{Page, PaginationMetadata};
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::Recipe;
use crate::raw_sql::count_over;
use crate::schema::{favorites, recipes, shopping_cart_items};
use axum::{extract::State, response::IntoResponse};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Number of items to return (default: 6, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
    /// Only recipes by this author
    pub author: Option<i32>,
    /// `1` for only the viewer's favorites. Ignored when anonymous.
    pub is_favorited: Option<u8>,
    /// `1` for only recipes in the viewer's cart. Ignored when anonymous.
    pub is_in_shopping_cart: Option<u8>,
}

/// Filters after dropping the ones that need a viewer when there is none.
#[derive(Debug, Default, PartialEq, Eq)]
struct RecipeFilter {
    author: Option<i32>,
    favorited_by: Option<i32>,
    in_cart_of: Option<i32>,
}

impl RecipeFilter {
    fn new(params: &ListRecipesParams, viewer: Option<i32>) -> Self {
        let flag = |value: Option<u8>| viewer.filter(|_| value == Some(1));
        Self {
            author: params.author,
            favorited_by: flag(params.is_favorited),
            in_cart_of: flag(params.is_in_shopping_cart),
        }
    }
}

fn filtered(filter: &RecipeFilter) -> recipes::BoxedQuery<'static, Pg> {
    let mut query = recipes::table.into_boxed();

    if let Some(author) = filter.author {
        query = query.filter(recipes::author_id.eq(author));
    }

    if let Some(user_id) = filter.favorited_by {
        query = query.filter(
            recipes::id.eq_any(
                favorites::table
                    .filter(favorites::user_id.eq(user_id))
                    .select(favorites::recipe_id),
            ),
        );
    }

    if let Some(user_id) = filter.in_cart_of {
        query = query.filter(
            recipes::id.eq_any(
                shopping_cart_items::table
                    .filter(shopping_cart_items::user_id.eq(user_id))
                    .select(shopping_cart_items::recipe_id),
            ),
        );
    }

    query
}

/// One page of matching recipes, newest first, and the number of matches.
fn load_page(
    conn: &mut PgConnection,
    filter: &RecipeFilter,
    page: Page,
) -> QueryResult<(Vec<Recipe>, i64)> {
    let rows: Vec<(Recipe, i64)> = filtered(filter)
        .order((recipes::pub_date.desc(), recipes::id.desc()))
        .select((Recipe::as_select(), count_over()))
        .limit(page.limit)
        .offset(page.offset)
        .load(conn)?;

    let total = page.total(&rows, || filtered(filter).count().get_result(conn))?;
    Ok((rows.into_iter().map(|(recipe, _)| recipe).collect(), total))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Recipes, newest first", body = ListRecipesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    viewer: MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListRecipesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = Page::new(params.limit, params.offset);
    let filter = RecipeFilter::new(&params, viewer.id());

    let mut conn = get_conn(&pool)?;
    let (recipes, total) = load_page(&mut conn, &filter, page)?;

    Ok(Json(ListRecipesResponse {
        recipes: recipe_responses(&mut conn, viewer.id(), recipes)?,
        pagination: page.metadata(total),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{create_ingredient, create_user, test_connection};
    use crate::models::NewRecipe;
    use crate::repo::recipes::create_recipe;
    use foodgram_core::IngredientAmount;

    fn params(is_favorited: Option<u8>, is_in_shopping_cart: Option<u8>) -> ListRecipesParams {
        ListRecipesParams {
            author: Some(7),
            is_favorited,
            is_in_shopping_cart,
            ..Default::default()
        }
    }

    #[test]
    fn test_viewer_filters_ignored_when_anonymous() {
        let filter = RecipeFilter::new(&params(Some(1), Some(1)), None);
        assert_eq!(
            filter,
            RecipeFilter {
                author: Some(7),
                favorited_by: None,
                in_cart_of: None,
            }
        );
    }

    #[test]
    fn test_viewer_filters_apply_only_for_one() {
        let filter = RecipeFilter::new(&params(Some(1), Some(0)), Some(3));
        assert_eq!(filter.favorited_by, Some(3));
        assert_eq!(filter.in_cart_of, None);
    }

    #[test]
    fn test_total_survives_offset_past_the_end() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let author = create_user(&mut conn, "paged");
        let other = create_user(&mut conn, "unpaged");
        let salt = create_ingredient(&mut conn, "Salt", "g");
        let seeded = [(author, "One"), (author, "Two"), (author, "Three"), (other, "Four")];
        for (author_id, name) in seeded {
            create_recipe(
                &mut conn,
                &NewRecipe {
                    author_id,
                    name,
                    text: "Cook.",
                    cooking_time: 1,
                    image: b"img",
                    image_content_type: "image/png",
                },
                &[IngredientAmount { id: salt, amount: 1 }],
            )
            .unwrap();
        }
        let filter = RecipeFilter {
            author: Some(author),
            ..Default::default()
        };

        let (recipes, total) = load_page(&mut conn, &filter, Page::new(Some(2), None)).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(total, 3);

        let (recipes, total) =
            load_page(&mut conn, &filter, Page::new(Some(2), Some(10))).unwrap();
        assert!(recipes.is_empty());
        assert_eq!(total, 3);
    }
}
