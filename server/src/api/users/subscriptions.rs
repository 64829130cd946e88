use super::{user_responses, UserResponse};
use crate::api::extract::{Json, Query};
use crate::api::pagination::{Page, PaginationMetadata};
use crate::api::recipes::RecipeShort;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::{Recipe, User};
use crate::raw_sql::count_over;
use crate::schema::{recipes, subscriptions, users};
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorWithRecipes {
    #[serde(flatten)]
    pub author: UserResponse,
    /// Newest first, truncated to `recipes_limit` when given
    pub recipes: Vec<RecipeShort>,
    pub recipes_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListSubscriptionsResponse {
    pub authors: Vec<AuthorWithRecipes>,
    pub pagination: PaginationMetadata,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSubscriptionsParams {
    /// Number of authors to return (default: 6, max: 100)
    pub limit: Option<i64>,
    /// Number of authors to skip (default: 0)
    pub offset: Option<i64>,
    /// Maximum number of recipes shown per author
    pub recipes_limit: Option<i64>,
}

/// Attach each author's recipe preview and count.
pub fn with_recipes(
    conn: &mut PgConnection,
    authors: Vec<UserResponse>,
    recipes_limit: Option<i64>,
) -> Result<Vec<AuthorWithRecipes>, ApiError> {
    authors
        .into_iter()
        .map(|author| {
            let mut query = recipes::table
                .filter(recipes::author_id.eq(author.id))
                .order((recipes::pub_date.desc(), recipes::id.desc()))
                .select(Recipe::as_select())
                .into_boxed();
            if let Some(limit) = recipes_limit {
                query = query.limit(limit.max(0));
            }
            let recipes: Vec<Recipe> = query.load(conn)?;

            let recipes_count: i64 = recipes::table
                .filter(recipes::author_id.eq(author.id))
                .count()
                .get_result(conn)?;

            Ok(AuthorWithRecipes {
                author,
                recipes: recipes.into_iter().map(RecipeShort::from).collect(),
                recipes_count,
            })
        })
        .collect()
}

#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    tag = "users",
    params(ListSubscriptionsParams),
    responses(
        (status = 200, description = "Authors the current user follows", body = ListSubscriptionsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_subscriptions(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListSubscriptionsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = Page::new(params.limit, params.offset);
    let mut conn = get_conn(&pool)?;

    let rows: Vec<(User, i64)> = users::table
        .inner_join(subscriptions::table.on(subscriptions::author_id.eq(users::id)))
        .filter(subscriptions::user_id.eq(user.id))
        .order(users::username.asc())
        .select((User::as_select(), count_over()))
        .limit(page.limit)
        .offset(page.offset)
        .load(&mut conn)?;

    let total = page.total(&rows, || {
        subscriptions::table
            .filter(subscriptions::user_id.eq(user.id))
            .count()
            .get_result(&mut conn)
    })?;
    let authors = rows.into_iter().map(|(author, _)| author).collect();
    let authors = user_responses(&mut conn, Some(user.id), authors)?;

    Ok(Json(ListSubscriptionsResponse {
        authors: with_recipes(&mut conn, authors, params.recipes_limit)?,
        pagination: page.metadata(total),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::users::user_response;
    use crate::db::testing::{create_ingredient, create_user, test_connection};
    use crate::models::NewRecipe;
    use crate::repo::recipes::create_recipe;
    use foodgram_core::IngredientAmount;

    #[test]
    fn test_recipes_limit_truncates_but_count_does_not() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let author = create_user(&mut conn, "prolific");
        let salt = create_ingredient(&mut conn, "Salt", "g");
        for name in ["One", "Two", "Three"] {
            create_recipe(
                &mut conn,
                &NewRecipe {
                    author_id: author,
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

        let user: User = users::table
            .find(author)
            .select(User::as_select())
            .first(&mut conn)
            .unwrap();
        let response = user_response(&mut conn, None, user).unwrap();

        let limited = with_recipes(&mut conn, vec![response.clone()], Some(2)).unwrap();
        assert_eq!(limited[0].recipes.len(), 2);
        assert_eq!(limited[0].recipes_count, 3);

        let all = with_recipes(&mut conn, vec![response], None).unwrap();
        assert_eq!(all[0].recipes.len(), 3);
    }
}
