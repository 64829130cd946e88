//! `/s/{code}` redirects produced by `GET /api/recipes/{id}/get-link`.

use crate::api::extract::Path;
use crate::api::ErrorResponse;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::repo::recipes::recipe_exists;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use diesel::PgConnection;
use foodgram_core::short_link::decode;
use std::sync::Arc;
use utoipa::OpenApi;

/// `recipe_id` back if that recipe exists.
pub fn resolve(conn: &mut PgConnection, recipe_id: i32) -> Result<i32, ApiError> {
    if !recipe_exists(conn, recipe_id)? {
        return Err(ApiError::NotFound("Recipe not found"));
    }
    Ok(recipe_id)
}

#[utoipa::path(
    get,
    path = "/s/{code}",
    tag = "recipes",
    params(
        ("code" = String, Path, description = "Hexadecimal short code")
    ),
    responses(
        (status = 302, description = "Redirect to the recipe"),
        (status = 400, description = "Malformed code", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn follow_short_link(
    State(pool): State<Arc<DbPool>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let recipe_id = decode(&code)?;
    let mut conn = get_conn(&pool)?;
    let recipe_id = resolve(&mut conn, recipe_id)?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, format!("/api/recipes/{recipe_id}"))],
    ))
}

/// Returns the router for short links (mounted at the root). Links are
/// issued with a trailing slash; the bare form is accepted too.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/s/{code}", get(follow_short_link))
        .route("/s/{code}/", get(follow_short_link))
}

#[derive(OpenApi)]
#[openapi(paths(follow_short_link))]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{create_ingredient, create_user, test_connection};
    use crate::models::NewRecipe;
    use crate::repo::recipes::create_recipe;
    use foodgram_core::short_link::encode;
    use foodgram_core::{IngredientAmount, ValidationError};

    #[test]
    fn test_resolve() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let author = create_user(&mut conn, "linker");
        let salt = create_ingredient(&mut conn, "Salt", "g");
        let recipe_id = create_recipe(
            &mut conn,
            &NewRecipe {
                author_id: author,
                name: "Toast",
                text: "Toast it.",
                cooking_time: 3,
                image: b"img",
                image_content_type: "image/png",
            },
            &[IngredientAmount { id: salt, amount: 1 }],
        )
        .unwrap();

        let code = encode(recipe_id);
        assert_eq!(resolve(&mut conn, decode(&code).unwrap()).unwrap(), recipe_id);
        assert_eq!(
            resolve(&mut conn, decode(&code.to_uppercase()).unwrap()).unwrap(),
            recipe_id
        );
        assert!(matches!(
            resolve(&mut conn, i32::MAX),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            decode("zz"),
            Err(ValidationError::MalformedShortCode(_))
        ));
    }
}
