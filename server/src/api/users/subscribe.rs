use super::subscriptions::{with_recipes, AuthorWithRecipes, ListSubscriptionsParams};
use super::user_response;
use crate::api::extract::{Json, Path, Query};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::User;
use crate::repo::subscriptions::{subscribe as follow, unsubscribe as unfollow};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = i32, Path, description = "Author ID"),
        ("recipes_limit" = Option<i64>, Query, description = "Maximum number of recipes shown"),
    ),
    responses(
        (status = 201, description = "Subscribed", body = AuthorWithRecipes),
        (status = 400, description = "Cannot subscribe to yourself", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Already subscribed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn subscribe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Query(params): Query<ListSubscriptionsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_conn(&pool)?;
    follow(&mut conn, user.id, id)?;

    let author: User = users::table
        .find(id)
        .select(User::as_select())
        .first(&mut conn)?;
    let author = user_response(&mut conn, Some(user.id), author)?;

    let mut authors = with_recipes(&mut conn, vec![author], params.recipes_limit)?;
    let author = authors.pop().ok_or(ApiError::NotFound("User not found"))?;

    Ok((StatusCode::CREATED, Json(author)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found or not subscribed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unsubscribe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_conn(&pool)?;
    unfollow(&mut conn, user.id, id)?;
    Ok(StatusCode::NO_CONTENT)
}
