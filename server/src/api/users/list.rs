use super::{user_responses, UserResponse};
use crate::api::extract::{Json, Query};
use crate::api::pagination::{Page, PaginationMetadata};
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::User;
use crate::raw_sql::count_over;
use crate::schema::users;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Number of items to return (default: 6, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "Users ordered by id", body = ListUsersResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse)
    )
)]
pub async fn list_users(
    viewer: MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListUsersParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = Page::new(params.limit, params.offset);
    let mut conn = get_conn(&pool)?;

    let rows: Vec<(User, i64)> = users::table
        .order(users::id.asc())
        .select((User::as_select(), count_over()))
        .limit(page.limit)
        .offset(page.offset)
        .load(&mut conn)?;

    let total = page.total(&rows, || users::table.count().get_result(&mut conn))?;
    let users = rows.into_iter().map(|(user, _)| user).collect();

    Ok(Json(ListUsersResponse {
        users: user_responses(&mut conn, viewer.id(), users)?,
        pagination: page.metadata(total),
    }))
}
