use super::avatar_url;
use crate::api::extract::{Json, Path};
use crate::api::{image_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use diesel::prelude::*;
use foodgram_core::decode_data_uri;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetAvatarRequest {
    /// Base64 data URI, e.g. `data:image/png;base64,...`
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvatarResponse {
    pub avatar: String,
}

#[utoipa::path(
    put,
    path = "/api/users/me/avatar",
    tag = "users",
    request_body = SetAvatarRequest,
    responses(
        (status = 200, description = "Avatar stored", body = AvatarResponse),
        (status = 400, description = "Invalid image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_avatar(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<SetAvatarRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let image = decode_data_uri(&req.avatar)?;
    let mut conn = get_conn(&pool)?;

    diesel::update(users::table.find(user.id))
        .set((
            users::avatar.eq(Some(image.data.as_slice())),
            users::avatar_content_type.eq(Some(image.content_type.as_str())),
        ))
        .execute(&mut conn)?;

    tracing::info!(user_id = user.id, bytes = image.data.len(), "avatar updated");

    Ok(Json(AvatarResponse {
        avatar: avatar_url(user.id),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/me/avatar",
    tag = "users",
    responses(
        (status = 204, description = "Avatar removed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_avatar(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_conn(&pool)?;

    diesel::update(users::table.find(user.id))
        .set((
            users::avatar.eq(None::<Vec<u8>>),
            users::avatar_content_type.eq(None::<String>),
        ))
        .execute(&mut conn)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/avatar",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Avatar image data", content_type = "image/*"),
        (status = 404, description = "User or avatar not found", body = ErrorResponse)
    )
)]
pub async fn get_avatar(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_conn(&pool)?;

    let (data, content_type): (Option<Vec<u8>>, Option<String>) = users::table
        .find(id)
        .select((users::avatar, users::avatar_content_type))
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound("User not found"))?;

    match (data, content_type) {
        (Some(data), Some(content_type)) => Ok(image_response(data, content_type)),
        _ => Err(ApiError::NotFound("User has no avatar")),
    }
}
