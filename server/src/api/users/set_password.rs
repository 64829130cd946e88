use crate::api::extract::Json;
use crate::api::ErrorResponse;
use crate::auth::{hash_password, verify_password, AuthUser};
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use diesel::prelude::*;
use foodgram_core::users::validate_password;
use foodgram_core::ValidationError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[utoipa::path(
    post,
    path = "/api/users/set_password",
    tag = "users",
    request_body = SetPasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Wrong current password or weak new one", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_password(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<SetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !verify_password(&req.current_password, &user.password_hash) {
        return Err(ValidationError::WrongPassword.into());
    }
    let new_password = validate_password(&req.new_password)?;

    let password_hash =
        hash_password(new_password).map_err(|e| ApiError::PasswordHash(e.to_string()))?;

    let mut conn = get_conn(&pool)?;
    diesel::update(users::table.find(user.id))
        .set(users::password_hash.eq(&password_hash))
        .execute(&mut conn)?;

    tracing::info!(user_id = user.id, "password changed");

    Ok(StatusCode::NO_CONTENT)
}
