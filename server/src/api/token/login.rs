use crate::api::extract::Json;
use crate::api::ErrorResponse;
use crate::auth::{create_session, verify_password};
use crate::config::Config;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::User;
use crate::raw_sql::email_matches;
use crate::schema::users;
use axum::{extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub auth_token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/token/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"email": "cook@example.com", "password": "password"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<Config>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_conn(&pool)?;

    let user: User = users::table
        .filter(email_matches(req.email.trim()))
        .select(User::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        tracing::info!(user_id = user.id, "login rejected: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let auth_token = create_session(&mut conn, user.id, config.session_ttl_days)?;
    tracing::info!(user_id = user.id, "session created");

    Ok(Json(LoginResponse { auth_token }))
}
