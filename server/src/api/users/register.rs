use crate::api::extract::Json;
use crate::api::ErrorResponse;
use crate::auth::hash_password;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::NewUser;
use crate::raw_sql::email_matches;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use foodgram_core::NewAccount;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisteredUser {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

const TAKEN: &str = "A user with this email or username already exists";

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisteredUser),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 409, description = "Email or username taken", body = ErrorResponse)
    )
)]
pub async fn register(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = NewAccount::validate(
        &req.email,
        &req.username,
        &req.first_name,
        &req.last_name,
        &req.password,
    )?;

    let mut conn = get_conn(&pool)?;

    let taken: bool = diesel::select(diesel::dsl::exists(
        users::table.filter(
            users::username
                .eq(account.username)
                .or(email_matches(account.email)),
        ),
    ))
    .get_result(&mut conn)?;

    if taken {
        return Err(ApiError::Conflict(TAKEN));
    }

    let password_hash =
        hash_password(account.password).map_err(|e| ApiError::PasswordHash(e.to_string()))?;

    let new_user = NewUser {
        email: account.email,
        username: account.username,
        first_name: account.first_name,
        last_name: account.last_name,
        password_hash: &password_hash,
    };

    // A concurrent registration can still win the race past the check above.
    let id: i32 = diesel::insert_into(users::table)
        .values(&new_user)
        .returning(users::id)
        .get_result(&mut conn)
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ApiError::Conflict(TAKEN)
            }
            other => ApiError::from(other),
        })?;

    tracing::info!(user_id = id, username = account.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisteredUser {
            id,
            email: account.email.to_string(),
            username: account.username.to_string(),
            first_name: account.first_name.to_string(),
            last_name: account.last_name.to_string(),
        }),
    ))
}
