use crate::api::ErrorResponse;
use crate::auth::{bearer_token, delete_session, AuthUser};
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

/// Ends the session whose token authenticated this request.
#[utoipa::path(
    post,
    path = "/api/auth/token/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_conn(&pool)?;

    if let Ok(token) = bearer_token(&headers) {
        delete_session(&mut conn, token)?;
    }
    tracing::info!(user_id = user.id, "session deleted");

    Ok(StatusCode::NO_CONTENT)
}
