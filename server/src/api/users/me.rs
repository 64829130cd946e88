use super::UserResponse;
use crate::api::extract::Json;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me(AuthUser(user): AuthUser) -> impl IntoResponse {
    // Nobody follows themselves.
    Json(UserResponse::new(user, false))
}
