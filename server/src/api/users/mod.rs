pub mod avatar;
pub mod get;
pub mod list;
pub mod me;
pub mod register;
pub mod set_password;
pub mod subscribe;
pub mod subscriptions;

use std::collections::HashSet;

use crate::error::ApiError;
use crate::models::User;
use crate::repo::subscriptions::followed_among;
use crate::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use diesel::PgConnection;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// A user as other users see it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the requesting user follows this one; false when anonymous
    pub is_subscribed: bool,
    /// URL of the avatar image, if one is set
    pub avatar: Option<String>,
}

pub fn avatar_url(user_id: i32) -> String {
    format!("/api/users/{user_id}/avatar")
}

impl UserResponse {
    fn new(user: User, is_subscribed: bool) -> Self {
        let avatar = user.avatar_content_type.as_ref().map(|_| avatar_url(user.id));
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
            avatar,
        }
    }
}

/// Build responses for `users`, resolving `is_subscribed` for `viewer` in
/// one query.
pub fn user_responses(
    conn: &mut PgConnection,
    viewer: Option<i32>,
    users: Vec<User>,
) -> Result<Vec<UserResponse>, ApiError> {
    let followed: HashSet<i32> = match viewer {
        Some(viewer) => {
            let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
            followed_among(conn, viewer, &ids)?
        }
        None => HashSet::new(),
    };

    Ok(users
        .into_iter()
        .map(|user| {
            let is_subscribed = followed.contains(&user.id);
            UserResponse::new(user, is_subscribed)
        })
        .collect())
}

pub fn user_response(
    conn: &mut PgConnection,
    viewer: Option<i32>,
    user: User,
) -> Result<UserResponse, ApiError> {
    user_responses(conn, viewer, vec![user])?
        .pop()
        .ok_or(ApiError::NotFound("User not found"))
}

/// Returns the router for /api/users endpoints (mounted at /api/users)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_users).post(register::register))
        .route("/me", get(me::me))
        .route(
            "/me/avatar",
            put(avatar::set_avatar).delete(avatar::delete_avatar),
        )
        .route("/set_password", post(set_password::set_password))
        .route("/subscriptions", get(subscriptions::list_subscriptions))
        .route("/{id}", get(get::get_user))
        .route("/{id}/avatar", get(avatar::get_avatar))
        .route(
            "/{id}/subscribe",
            post(subscribe::subscribe).delete(subscribe::unsubscribe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        register::register,
        list::list_users,
        get::get_user,
        me::me,
        avatar::set_avatar,
        avatar::delete_avatar,
        avatar::get_avatar,
        set_password::set_password,
        subscriptions::list_subscriptions,
        subscribe::subscribe,
        subscribe::unsubscribe,
    ),
    components(schemas(
        UserResponse,
        register::RegisterRequest,
        register::RegisteredUser,
        list::ListUsersResponse,
        avatar::SetAvatarRequest,
        avatar::AvatarResponse,
        set_password::SetPasswordRequest,
        subscriptions::AuthorWithRecipes,
        subscriptions::ListSubscriptionsResponse,
    ))
)]
pub struct ApiDoc;
