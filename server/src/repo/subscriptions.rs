use std::collections::HashSet;

use diesel::prelude::*;

use crate::error::ApiError;
use crate::models::NewSubscription;
use crate::schema::{subscriptions, users};

fn user_exists(conn: &mut PgConnection, user_id: i32) -> Result<bool, diesel::result::Error> {
    diesel::select(diesel::dsl::exists(users::table.find(user_id))).get_result(conn)
}

/// Make `follower_id` follow `author_id`. Following yourself is rejected
/// before anything else is looked at.
pub fn subscribe(conn: &mut PgConnection, follower_id: i32, author_id: i32) -> Result<(), ApiError> {
    if follower_id == author_id {
        return Err(ApiError::SelfSubscription);
    }

    if !user_exists(conn, author_id)? {
        return Err(ApiError::NotFound("User not found"));
    }

    let inserted = diesel::insert_into(subscriptions::table)
        .values(&NewSubscription {
            user_id: follower_id,
            author_id,
        })
        .on_conflict_do_nothing()
        .execute(conn)?;

    if inserted == 0 {
        return Err(ApiError::Conflict("Already subscribed to this user"));
    }

    tracing::debug!(follower_id, author_id, "subscribed");
    Ok(())
}

pub fn unsubscribe(
    conn: &mut PgConnection,
    follower_id: i32,
    author_id: i32,
) -> Result<(), ApiError> {
    if !user_exists(conn, author_id)? {
        return Err(ApiError::NotFound("User not found"));
    }

    let deleted = diesel::delete(
        subscriptions::table
            .filter(subscriptions::user_id.eq(follower_id))
            .filter(subscriptions::author_id.eq(author_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(ApiError::NotFound("You are not subscribed to this user"));
    }

    tracing::debug!(follower_id, author_id, "unsubscribed");
    Ok(())
}

/// Which of `author_ids` the follower is subscribed to.
pub fn followed_among(
    conn: &mut PgConnection,
    follower_id: i32,
    author_ids: &[i32],
) -> Result<HashSet<i32>, diesel::result::Error> {
    let ids: Vec<i32> = subscriptions::table
        .filter(subscriptions::user_id.eq(follower_id))
        .filter(subscriptions::author_id.eq_any(author_ids))
        .select(subscriptions::author_id)
        .load(conn)?;

    Ok(ids.into_iter().collect())
}
