use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{NewSession, User};
use crate::schema::{sessions, users};
use chrono::{DateTime, TimeDelta, Utc};
use diesel::prelude::*;

use super::crypto::{generate_token, hash_token};

/// `now` plus `ttl_days`, or `None` if that leaves chrono's range.
fn session_expiry(now: DateTime<Utc>, ttl_days: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(ttl_days).and_then(|ttl| now.checked_add_signed(ttl))
}

/// Create a session for `user_id` and return the plaintext token. Only its
/// hash is stored.
pub fn create_session(
    conn: &mut PgConnection,
    user_id: i32,
    ttl_days: i64,
) -> Result<String, ApiError> {
    let expires_at =
        session_expiry(Utc::now(), ttl_days).ok_or(ApiError::SessionExpiry(ttl_days))?;
    let token = generate_token();
    let token_hash = hash_token(&token);

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

/// Delete the session behind `token`. Returns whether one existed.
pub fn delete_session(conn: &mut PgConnection, token: &str) -> Result<bool, diesel::result::Error> {
    let deleted = diesel::delete(sessions::table.filter(sessions::token_hash.eq(hash_token(token))))
        .execute(conn)?;
    Ok(deleted > 0)
}

pub async fn get_user_from_token(pool: &DbPool, token: &str) -> Option<User> {
    let mut conn = pool.get().ok()?;
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select(User::as_select())
        .first(&mut conn)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{create_user, test_connection};

    #[test]
    fn test_session_expiry_overflow_is_none() {
        let now = Utc::now();
        assert_eq!(session_expiry(now, 30), Some(now + TimeDelta::days(30)));
        assert_eq!(session_expiry(now, i64::MAX), None);
        assert_eq!(session_expiry(now, 1_000_000_000), None);
    }

    #[test]
    fn test_create_session_rejects_overflowing_ttl() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user_id = create_user(&mut conn, "ttl");

        let err = create_session(&mut conn, user_id, i64::MAX).unwrap_err();
        assert!(matches!(err, ApiError::SessionExpiry(i64::MAX)));

        let count: i64 = sessions::table
            .filter(sessions::user_id.eq(user_id))
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_session_lifecycle() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user_id = create_user(&mut conn, "session");

        let token = create_session(&mut conn, user_id, 30).unwrap();
        let stored: i32 = sessions::table
            .filter(sessions::token_hash.eq(hash_token(&token)))
            .select(sessions::user_id)
            .first(&mut conn)
            .unwrap();
        assert_eq!(stored, user_id);

        assert!(delete_session(&mut conn, &token).unwrap());
        assert!(!delete_session(&mut conn, &token).unwrap());
    }
}
