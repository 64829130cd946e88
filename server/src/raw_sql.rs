//! SQL fragments that Diesel's DSL can't express.
//!
//! User input only ever reaches these through `.bind()`.

use diesel::dsl::sql;
use diesel::expression::{BoxableExpression, SqlLiteral};
use diesel::pg::Pg;
use diesel::sql_types::{BigInt, Bool, Text};

use crate::schema::users;

/// `COUNT(*) OVER()`: the row count before LIMIT/OFFSET, selected next to
/// each row of a paginated query.
pub fn count_over() -> SqlLiteral<BigInt> {
    sql::<BigInt>("COUNT(*) OVER()")
}

/// `LOWER(email) = LOWER($1)`: case-insensitive email match on `users`.
pub fn email_matches<'a>(
    email: &'a str,
) -> Box<dyn BoxableExpression<users::table, Pg, SqlType = Bool> + 'a> {
    Box::new(
        sql::<Bool>("LOWER(email) = LOWER(")
            .bind::<Text, _>(email)
            .sql(")"),
    )
}
