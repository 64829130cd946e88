//! The per-user recipe lists: favorites and the shopping cart.
//!
//! Both are (user, recipe) pair tables with the same rules, so they share
//! one set of operations keyed by [`RecipeList`].

use std::collections::HashSet;

use diesel::prelude::*;

use super::recipes::recipe_exists;
use crate::error::ApiError;
use crate::models::{NewFavorite, NewShoppingCartItem};
use crate::schema::{favorites, shopping_cart_items};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeList {
    Favorites,
    ShoppingCart,
}

impl RecipeList {
    fn already_added(self) -> &'static str {
        match self {
            RecipeList::Favorites => "Recipe is already in favorites",
            RecipeList::ShoppingCart => "Recipe is already in the shopping cart",
        }
    }

    fn not_added(self) -> &'static str {
        match self {
            RecipeList::Favorites => "Recipe is not in favorites",
            RecipeList::ShoppingCart => "Recipe is not in the shopping cart",
        }
    }
}

/// Add the recipe to the user's list. A second add of the same pair is a
/// conflict; the pair is stored at most once.
pub fn add(
    conn: &mut PgConnection,
    list: RecipeList,
    user_id: i32,
    recipe_id: i32,
) -> Result<(), ApiError> {
    if !recipe_exists(conn, recipe_id)? {
        return Err(ApiError::NotFound("Recipe not found"));
    }

    let inserted = match list {
        RecipeList::Favorites => diesel::insert_into(favorites::table)
            .values(&NewFavorite { user_id, recipe_id })
            .on_conflict_do_nothing()
            .execute(conn)?,
        RecipeList::ShoppingCart => diesel::insert_into(shopping_cart_items::table)
            .values(&NewShoppingCartItem { user_id, recipe_id })
            .on_conflict_do_nothing()
            .execute(conn)?,
    };

    if inserted == 0 {
        return Err(ApiError::Conflict(list.already_added()));
    }

    tracing::debug!(user_id, recipe_id, ?list, "added recipe to list");
    Ok(())
}

pub fn remove(
    conn: &mut PgConnection,
    list: RecipeList,
    user_id: i32,
    recipe_id: i32,
) -> Result<(), ApiError> {
    if !recipe_exists(conn, recipe_id)? {
        return Err(ApiError::NotFound("Recipe not found"));
    }

    let deleted = match list {
        RecipeList::Favorites => diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::recipe_id.eq(recipe_id)),
        )
        .execute(conn)?,
        RecipeList::ShoppingCart => diesel::delete(
            shopping_cart_items::table
                .filter(shopping_cart_items::user_id.eq(user_id))
                .filter(shopping_cart_items::recipe_id.eq(recipe_id)),
        )
        .execute(conn)?,
    };

    if deleted == 0 {
        return Err(ApiError::NotFound(list.not_added()));
    }

    tracing::debug!(user_id, recipe_id, ?list, "removed recipe from list");
    Ok(())
}

/// Which of `recipe_ids` are on the user's list.
pub fn contained(
    conn: &mut PgConnection,
    list: RecipeList,
    user_id: i32,
    recipe_ids: &[i32],
) -> Result<HashSet<i32>, diesel::result::Error> {
    let ids: Vec<i32> = match list {
        RecipeList::Favorites => favorites::table
            .filter(favorites::user_id.eq(user_id))
            .filter(favorites::recipe_id.eq_any(recipe_ids))
            .select(favorites::recipe_id)
            .load(conn)?,
        RecipeList::ShoppingCart => shopping_cart_items::table
            .filter(shopping_cart_items::user_id.eq(user_id))
            .filter(shopping_cart_items::recipe_id.eq_any(recipe_ids))
            .select(shopping_cart_items::recipe_id)
            .load(conn)?,
    };

    Ok(ids.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{create_ingredient, create_user, test_connection};
    use crate::models::NewRecipe;
    use crate::repo::recipes::create_recipe;
    use foodgram_core::IngredientAmount;

    fn seed_recipe(conn: &mut PgConnection, author_id: i32) -> i32 {
        let salt = create_ingredient(conn, "Salt", "g");
        create_recipe(
            conn,
            &NewRecipe {
                author_id,
                name: "Soup",
                text: "Stir.",
                cooking_time: 10,
                image: b"img",
                image_content_type: "image/png",
            },
            &[IngredientAmount { id: salt, amount: 5 }],
        )
        .unwrap()
    }

    #[test]
    fn test_add_twice_conflicts_and_keeps_one_row() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user = create_user(&mut conn, "fan");
        let recipe = seed_recipe(&mut conn, user);

        for list in [RecipeList::Favorites, RecipeList::ShoppingCart] {
            add(&mut conn, list, user, recipe).unwrap();
            assert!(matches!(
                add(&mut conn, list, user, recipe),
                Err(ApiError::Conflict(_))
            ));
            assert_eq!(
                contained(&mut conn, list, user, &[recipe]).unwrap(),
                HashSet::from([recipe])
            );
        }
    }

    #[test]
    fn test_remove_absent_pair_is_not_found() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user = create_user(&mut conn, "fan");
        let recipe = seed_recipe(&mut conn, user);

        assert!(matches!(
            remove(&mut conn, RecipeList::Favorites, user, recipe),
            Err(ApiError::NotFound(_))
        ));

        add(&mut conn, RecipeList::Favorites, user, recipe).unwrap();
        remove(&mut conn, RecipeList::Favorites, user, recipe).unwrap();
        assert!(contained(&mut conn, RecipeList::Favorites, user, &[recipe])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_lists_are_independent() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user = create_user(&mut conn, "fan");
        let recipe = seed_recipe(&mut conn, user);

        add(&mut conn, RecipeList::ShoppingCart, user, recipe).unwrap();
        assert!(contained(&mut conn, RecipeList::Favorites, user, &[recipe])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_recipe_is_not_found() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user = create_user(&mut conn, "fan");

        assert!(matches!(
            add(&mut conn, RecipeList::ShoppingCart, user, i32::MAX),
            Err(ApiError::NotFound(_))
        ));
    }
}
