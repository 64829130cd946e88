use diesel::prelude::*;
use foodgram_core::{aggregate, CartIngredient, ShoppingListLine};

use crate::schema::{ingredients, recipe_ingredients, shopping_cart_items};

/// One entry per ingredient row of every recipe in the user's cart.
pub fn cart_ingredients(
    conn: &mut PgConnection,
    user_id: i32,
) -> Result<Vec<CartIngredient>, diesel::result::Error> {
    let rows: Vec<(String, String, i32)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .inner_join(
            shopping_cart_items::table
                .on(shopping_cart_items::recipe_id.eq(recipe_ingredients::recipe_id)),
        )
        .filter(shopping_cart_items::user_id.eq(user_id))
        .select((
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(name, measurement_unit, amount)| CartIngredient {
            name,
            measurement_unit,
            amount,
        })
        .collect())
}

/// The user's cart summed per (name, unit), sorted for display.
pub fn shopping_list(
    conn: &mut PgConnection,
    user_id: i32,
) -> Result<Vec<ShoppingListLine>, diesel::result::Error> {
    Ok(aggregate(cart_ingredients(conn, user_id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{create_ingredient, create_user, test_connection};
    use crate::models::NewRecipe;
    use crate::repo::recipes::create_recipe;
    use crate::repo::relations::{add, RecipeList};
    use foodgram_core::IngredientAmount;

    fn recipe_with(conn: &mut PgConnection, author_id: i32, items: &[(i32, i32)]) -> i32 {
        let items: Vec<IngredientAmount> = items
            .iter()
            .map(|&(id, amount)| IngredientAmount { id, amount })
            .collect();
        create_recipe(
            conn,
            &NewRecipe {
                author_id,
                name: "Dish",
                text: "Cook.",
                cooking_time: 5,
                image: b"img",
                image_content_type: "image/png",
            },
            &items,
        )
        .unwrap()
    }

    #[test]
    fn test_amounts_sum_across_recipes() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user = create_user(&mut conn, "shopper");
        let salt = create_ingredient(&mut conn, "Salt", "g");
        let flour = create_ingredient(&mut conn, "Flour", "g");

        let r1 = recipe_with(&mut conn, user, &[(salt, 5), (flour, 200)]);
        let r2 = recipe_with(&mut conn, user, &[(salt, 3)]);
        add(&mut conn, RecipeList::ShoppingCart, user, r1).unwrap();
        add(&mut conn, RecipeList::ShoppingCart, user, r2).unwrap();

        let lines = shopping_list(&mut conn, user).unwrap();
        let rendered: Vec<String> = lines.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["Flour (g) - 200", "Salt (g) - 8"]);
    }

    #[test]
    fn test_other_users_carts_are_ignored() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user = create_user(&mut conn, "shopper");
        let other = create_user(&mut conn, "other");
        let salt = create_ingredient(&mut conn, "Salt", "g");

        let recipe = recipe_with(&mut conn, user, &[(salt, 5)]);
        add(&mut conn, RecipeList::ShoppingCart, other, recipe).unwrap();

        assert!(shopping_list(&mut conn, user).unwrap().is_empty());
    }
}
