use std::collections::HashSet;

use diesel::prelude::*;
use foodgram_core::recipe::ingredient_ids;
use foodgram_core::{validate_ingredients, IngredientAmount, ValidationError};

use crate::error::ApiError;
use crate::models::{NewRecipe, NewRecipeIngredient, RecipeChanges};
use crate::schema::{ingredients, recipe_ingredients, recipes};

/// Fail with [`ValidationError::UnknownIngredient`] for the first id that
/// has no ingredient row.
pub fn ensure_ingredients_exist(
    conn: &mut PgConnection,
    items: &[IngredientAmount],
) -> Result<(), ApiError> {
    let ids = ingredient_ids(items);

    let found: HashSet<i32> = ingredients::table
        .filter(ingredients::id.eq_any(ids.clone()))
        .select(ingredients::id)
        .load::<i32>(conn)?
        .into_iter()
        .collect();

    match ids.into_iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(ValidationError::UnknownIngredient(missing).into()),
        None => Ok(()),
    }
}

/// Delete every ingredient row of the recipe and insert `items` in their
/// place. Callers run this inside a transaction.
pub fn replace_ingredients(
    conn: &mut PgConnection,
    recipe_id: i32,
    items: &[IngredientAmount],
) -> Result<(), diesel::result::Error> {
    diesel::delete(recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)))
        .execute(conn)?;

    let rows: Vec<NewRecipeIngredient> = items
        .iter()
        .map(|item| NewRecipeIngredient {
            recipe_id,
            ingredient_id: item.id,
            amount: item.amount,
        })
        .collect();

    diesel::insert_into(recipe_ingredients::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

/// Insert a recipe and its ingredient rows in one transaction. Returns the
/// new recipe id.
pub fn create_recipe(
    conn: &mut PgConnection,
    recipe: &NewRecipe<'_>,
    items: &[IngredientAmount],
) -> Result<i32, ApiError> {
    validate_ingredients(items)?;

    conn.transaction(|conn| {
        ensure_ingredients_exist(conn, items)?;

        let recipe_id: i32 = diesel::insert_into(recipes::table)
            .values(recipe)
            .returning(recipes::id)
            .get_result(conn)?;

        replace_ingredients(conn, recipe_id, items)?;

        tracing::info!(
            recipe_id,
            author_id = recipe.author_id,
            ingredients = items.len(),
            "recipe created"
        );

        Ok(recipe_id)
    })
}

/// Apply `changes` and replace the ingredient set in one transaction.
///
/// The recipe row is locked for the duration, so concurrent updates of the
/// same recipe run one after the other. Only the author may update.
pub fn update_recipe(
    conn: &mut PgConnection,
    recipe_id: i32,
    editor_id: i32,
    changes: &RecipeChanges<'_>,
    items: &[IngredientAmount],
) -> Result<(), ApiError> {
    validate_ingredients(items)?;

    conn.transaction(|conn| {
        let author_id: i32 = recipes::table
            .find(recipe_id)
            .select(recipes::author_id)
            .for_update()
            .first(conn)
            .optional()?
            .ok_or(ApiError::NotFound("Recipe not found"))?;

        if author_id != editor_id {
            return Err(ApiError::Forbidden("Only the author can change this recipe"));
        }

        ensure_ingredients_exist(conn, items)?;

        if !changes.is_empty() {
            diesel::update(recipes::table.find(recipe_id))
                .set(changes)
                .execute(conn)?;
        }

        replace_ingredients(conn, recipe_id, items)?;

        tracing::info!(recipe_id, ingredients = items.len(), "recipe updated");

        Ok(())
    })
}

/// Delete a recipe; ingredient rows, favorites and cart entries go with it.
pub fn delete_recipe(
    conn: &mut PgConnection,
    recipe_id: i32,
    editor_id: i32,
) -> Result<(), ApiError> {
    conn.transaction(|conn| {
        let author_id: i32 = recipes::table
            .find(recipe_id)
            .select(recipes::author_id)
            .for_update()
            .first(conn)
            .optional()?
            .ok_or(ApiError::NotFound("Recipe not found"))?;

        if author_id != editor_id {
            return Err(ApiError::Forbidden("Only the author can delete this recipe"));
        }

        diesel::delete(recipes::table.find(recipe_id)).execute(conn)?;
        Ok(())
    })
}

pub fn recipe_exists(conn: &mut PgConnection, recipe_id: i32) -> Result<bool, diesel::result::Error> {
    diesel::select(diesel::dsl::exists(recipes::table.find(recipe_id))).get_result(conn)
}
