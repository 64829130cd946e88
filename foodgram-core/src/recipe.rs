//! Rules for recipe fields and the recipe's ingredient list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::fields::{require_text, RECIPE_NAME_MAX_LENGTH};

pub const MIN_COOKING_TIME: i32 = 1;
pub const MIN_AMOUNT: i32 = 1;

/// One entry of a submitted ingredient list: how much of which ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAmount {
    /// Ingredient id
    pub id: i32,
    pub amount: i32,
}

/// Check a submitted ingredient list: non-empty, each ingredient at most
/// once, every amount at least [`MIN_AMOUNT`].
///
/// Whether the ids refer to existing ingredients is checked by the caller
/// against the store.
pub fn validate_ingredients(items: &[IngredientAmount]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::NoIngredients);
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(ValidationError::DuplicateIngredient(item.id));
        }
        if item.amount < MIN_AMOUNT {
            return Err(ValidationError::AmountTooSmall {
                ingredient_id: item.id,
            });
        }
    }

    Ok(())
}

pub fn validate_cooking_time(minutes: i32) -> Result<(), ValidationError> {
    if minutes < MIN_COOKING_TIME {
        return Err(ValidationError::CookingTimeTooShort);
    }
    Ok(())
}

/// Returns the trimmed recipe name.
pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    require_text("name", name, Some(RECIPE_NAME_MAX_LENGTH))
}

/// Returns the trimmed recipe text.
pub fn validate_text(text: &str) -> Result<&str, ValidationError> {
    require_text("text", text, None)
}

/// Ingredient ids of a validated list, in submission order.
pub fn ingredient_ids(items: &[IngredientAmount]) -> Vec<i32> {
    items.iter().map(|item| item.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, amount: i32) -> IngredientAmount {
        IngredientAmount { id, amount }
    }

    #[test]
    fn test_accepts_distinct_ingredients() {
        assert!(validate_ingredients(&[item(1, 2), item(2, 1)]).is_ok());
    }

    #[test]
    fn test_rejects_empty_list() {
        assert_eq!(
            validate_ingredients(&[]),
            Err(ValidationError::NoIngredients)
        );
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        assert_eq!(
            validate_ingredients(&[item(7, 1), item(3, 2), item(7, 5)]),
            Err(ValidationError::DuplicateIngredient(7))
        );
    }

    #[test]
    fn test_rejects_zero_amount() {
        assert_eq!(
            validate_ingredients(&[item(1, 0)]),
            Err(ValidationError::AmountTooSmall { ingredient_id: 1 })
        );
    }

    #[test]
    fn test_cooking_time_bounds() {
        assert!(validate_cooking_time(1).is_ok());
        assert_eq!(
            validate_cooking_time(0),
            Err(ValidationError::CookingTimeTooShort)
        );
        assert_eq!(
            validate_cooking_time(-5),
            Err(ValidationError::CookingTimeTooShort)
        );
    }

    #[test]
    fn test_name_length_limit() {
        let long = "a".repeat(RECIPE_NAME_MAX_LENGTH + 1);
        assert!(validate_name(&long).is_err());
        assert_eq!(validate_name(" Борщ "), Ok("Борщ"));
    }
}
