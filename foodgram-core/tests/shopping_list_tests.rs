//! Shopping-list aggregation over several recipes in a cart.
//!
//! Recipes are modelled as validated ingredient lists that reference a
//! catalog; the cart rows are what the server's join query returns.

use foodgram_core::{
    aggregate, parse_catalog, render, validate_ingredients, CartIngredient, CatalogEntry,
    IngredientAmount,
};

const CATALOG: &str = r#"[
    {"name": "Salt", "measurement_unit": "g"},
    {"name": "Potato", "measurement_unit": "g"},
    {"name": "Egg", "measurement_unit": "pcs"},
    {"name": "Milk", "measurement_unit": "ml"}
]"#;

/// Expand a recipe's ingredient list into cart rows, using the catalog
/// position (1-based) as the ingredient id.
fn cart_rows(catalog: &[CatalogEntry], recipe: &[IngredientAmount]) -> Vec<CartIngredient> {
    validate_ingredients(recipe).expect("recipe should be valid");
    recipe
        .iter()
        .map(|item| {
            let entry = &catalog[(item.id - 1) as usize];
            CartIngredient {
                name: entry.name.clone(),
                measurement_unit: entry.measurement_unit.clone(),
                amount: item.amount,
            }
        })
        .collect()
}

fn amounts(pairs: &[(i32, i32)]) -> Vec<IngredientAmount> {
    pairs
        .iter()
        .map(|&(id, amount)| IngredientAmount { id, amount })
        .collect()
}

#[test]
fn salt_from_two_recipes_is_one_line() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let mashed_potatoes = amounts(&[(2, 500), (1, 5), (4, 100)]);
    let omelette = amounts(&[(3, 3), (1, 3), (4, 50)]);

    let mut rows = cart_rows(&catalog, &mashed_potatoes);
    rows.extend(cart_rows(&catalog, &omelette));

    let text = render(&aggregate(rows));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Egg (pcs) - 3",
            "Milk (ml) - 150",
            "Potato (g) - 500",
            "Salt (g) - 8",
        ]
    );
    assert_eq!(lines.iter().filter(|l| l.starts_with("Salt")).count(), 1);
}

#[test]
fn single_recipe_lines_match_its_ingredients() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let recipe = amounts(&[(1, 2), (3, 1)]);

    let lines = aggregate(cart_rows(&catalog, &recipe));

    assert_eq!(lines.len(), recipe.len());
    assert_eq!(lines[0].to_string(), "Egg (pcs) - 1");
    assert_eq!(lines[1].to_string(), "Salt (g) - 2");
}
