//! Aggregation of a user's cart into a printable shopping list.

use std::collections::BTreeMap;
use std::fmt;

/// Download name for the rendered list.
pub const FILENAME: &str = "shopping_list.txt";

/// One recipe-ingredient row from a recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartIngredient {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Total amount of one (name, unit) group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

impl fmt::Display for ShoppingListLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.measurement_unit, self.total)
    }
}

/// Group rows by (name, unit) and sum their amounts.
///
/// Lines come out sorted by name, then unit. The same ingredient in two
/// different units stays on two lines.
pub fn aggregate<I>(rows: I) -> Vec<ShoppingListLine>
where
    I: IntoIterator<Item = CartIngredient>,
{
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for row in rows {
        *totals.entry((row.name, row.measurement_unit)).or_insert(0) += i64::from(row.amount);
    }

    totals
        .into_iter()
        .map(|((name, measurement_unit), total)| ShoppingListLine {
            name,
            measurement_unit,
            total,
        })
        .collect()
}

/// One line per group, newline-separated, no trailing newline.
pub fn render(lines: &[ShoppingListLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, unit: &str, amount: i32) -> CartIngredient {
        CartIngredient {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }

    #[test]
    fn test_sums_same_name_and_unit() {
        let lines = aggregate(vec![row("Salt", "g", 5), row("Salt", "g", 3)]);
        assert_eq!(render(&lines), "Salt (g) - 8");
    }

    #[test]
    fn test_keeps_units_apart() {
        let lines = aggregate(vec![row("Milk", "ml", 200), row("Milk", "cup", 1)]);
        assert_eq!(lines.len(), 2);
        assert_eq!(render(&lines), "Milk (cup) - 1\nMilk (ml) - 200");
    }

    #[test]
    fn test_sorted_by_name() {
        let lines = aggregate(vec![
            row("Sugar", "g", 10),
            row("Eggs", "pcs", 2),
            row("Flour", "g", 300),
        ]);
        let names: Vec<_> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "Flour", "Sugar"]);
    }

    #[test]
    fn test_empty_cart_renders_empty() {
        assert_eq!(render(&aggregate(Vec::new())), "");
    }

    #[test]
    fn test_total_does_not_overflow_i32() {
        let lines = aggregate(vec![row("Water", "ml", i32::MAX), row("Water", "ml", 1)]);
        assert_eq!(lines[0].total, i64::from(i32::MAX) + 1);
    }
}
