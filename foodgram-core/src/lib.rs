pub mod catalog;
pub mod error;
pub mod fields;
pub mod image;
pub mod recipe;
pub mod shopping_list;
pub mod short_link;
pub mod users;

pub use catalog::{parse_catalog, CatalogEntry};
pub use error::{CatalogError, ValidationError};
pub use crate::image::{decode_data_uri, validate_image, DecodedImage, MAX_FILE_SIZE};
pub use recipe::{validate_cooking_time, validate_ingredients, IngredientAmount};
pub use shopping_list::{aggregate, render, CartIngredient, ShoppingListLine};
pub use users::NewAccount;
