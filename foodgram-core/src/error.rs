use thiserror::Error;

/// A request field failed a domain rule. Always a client error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Ingredients list cannot be empty")]
    NoIngredients,

    #[error("Ingredient {0} is listed more than once")]
    DuplicateIngredient(i32),

    #[error("Amount for ingredient {ingredient_id} must be at least 1")]
    AmountTooSmall { ingredient_id: i32 },

    #[error("Ingredient {0} does not exist")]
    UnknownIngredient(i32),

    #[error("Cooking time must be at least 1 minute")]
    CookingTimeTooShort,

    #[error("The ingredients field is required when updating a recipe")]
    IngredientsRequired,

    #[error("Username may contain only Latin letters, digits, '.', '_' and '-'")]
    InvalidUsername,

    #[error("{0} may contain only letters, spaces and hyphens")]
    InvalidName(&'static str),

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Malformed short link code: {0:?}")]
    MalformedShortCode(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: ValidationError,
    },
}
