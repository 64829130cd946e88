pub mod extract;
pub mod ingredients;
pub mod pagination;
pub mod recipes;
pub mod short_links;
pub mod token;
pub mod users;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

use crate::models::Ingredient;

/// Largest accepted request body: a base64 data URI carrying a
/// `MAX_FILE_SIZE` image, plus room for the rest of the JSON document.
pub const MAX_REQUEST_BODY: usize = foodgram_core::MAX_FILE_SIZE.div_ceil(3) * 4 + 1024 * 1024;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Stored image bytes served with their content type. Images never change
/// in place (a new upload replaces the row), but the URL stays the same, so
/// clients must revalidate.
pub fn image_response(data: Vec<u8>, content_type: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        data,
    )
        .into_response()
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Foodgram", description = "Recipe sharing API"),
        components(schemas(ErrorResponse, Ingredient, pagination::PaginationMetadata))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        token::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        short_links::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_has_every_module() {
        let spec = openapi();
        for path in [
            "/api/auth/token/login",
            "/api/users",
            "/api/users/{id}/subscribe",
            "/api/ingredients",
            "/api/recipes/{id}",
            "/api/recipes/download_shopping_cart",
            "/s/{code}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
        assert!(spec
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
