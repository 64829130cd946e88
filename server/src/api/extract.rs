//! Drop-in replacements for axum's `Json`, `Path` and `Query` whose
//! rejections are `ApiError::BadRequest`, so a malformed body, path or query
//! string gets the same `{"error": ...}` 400 as any other client error.

use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::recipes::create::CreateRecipeRequest;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Flags {
        is_favorited: Option<u8>,
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/recipes",
                post(|Json(req): Json<CreateRecipeRequest>| async move { req.name }),
            )
            .route(
                "/recipes/{id}",
                get(|Path(id): Path<i32>| async move { id.to_string() }),
            )
            .route(
                "/flags",
                get(|Query(flags): Query<Flags>| async move {
                    format!("{:?}", flags.is_favorited)
                }),
            )
    }

    async fn send(request: Request<Body>) -> (StatusCode, String, String) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8_lossy(&body).into_owned())
    }

    fn error_message(body: &str) -> String {
        let value: serde_json::Value = serde_json::from_str(body).unwrap();
        value["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_missing_body_field_is_json_400() {
        let body = r#"{"ingredients": [], "image": "", "name": "Soup", "text": "Boil"}"#;
        let request = Request::post("/recipes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let (status, content_type, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type, "application/json");
        assert!(error_message(&body).contains("cooking_time"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_json_400() {
        let request = Request::post("/recipes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{"))
            .unwrap();

        let (status, content_type, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type, "application/json");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_json_400() {
        let request = Request::get("/recipes/abc").body(Body::empty()).unwrap();

        let (status, content_type, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type, "application/json");
        assert!(!error_message(&body).is_empty());
    }

    #[tokio::test]
    async fn test_bad_query_flag_is_json_400() {
        let request = Request::get("/flags?is_favorited=true")
            .body(Body::empty())
            .unwrap();

        let (status, content_type, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type, "application/json");
    }

    #[tokio::test]
    async fn test_valid_requests_pass_through() {
        let request = Request::get("/recipes/42").body(Body::empty()).unwrap();
        let (status, _, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");

        let request = Request::get("/flags?is_favorited=1")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Some(1)");
    }
}
