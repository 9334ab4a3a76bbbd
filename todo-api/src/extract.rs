/// Request extractors
///
/// - [`ValidatedJson`]: JSON body that also passes `validator` rules
/// - [`Pagination`]: `?limit=&offset=` query parameters
/// - [`IdPath`]: a single UUID path segment
/// - [`trimmed`]: serde helper that trims a string field before validation

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// JSON body deserialized and validated
///
/// Malformed JSON, a wrong content type, and failed rules all become 400s in
/// the API's error format.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// `#[serde(deserialize_with = "trimmed")]`: strips surrounding whitespace
/// so length rules see the value that will be stored
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Raw query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Clamped page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Limit is clamped to `1..=MAX_LIMIT`, negative offsets become 0
    pub fn from_params(params: PaginationParams) -> Self {
        Self {
            limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: params.offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_params(PaginationParams::default())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        Ok(Self::from_params(params))
    }
}

/// Entity id from the path, 400 if it isn't a UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest("Invalid id: expected a UUID".to_string()))?;

        Ok(IdPath(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest};

    #[derive(Debug, Deserialize, Validate)]
    struct NewTodo {
        #[validate(length(min = 1, message = "Text must not be empty"))]
        text: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct NewName {
        #[serde(deserialize_with = "trimmed")]
        #[validate(length(min = 1, message = "Name must not be empty"))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_validated_json_accepts_valid_body() {
        let ValidatedJson(body) =
            ValidatedJson::<NewTodo>::from_request(json_request(r#"{"text":"hi"}"#), &())
                .await
                .unwrap();

        assert_eq!(body.text, "hi");
    }

    #[tokio::test]
    async fn test_validated_json_rejects_rule_violation() {
        let err = ValidatedJson::<NewTodo>::from_request(json_request(r#"{"text":""}"#), &())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_trimmed_field_is_validated_after_trimming() {
        let ValidatedJson(body) =
            ValidatedJson::<NewName>::from_request(json_request(r#"{"name":"  bob "}"#), &())
                .await
                .unwrap();
        assert_eq!(body.name, "bob");

        let err = ValidatedJson::<NewName>::from_request(json_request(r#"{"name":"   "}"#), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_validated_json_rejects_malformed_json() {
        let err = ValidatedJson::<NewTodo>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_validated_json_rejects_missing_content_type() {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"text":"hi"}"#))
            .unwrap();

        let err = ValidatedJson::<NewTodo>::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_pagination_defaults_and_clamping() {
        assert_eq!(
            Pagination::default(),
            Pagination {
                limit: DEFAULT_LIMIT,
                offset: 0
            }
        );

        let page = Pagination::from_params(PaginationParams {
            limit: Some(1000),
            offset: Some(-5),
        });
        assert_eq!(page, Pagination { limit: MAX_LIMIT, offset: 0 });

        let page = Pagination::from_params(PaginationParams {
            limit: Some(0),
            offset: Some(20),
        });
        assert_eq!(page, Pagination { limit: 1, offset: 20 });
    }

    #[tokio::test]
    async fn test_pagination_from_query() {
        let (mut parts, _) = HttpRequest::builder()
            .uri("/todo/?limit=5&offset=10")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let page = Pagination::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(page, Pagination { limit: 5, offset: 10 });
    }

    #[tokio::test]
    async fn test_pagination_rejects_non_numeric() {
        let (mut parts, _) = HttpRequest::builder()
            .uri("/todo/?limit=lots")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        assert!(matches!(
            Pagination::from_request_parts(&mut parts, &()).await,
            Err(ApiError::BadRequest(_))
        ));
    }
}
