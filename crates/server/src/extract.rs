use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
};
use models::keys::{self, CanonicalKeys};
use serde::de::DeserializeOwned;

use crate::errors::JsonApiError;

/// JSON body extractor that accepts property names in any ASCII case.
pub struct CaseInsensitiveJson<T>(pub T);

fn is_json_content_type(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for CaseInsensitiveJson<T>
where
    T: DeserializeOwned + CanonicalKeys,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(&req) {
            return Err(JsonApiError::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Media Type",
                Some("expected `Content-Type: application/json`".into()),
            ));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
        let value = keys::decode::<T>(&bytes).map_err(|e| JsonApiError::bad_request(e.to_string()))?;
        Ok(Self(value))
    }
}
