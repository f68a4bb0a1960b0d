use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;

use crate::errors::JsonApiError;

/// `Json` with our error shape: a structurally unparseable body becomes a
/// 400 before any store is touched, instead of axum's default rejection.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(JsonApiError::new(
                StatusCode::BAD_REQUEST,
                "Malformed Input",
                Some(rejection.body_text()),
            )),
        }
    }
}
