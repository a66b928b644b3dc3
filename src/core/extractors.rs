//! Request extractors whose rejections go through `ApiError`

use crate::core::error::ApiError;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON request body
///
/// Behaves like `axum::Json`, except that an unreadable body (wrong content
/// type, malformed JSON, wrong field types) is rejected with a 400
/// `ApiError::Validation` rendered in the shared error envelope.
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     State(state): State<InvoiceAppState>,
///     JsonBody(body): JsonBody<NewInvoice>,
/// ) -> Result<impl IntoResponse, ApiError> { ... }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::validation(format!(
                "Invalid JSON body: {}",
                rejection.body_text()
            ))),
        }
    }
}
