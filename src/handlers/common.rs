use crate::errors::ServiceError;
use crate::ApiResponse;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

/// JSON body that has been decoded and validated.
///
/// Decoding failures and validation failures both answer 422 with field
/// level detail.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Path parameters whose parse failures render as 422 `ErrorResponse`s.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServiceError))]
pub struct ApiPath<T>(pub T);

/// 201 with the created record.
pub fn created_response<T: Serialize>(message: &str, data: T) -> Response {
    envelope(StatusCode::CREATED, message, Some(data))
}

/// 200 with a payload.
pub fn success_response<T: Serialize>(message: &str, data: T) -> Response {
    envelope(StatusCode::OK, message, Some(data))
}

/// 200 without a payload.
pub fn message_response(message: &str) -> Response {
    envelope::<()>(StatusCode::OK, message, None)
}

/// An update that carried no recognised field. The HTTP status stays 200;
/// the envelope says 400.
pub fn nothing_to_update_response() -> Response {
    let body: ApiResponse<()> = ApiResponse::new(
        StatusCode::BAD_REQUEST,
        "No data to update, please check your data.",
        None,
    );
    (StatusCode::OK, Json(body)).into_response()
}

fn envelope<T: Serialize>(status: StatusCode, message: &str, data: Option<T>) -> Response {
    (status, Json(ApiResponse::new(status, message, data))).into_response()
}
