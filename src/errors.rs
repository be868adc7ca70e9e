use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Error body returned for every non-2xx response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Not Found",
    "message": "Not found: customers record 550e8400-e29b-41d4-a716-446655440000 does not exist",
    "request_id": "req-abc123xyz",
    "timestamp": "2024-12-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Unprocessable Entity")
    #[schema(example = "Not Found")]
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Field-level validation failures, present on 422 responses only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<FieldError>>,
    /// Unique request identifier for support and debugging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "req-abc123xyz")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error occurred
    pub timestamp: String,
}

/// One invalid input location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "loc": ["body", "email"],
    "msg": "value is not a valid email address",
    "type": "value_error.email"
}))]
pub struct FieldError {
    /// Path to the offending value, e.g. `["body", "email"]`
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Constraint parameters such as `{"max": 50}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub ctx: Option<Map<String, Value>>,
}

impl FieldError {
    pub fn new(loc: Vec<String>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
            ctx: None,
        }
    }

    fn from_validation(loc: Vec<String>, error: &ValidationError) -> Self {
        let ctx: Map<String, Value> = error
            .params
            .iter()
            .filter(|(key, _)| key.as_ref() != "value")
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();

        let msg = match &error.message {
            Some(message) => message.to_string(),
            None => default_message(error.code.as_ref(), &ctx),
        };

        Self {
            loc,
            msg,
            kind: format!("value_error.{}", error.code),
            ctx: (!ctx.is_empty()).then_some(ctx),
        }
    }
}

fn default_message(code: &str, ctx: &Map<String, Value>) -> String {
    match (code, ctx.get("min"), ctx.get("max")) {
        ("email", _, _) => "value is not a valid email address".to_string(),
        ("length", _, Some(max)) => format!("ensure this value has at most {} characters", max),
        ("length", Some(min), None) => {
            format!("ensure this value has at least {} characters", min)
        }
        ("range", Some(min), _) => {
            format!("ensure this value is greater than or equal to {}", min)
        }
        ("range", None, Some(max)) => format!("ensure this value is less than or equal to {}", max),
        _ => format!("invalid value ({})", code),
    }
}

fn collect_field_errors(prefix: &[String], errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let mut loc = prefix.to_vec();
        loc.push((*field).to_string());
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|e| FieldError::from_validation(loc.clone(), e)));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&loc, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let mut item_loc = loc.clone();
                    item_loc.push(index.to_string());
                    collect_field_errors(&item_loc, inner, out);
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {} invalid field(s)", .0.len())]
    ValidationError(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors(&["body".to_string()], &err, &mut fields);
        fields.sort_by(|a, b| a.loc.cmp(&b.loc));
        ServiceError::ValidationError(fields)
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "type_error.json",
            JsonRejection::JsonSyntaxError(_) => "value_error.jsondecode",
            JsonRejection::MissingJsonContentType(_) => "value_error.content_type",
            _ => "value_error.body",
        };
        ServiceError::ValidationError(vec![FieldError::new(
            vec!["body".to_string()],
            rejection.body_text(),
            kind,
        )])
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::ValidationError(vec![FieldError::new(
            vec!["path".to_string()],
            rejection.body_text(),
            "type_error.path",
        )])
    }
}

impl ServiceError {
    pub fn not_found(table: &str, id: impl std::fmt::Display) -> Self {
        ServiceError::NotFound(format!("{} record {} does not exist", table, id))
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(DbErr::RecordNotFound(_)) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Whether the request transaction may still commit when this error
    /// escapes a handler. Only errors that map to a 2xx/3xx status qualify.
    pub fn can_commit(&self) -> bool {
        let status = self.status_code();
        status.is_success() || status.is_redirection()
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(DbErr::RecordNotFound(_)) => "Record not found".to_string(),
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::ValidationError(_) => "Validation failed".to_string(),
            Self::InternalError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let detail = match &self {
            Self::ValidationError(fields) => Some(fields.clone()),
            _ => None,
        };

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            detail,
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use rstest::rstest;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Probe {
        #[validate(email, length(max = 50))]
        email: String,
        #[validate(range(min = 1))]
        quantity: i32,
    }

    #[tokio::test]
    async fn service_error_response_includes_request_id() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-123"), async {
                ServiceError::NotFound("missing".into()).into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.request_id.as_deref(), Some("req-123"));
        assert!(payload.detail.is_none());
    }

    #[rstest]
    #[case::not_found(ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND)]
    #[case::missing_row(
        ServiceError::DatabaseError(DbErr::RecordNotFound("x".into())),
        StatusCode::NOT_FOUND
    )]
    #[case::database(
        ServiceError::DatabaseError(DbErr::Custom("x".into())),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    #[case::validation(ServiceError::ValidationError(vec![]), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case::bad_request(ServiceError::BadRequest("x".into()), StatusCode::BAD_REQUEST)]
    #[case::conflict(ServiceError::Conflict("x".into()), StatusCode::CONFLICT)]
    #[case::upstream(ServiceError::ExternalServiceError("x".into()), StatusCode::BAD_GATEWAY)]
    fn service_error_status_code_mapping(#[case] err: ServiceError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[test]
    fn no_current_error_allows_commit() {
        let errors = [
            ServiceError::NotFound("x".into()),
            ServiceError::ValidationError(vec![]),
            ServiceError::BadRequest("x".into()),
            ServiceError::Conflict("x".into()),
            ServiceError::InternalError("x".into()),
            ServiceError::DatabaseError(DbErr::Custom("x".into())),
        ];
        assert!(errors.iter().all(|e| !e.can_commit()));
    }

    #[test]
    fn service_error_response_message_hides_internal_details() {
        assert_eq!(
            ServiceError::InternalError("sensitive".into()).response_message(),
            "Internal server error"
        );
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("syntax error at or near".into()))
                .response_message(),
            "Database error"
        );
        assert_eq!(
            ServiceError::NotFound("customers record 1 does not exist".into()).response_message(),
            "Not found: customers record 1 does not exist"
        );
    }

    #[test]
    fn validation_errors_become_field_errors() {
        let probe = Probe {
            email: "not-an-email".into(),
            quantity: 0,
        };
        let err: ServiceError = probe.validate().unwrap_err().into();

        let fields = match err {
            ServiceError::ValidationError(fields) => fields,
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(fields.len(), 2);

        assert_eq!(fields[0].loc, vec!["body", "email"]);
        assert_eq!(fields[0].kind, "value_error.email");
        assert_eq!(fields[0].msg, "value is not a valid email address");

        assert_eq!(fields[1].loc, vec!["body", "quantity"]);
        assert_eq!(fields[1].kind, "value_error.range");
        let ctx = fields[1].ctx.as_ref().expect("range carries its bounds");
        assert_eq!(ctx.get("min").and_then(Value::as_f64), Some(1.0));
        assert!(!ctx.contains_key("value"));
    }

    #[tokio::test]
    async fn validation_error_renders_422_with_detail() {
        let response = ServiceError::ValidationError(vec![FieldError::new(
            vec!["body".into(), "first_name".into()],
            "field required",
            "value_error.missing",
        )])
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["message"], "Validation failed");
        assert_eq!(payload["detail"][0]["loc"], json!(["body", "first_name"]));
        assert_eq!(payload["detail"][0]["type"], "value_error.missing");
        assert!(payload["detail"][0].get("ctx").is_none());
    }
}
