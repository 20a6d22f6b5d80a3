//! HTTP mapping for [`AssessmentError`].

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use pathway_core::AssessmentError;

/// Handler error. Every failure is answered with `{"detail": message}`.
#[derive(Debug)]
pub enum ApiError {
    Assessment(AssessmentError),
    /// The body was not the JSON shape the route expects.
    Body(JsonRejection),
    /// A path segment did not parse, e.g. a non-numeric student id.
    Path(PathRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Assessment(err) => match err {
                AssessmentError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AssessmentError::NotFound(_) | AssessmentError::NoRecords => StatusCode::NOT_FOUND,
                AssessmentError::AuthFailure => StatusCode::UNAUTHORIZED,
                AssessmentError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Path(rejection) => rejection.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Assessment(err) => err.to_string(),
            ApiError::Body(rejection) => rejection.body_text(),
            ApiError::Path(rejection) => rejection.body_text(),
        }
    }

    /// Message sent to the client. Storage failures stay in the log.
    fn detail(&self) -> String {
        match self {
            ApiError::Assessment(AssessmentError::Persistence(_)) => {
                "internal storage error".to_string()
            }
            _ => self.message(),
        }
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        ApiError::Assessment(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Path(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.message());
        }
        (status, Json(serde_json::json!({ "detail": self.detail() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_core::ValidationError;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                AssessmentError::Validation(ValidationError::BlankField("name")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AssessmentError::NotFound(4), StatusCode::NOT_FOUND),
            (AssessmentError::NoRecords, StatusCode::NOT_FOUND),
            (AssessmentError::AuthFailure, StatusCode::UNAUTHORIZED),
            (
                AssessmentError::Persistence("disk full".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn persistence_detail_is_not_leaked() {
        let err = ApiError::from(AssessmentError::Persistence("/srv/db locked".into()));
        assert_eq!(err.detail(), "internal storage error");
    }
}
