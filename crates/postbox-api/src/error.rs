use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use postbox_types::api::{ErrorsResponse, Violation};

pub const STORE_FAILURE_BODY: &str = "Error submitting message";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("submission rejected with {} violation(s)", .0.len())]
    Invalid(Vec<Violation>),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("failed to insert into database: {0:#}")]
    Store(#[from] anyhow::Error),

    #[error("database task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorsResponse { errors })).into_response()
            }
            ApiError::MalformedBody(reason) => {
                debug!("{}", reason);
                (StatusCode::BAD_REQUEST, "Malformed request body").into_response()
            }
            other => {
                error!("{}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, STORE_FAILURE_BODY).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use postbox_db::Database;
    use postbox_types::models::NewMessage;

    async fn body_text(resp: Response) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn failed_insert_maps_to_store_error_and_500() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| Ok(conn.execute_batch("DROP TABLE messages")?)).unwrap();
        let msg = NewMessage {
            name: "Ann".into(),
            email: "x@y.com".into(),
            message: "Hi".into(),
        };

        let err = ApiError::from(db.insert_message(&msg).unwrap_err());
        assert!(matches!(err, ApiError::Store(_)));
        let logged = err.to_string();
        assert!(logged.starts_with("failed to insert into database: "), "{logged}");
        assert!(logged.contains("no such table: messages"), "{logged}");

        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(resp).await, STORE_FAILURE_BODY);
    }

    #[tokio::test]
    async fn unreachable_store_maps_to_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::connect(dir.path());
        let msg = NewMessage {
            name: "Ann".into(),
            email: "x@y.com".into(),
            message: "Hi".into(),
        };

        let err = ApiError::from(db.insert_message(&msg).unwrap_err());
        assert!(matches!(err, ApiError::Store(_)));
        assert!(err.to_string().starts_with("failed to insert into database: "));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn malformed_body_is_a_400() {
        let resp = ApiError::MalformedBody("expected value".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "Malformed request body");
    }
}
