use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("対応していない言語です：{0}")]
    UnsupportedLanguage(String),
    #[error("リクエストが不正です：{0}")]
    InvalidRequest(String),
    #[error("{message}")]
    AlignerFailed {
        message: String,
        details: serde_json::Value,
    },
    #[error("設定が不正です")]
    Config(#[source] anyhow::Error),
    #[error("内部エラーが発生しました")]
    Internal(#[source] anyhow::Error),
}
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedLanguage(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::AlignerFailed { .. } | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let details = match self {
            Self::AlignerFailed { details, .. } => Some(details),
            _ => None,
        };
        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
