pub mod assess;
pub mod info;

use crate::pipeline::Assessor;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// アップロードできる音声の上限。
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub fn router(assessor: Arc<Assessor>) -> Router {
    Router::new()
        .route("/", get(get_index))
        .route("/version", get(info::get_version))
        .route("/supported_languages", get(info::get_supported_languages))
        .route(
            "/assess_pronunciation",
            post(assess::post_assess_pronunciation),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(assessor)
}

async fn get_index() -> &'static str {
    "OK"
}
