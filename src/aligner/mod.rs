pub mod mfa;

pub use self::mfa::MfaClient;

use crate::error::{Error, Result};
use crate::language::Language;
use crate::model::AlignmentEntry;

use async_trait::async_trait;
use derive_new::new;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_FAILURE_MESSAGE: &str = "MFA service failed";

/// アップロードされた音声。
#[derive(Clone, Debug, new)]
pub struct AudioUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// アライナーへの依頼。
#[derive(Clone, Debug, new)]
pub struct AlignRequest {
    pub audio: AudioUpload,
    /// 前処理済みの書き起こし。
    pub transcript: String,
    pub language: Language,
}

/// アライナーの応答。
#[derive(Clone, Debug, Deserialize)]
pub struct AlignerResponse {
    pub phones: Vec<String>,
    #[serde(default)]
    pub alignment: Vec<AlignmentEntry>,
}

/// 音声と書き起こしから音素ごとの時刻を求める外部サービス。
#[async_trait]
pub trait ForcedAligner: Send + Sync {
    async fn align(&self, request: AlignRequest) -> Result<AlignerResponse>;
}

/// アライナーの応答本文を解釈する。
///
/// `phones`がない場合は採点せず、応答本文をそのまま添えてエラーにする。
pub fn parse_response(payload: Value) -> Result<AlignerResponse> {
    if payload.get("phones").map_or(true, Value::is_null) {
        return Err(aligner_failed(payload));
    }
    serde_json::from_value(payload.clone()).map_err(|e| Error::AlignerFailed {
        message: format!("アライナーの応答を解釈できませんでした：{}", e),
        details: payload,
    })
}

fn aligner_failed(payload: Value) -> Error {
    let message = match payload.get("error") {
        Some(Value::String(message)) => message.clone(),
        Some(other) if !other.is_null() => other.to_string(),
        _ => DEFAULT_FAILURE_MESSAGE.to_string(),
    };
    Error::AlignerFailed {
        message,
        details: payload,
    }
}
