use super::{parse_response, AlignRequest, AlignerResponse, ForcedAligner};
use crate::error::{Error, Result};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Montreal Forced Alignerを包んだHTTPサービスのクライアント。
///
/// `file`・`lang`・`transcript`をmultipartで送り、`{phones, alignment}`を受け取る。
#[derive(Debug, Clone)]
pub struct MfaClient {
    client: Client,
    url: String,
}

impl MfaClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(e.into()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ForcedAligner for MfaClient {
    async fn align(&self, request: AlignRequest) -> Result<AlignerResponse> {
        let AlignRequest {
            audio,
            transcript,
            language,
        } = request;

        let part = Part::bytes(audio.bytes).file_name(audio.file_name);
        let part = match audio.content_type {
            Some(content_type) => part
                .mime_str(&content_type)
                .map_err(|e| Error::InvalidRequest(format!("Content-Typeが不正です：{}", e)))?,
            None => part,
        };
        let form = Form::new()
            .text("lang", language.code())
            .text("transcript", transcript)
            .part("file", part);

        info!("Sending alignment request to {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::AlignerFailed {
                message: format!("アライナーに接続できませんでした：{}", e),
                details: Value::Null,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Error::AlignerFailed {
            message: format!("アライナーの応答を読み込めませんでした：{}", e),
            details: Value::Null,
        })?;
        debug!("Aligner responded with {}: {}", status, body);

        let payload = serde_json::from_str(&body).unwrap_or(Value::String(body));
        parse_response(payload)
    }
}
