use crate::aligner::AudioUpload;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::model::{AlignmentEntry, ScoringResult};
use crate::pipeline::{AssessmentRequest, Assessor};

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    /// 小数第2位で丸めた一致率。
    pub score_percent: f64,
    pub distance: usize,
    pub ref_phones: Vec<String>,
    pub ref_tokens: Vec<String>,
    pub audio_phones: Vec<String>,
    pub audio_tokens: Vec<String>,
    pub alignment: Vec<AlignmentEntry>,
}

impl From<ScoringResult> for AssessmentResponse {
    fn from(result: ScoringResult) -> Self {
        let ScoringResult {
            score_percent,
            distance,
            ref_phones,
            ref_tokens,
            audio_phones,
            audio_tokens,
            alignment,
        } = result;
        Self {
            score_percent: (score_percent * 100.0).round() / 100.0,
            distance,
            ref_phones,
            ref_tokens,
            audio_phones,
            audio_tokens,
            alignment,
        }
    }
}

fn invalid(e: impl std::fmt::Display) -> Error {
    Error::InvalidRequest(e.to_string())
}

pub async fn post_assess_pronunciation(
    State(assessor): State<Arc<Assessor>>,
    mut multipart: Multipart,
) -> Result<Json<AssessmentResponse>> {
    let mut audio = None;
    let mut script = None;
    let mut lang = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("audio.wav").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(invalid)?;
                audio = Some(AudioUpload::new(file_name, content_type, bytes.to_vec()));
            }
            Some("script") => script = Some(field.text().await.map_err(invalid)?),
            Some("lang") => lang = Some(field.text().await.map_err(invalid)?),
            _ => {}
        }
    }

    let language = Language::from_tag(lang.as_deref().unwrap_or(DEFAULT_LANGUAGE))?;
    let script = script.ok_or_else(|| invalid("scriptがありません"))?;
    let audio = audio.ok_or_else(|| invalid("fileがありません"))?;

    let result = assessor
        .assess(AssessmentRequest::new(script, language, audio))
        .await?;

    Ok(Json(result.into()))
}
