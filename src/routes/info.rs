use crate::language::Language;

use axum::Json;
use serde::Serialize;
use strum::IntoEnumIterator;

#[derive(Debug, Serialize)]
pub struct SupportedLanguage {
    pub code: Language,
    pub name: &'static str,
    pub dictionary: &'static str,
    pub acoustic_model: &'static str,
}

pub async fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub async fn get_supported_languages() -> Json<Vec<SupportedLanguage>> {
    Json(
        Language::iter()
            .map(|language| {
                let (dictionary, acoustic_model) = language.aligner_models();
                SupportedLanguage {
                    code: language,
                    name: language.display_name(),
                    dictionary,
                    acoustic_model,
                }
            })
            .collect(),
    )
}
