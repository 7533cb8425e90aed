use crate::error::{Error, Result};

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// 採点に対応している言語。
///
/// 音素表、正規化規則、スクリプトの前処理はすべてこの値で切り替える。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize,
)]
pub enum Language {
    #[strum(serialize = "en")]
    #[serde(rename = "en")]
    English,
    #[strum(serialize = "zh")]
    #[serde(rename = "zh")]
    Mandarin,
    #[strum(serialize = "ja")]
    #[serde(rename = "ja")]
    Japanese,
}

impl Language {
    /// `en-US`や`ja_JP`のような言語タグを解釈する。大文字小文字は区別しない。
    pub fn from_tag(tag: &str) -> Result<Self> {
        let normalized = tag.trim().to_ascii_lowercase();
        Self::iter()
            .find(|language| normalized.starts_with(language.code()))
            .ok_or_else(|| Error::UnsupportedLanguage(tag.to_string()))
    }

    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Mandarin => "Mandarin Chinese",
            Self::Japanese => "Japanese",
        }
    }

    /// アライナー側で使われる（辞書, 音響モデル）の名前。
    pub fn aligner_models(self) -> (&'static str, &'static str) {
        match self {
            Self::English => ("english_us_mfa", "english_mfa"),
            Self::Mandarin => ("mandarin_mfa", "mandarin_mfa"),
            Self::Japanese => ("japanese_mfa", "japanese_mfa"),
        }
    }
}
