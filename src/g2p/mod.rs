pub mod espeak;
pub mod open_jtalk;
pub mod pinyin;

pub use self::espeak::EspeakG2p;
pub use self::open_jtalk::{OpenJtalk, OpenJtalkError};
pub use self::pinyin::PinyinG2p;

use crate::language::Language;

use std::sync::Arc;
use tracing::warn;

#[derive(thiserror::Error, Debug)]
pub enum G2pError {
    #[error("espeak-ngを起動できませんでした")]
    Spawn(#[source] std::io::Error),
    #[error("espeak-ngが異常終了しました：{0}")]
    Exited(String),
    #[error(transparent)]
    OpenJtalk(#[from] OpenJtalkError),
}

pub type Result<T> = std::result::Result<T, G2pError>;

/// 書記素から音素への変換器。
pub trait G2p: Send + Sync {
    /// テキストを変換器固有の表記の音素列にする。
    fn phonemize(&self, text: &str) -> Result<Vec<String>>;

    /// アライナーに渡す書き起こしを作る。既定では何もしない。
    fn transliterate(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// 言語ごとのG2P。
#[derive(Clone)]
pub struct G2pEngines {
    english: Arc<dyn G2p>,
    mandarin: Arc<dyn G2p>,
    japanese: Arc<dyn G2p>,
}

impl G2pEngines {
    pub fn new(english: Arc<dyn G2p>, mandarin: Arc<dyn G2p>, japanese: Arc<dyn G2p>) -> Self {
        Self {
            english,
            mandarin,
            japanese,
        }
    }

    pub fn get(&self, language: Language) -> &dyn G2p {
        match language {
            Language::English => self.english.as_ref(),
            Language::Mandarin => self.mandarin.as_ref(),
            Language::Japanese => self.japanese.as_ref(),
        }
    }

    /// 参照音素列を得る。変換に失敗した場合は空の列を返す。
    pub fn reference_phonemes(&self, text: &str, language: Language) -> Vec<String> {
        self.get(language).phonemize(text).unwrap_or_else(|e| {
            warn!("G2P failed for {}: {}", language, e);
            Vec::new()
        })
    }
}
