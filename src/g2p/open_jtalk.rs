use super::{G2p, Result as G2pResult};

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use ::open_jtalk::*;

#[derive(thiserror::Error, Debug)]
pub enum OpenJtalkError {
    #[error("open_jtalk load error")]
    Load { mecab_dict_dir: PathBuf },
    #[error("open_jtalk dictionary is not loaded")]
    NotLoaded,
    #[error("open_jtalk extract_fullcontext error")]
    ExtractFullContext {
        text: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

type Result<T> = std::result::Result<T, OpenJtalkError>;

/// テキスト解析器としてのOpen JTalk。
pub struct OpenJtalk {
    resources: Mutex<Resources>,
    dict_dir: Option<PathBuf>,
}

struct Resources {
    mecab: ManagedResource<Mecab>,
    njd: ManagedResource<Njd>,
    jpcommon: ManagedResource<JpCommon>,
}

#[allow(unsafe_code)]
unsafe impl Send for Resources {}

impl OpenJtalk {
    pub fn new_without_dic() -> Self {
        Self {
            resources: Mutex::new(Resources {
                mecab: ManagedResource::initialize(),
                njd: ManagedResource::initialize(),
                jpcommon: ManagedResource::initialize(),
            }),
            dict_dir: None,
        }
    }

    pub fn new_with_initialize(open_jtalk_dict_dir: impl AsRef<Path>) -> Result<Self> {
        let mut s = Self::new_without_dic();
        s.load(open_jtalk_dict_dir)?;
        Ok(s)
    }

    fn load(&mut self, open_jtalk_dict_dir: impl AsRef<Path>) -> Result<()> {
        let result = self
            .resources
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .mecab
            .load(open_jtalk_dict_dir.as_ref());
        if result {
            self.dict_dir = Some(open_jtalk_dict_dir.as_ref().into());
            Ok(())
        } else {
            self.dict_dir = None;
            Err(OpenJtalkError::Load {
                mecab_dict_dir: open_jtalk_dict_dir.as_ref().into(),
            })
        }
    }

    pub fn dict_loaded(&self) -> bool {
        self.dict_dir.is_some()
    }

    pub(crate) fn extract_fullcontext(&self, text: impl AsRef<str>) -> Result<Vec<String>> {
        if !self.dict_loaded() {
            return Err(OpenJtalkError::NotLoaded);
        }

        let Resources {
            mecab,
            njd,
            jpcommon,
        } = &mut *self
            .resources
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        jpcommon.refresh();
        njd.refresh();
        mecab.refresh();

        let mecab_text =
            text2mecab(text.as_ref()).map_err(|e| OpenJtalkError::ExtractFullContext {
                text: text.as_ref().into(),
                source: Some(e.into()),
            })?;
        if mecab.analysis(mecab_text) {
            njd.mecab2njd(
                mecab
                    .get_feature()
                    .ok_or(OpenJtalkError::ExtractFullContext {
                        text: text.as_ref().into(),
                        source: None,
                    })?,
                mecab.get_size(),
            );
            njd.set_pronunciation();
            njd.set_digit();
            njd.set_accent_phrase();
            njd.set_accent_type();
            njd.set_unvoiced_vowel();
            njd.set_long_vowel();
            jpcommon.njd2jpcommon(njd);
            jpcommon.make_label();
            jpcommon
                .get_label_feature_to_iter()
                .ok_or_else(|| OpenJtalkError::ExtractFullContext {
                    text: text.as_ref().into(),
                    source: None,
                })
                .map(|iter| iter.map(|s| s.to_string()).collect())
        } else {
            Err(OpenJtalkError::ExtractFullContext {
                text: text.as_ref().into(),
                source: None,
            })
        }
    }

    /// テキストの音素ラベル列。
    ///
    /// 先頭と末尾の`sil`は含まない。文中の`pau`と無声化母音（大文字）はそのまま残る。
    pub fn phonemes(&self, text: &str) -> Result<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let labels = self.extract_fullcontext(text)?;
        Ok(phonemes_from_labels(&labels))
    }
}

/// フルコンテキストラベル`p1^p2-p3+p4=p5/A:...`の現在の音素`p3`。
fn phoneme_of_label(label: &str) -> Option<&str> {
    label.split('-').nth(1)?.split('+').next()
}

fn phonemes_from_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    if labels.len() < 2 {
        return Vec::new();
    }
    labels[1..labels.len() - 1]
        .iter()
        .filter_map(|label| phoneme_of_label(label.as_ref()))
        .map(str::to_string)
        .collect()
}

impl G2p for OpenJtalk {
    fn phonemize(&self, text: &str) -> G2pResult<Vec<String>> {
        Ok(self.phonemes(text)?)
    }

    /// 音素ラベルを空白で区切ったローマ字表記。
    fn transliterate(&self, text: &str) -> G2pResult<String> {
        Ok(self.phonemes(text)?.join(" "))
    }
}
