use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/* 各フィールドのjsonフィールド名はsnake_caseとする*/

/// アライナーが返す、音素一つ分の区間。
#[derive(Clone, Debug, PartialEq, new, Getters, Deserialize, Serialize)]
pub struct AlignmentEntry {
    /// 音素ラベル。
    pub phone: String,
    /// 開始時刻（秒）。
    pub start: f64,
    /// 終了時刻（秒）。
    pub end: f64,
}

/// 採点結果。リクエストごとに一度だけ作られる。
#[allow(clippy::too_many_arguments)]
#[derive(Clone, Debug, new, Getters, Serialize)]
pub struct ScoringResult {
    /// 0〜100の一致率。丸めていない値。
    pub score_percent: f64,
    /// 参照音素列と観測音素列の編集距離。
    pub distance: usize,
    /// G2Pが出力した参照音素列。
    pub ref_phones: Vec<String>,
    /// 採点に使った参照側のIPA音素列。
    pub ref_tokens: Vec<String>,
    /// アライナーが返した音素列。
    pub audio_phones: Vec<String>,
    /// 採点に使った観測側のIPA音素列。
    pub audio_tokens: Vec<String>,
    /// アライナーが返した区間情報。採点には使わない。
    pub alignment: Vec<AlignmentEntry>,
}
