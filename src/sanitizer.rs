use crate::g2p::G2pEngines;
use crate::language::Language;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static ENGLISH_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s'.!?-]").expect("static regex"));

/// スクリプトをアライナー用の書き起こしに整える。
///
/// 採点用の音素正規化とは別物で、結果はアライナーにだけ渡す。
/// - 英語：英数字・空白・`'.!?-`以外を取り除く。
/// - 中国語：空白区切りの数字声調付きピンインにする。
/// - 日本語：Open JTalkの音素表記にする。失敗したら元のスクリプトを返す。
pub fn sanitize(script: &str, language: Language, engines: &G2pEngines) -> String {
    let script = script.trim();
    match language {
        Language::English => ENGLISH_DISALLOWED.replace_all(script, "").into_owned(),
        Language::Mandarin | Language::Japanese => engines
            .get(language)
            .transliterate(script)
            .unwrap_or_else(|e| {
                warn!("Transliteration failed for {}, using the script as is: {}", language, e);
                script.to_string()
            }),
    }
}
