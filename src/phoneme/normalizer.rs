use super::{inventory, tokenizer};
use crate::language::Language;

/// 生の音素列をIPAの音素列に変換する。
///
/// 失敗することはなく、入力と同じ長さの列を返す。
/// - 英語：大文字にしてから表を引く。見つからなければ元の記号のまま。
/// - 中国語：声調記号はそのまま、それ以外は表を引く。
/// - 日本語：そのまま表を引く。
pub fn normalize<S: AsRef<str>>(phonemes: &[S], language: Language) -> Vec<String> {
    phonemes
        .iter()
        .map(|phoneme| normalize_symbol(phoneme.as_ref(), language).to_string())
        .collect()
}

fn normalize_symbol(raw: &str, language: Language) -> &str {
    match language {
        Language::English => {
            inventory::get(Language::English, &raw.to_uppercase()).unwrap_or(raw)
        }
        Language::Mandarin | Language::Japanese => inventory::lookup(language, raw),
    }
}

/// G2Pが出力した参照音素列を、採点に使う音素列にする。
///
/// 英語はespeakの区切りのないIPAなので分割し、中国語と日本語は表で変換する。
pub fn canonical_reference<S: AsRef<str>>(raw: &[S], language: Language) -> Vec<String> {
    match language {
        Language::English => tokenizer::tokenize_words(raw),
        Language::Mandarin | Language::Japanese => normalize(raw, language),
    }
}
