use crate::language::Language;

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[rustfmt::skip]
const ARPABET_TO_IPA: &[(&str, &str)] = &[
    ("AA", "ɑ"),  ("AE", "æ"),  ("AH", "ʌ"),  ("AO", "ɔ"),  ("AW", "aʊ"),
    ("AY", "aɪ"), ("B", "b"),   ("CH", "tʃ"), ("D", "d"),   ("DH", "ð"),
    ("EH", "ɛ"),  ("ER", "ɝ"),  ("EY", "eɪ"), ("F", "f"),   ("G", "ɡ"),
    ("HH", "h"),  ("IH", "ɪ"),  ("IY", "i"),  ("JH", "dʒ"), ("K", "k"),
    ("L", "l"),   ("M", "m"),   ("N", "n"),   ("NG", "ŋ"),  ("OW", "oʊ"),
    ("OY", "ɔɪ"), ("P", "p"),   ("R", "ɹ"),   ("S", "s"),   ("SH", "ʃ"),
    ("T", "t"),   ("TH", "θ"),  ("UH", "ʊ"),  ("UW", "u"),  ("V", "v"),
    ("W", "w"),   ("Y", "j"),   ("Z", "z"),   ("ZH", "ʒ"),
];

// 声母と韻母。声調記号（t1〜t5）は表に含めない。
#[rustfmt::skip]
const PINYIN_TO_IPA: &[(&str, &str)] = &[
    ("a", "a"),     ("ai", "ai̯"),   ("an", "an"),   ("ang", "ɑŋ"),  ("ao", "au̯"),
    ("e", "ɤ"),     ("ei", "ei̯"),   ("en", "ən"),   ("eng", "ɤŋ"),  ("er", "aɻ"),
    ("i", "i"),     ("ia", "ja"),   ("iao", "jau̯"), ("ian", "jɛn"), ("in", "in"),
    ("ing", "iŋ"),  ("ie", "jɛ"),   ("o", "o"),     ("ong", "ʊŋ"),  ("ou", "ou̯"),
    ("u", "u"),     ("ua", "wa"),   ("uo", "wo"),   ("un", "uən"),  ("ü", "y"),
    ("üe", "yɛ"),   ("üan", "yɛn"), ("ün", "yn"),   ("iang", "jɑŋ"), ("iong", "jʊŋ"),
    ("iu", "jou̯"),  ("uai", "wai̯"), ("uan", "wan"), ("uang", "wɑŋ"), ("ui", "wei̯"),
    ("ueng", "wɤŋ"),
    ("b", "p"),     ("p", "pʰ"),    ("m", "m"),     ("f", "f"),     ("d", "t"),
    ("t", "tʰ"),    ("n", "n"),     ("l", "l"),     ("g", "k"),     ("k", "kʰ"),
    ("h", "x"),     ("j", "tɕ"),    ("q", "tɕʰ"),   ("x", "ɕ"),     ("zh", "ʈʂ"),
    ("ch", "ʈʂʰ"),  ("sh", "ʂ"),    ("r", "ʐ"),     ("z", "ts"),    ("c", "tsʰ"),
    ("s", "s"),     ("y", "j"),     ("w", "w"),
];

// Open JTalkの音素ラベル。無声化母音（大文字）は表にない。
#[rustfmt::skip]
const JTALK_TO_IPA: &[(&str, &str)] = &[
    ("a", "a"),   ("i", "i"),   ("u", "ɯ"),   ("e", "e"),   ("o", "o"),
    ("N", "ŋ"),   ("cl", "ʔ"),  ("s", "s"),   ("sh", "ɕ"),  ("ch", "tɕ"),
    ("j", "ʑ"),   ("ts", "ts"), ("f", "ɸ"),   ("h", "h"),   ("r", "ɾ"),
    ("y", "j"),   ("w", "w"),   ("g", "g"),   ("k", "k"),   ("t", "t"),
    ("d", "d"),   ("n", "n"),   ("m", "m"),   ("b", "b"),   ("p", "p"),
    ("z", "z"),
];

type Table = HashMap<&'static str, &'static str>;

static ENGLISH: Lazy<Table> = Lazy::new(|| ARPABET_TO_IPA.iter().copied().collect());
static MANDARIN: Lazy<Table> = Lazy::new(|| PINYIN_TO_IPA.iter().copied().collect());
static JAPANESE: Lazy<Table> = Lazy::new(|| JTALK_TO_IPA.iter().copied().collect());

fn table(language: Language) -> &'static Table {
    match language {
        Language::English => &ENGLISH,
        Language::Mandarin => &MANDARIN,
        Language::Japanese => &JAPANESE,
    }
}

/// `t`の後に数字が一つ以上続く声調記号かどうか。
pub fn is_tone_marker(symbol: &str) -> bool {
    symbol
        .strip_prefix('t')
        .map_or(false, |digits| {
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        })
}

/// 表を直接引く。声調記号の扱いなど言語ごとの規則は適用しない。
pub fn get(language: Language, raw: &str) -> Option<&'static str> {
    table(language).get(raw).copied()
}

/// 生の音素記号をIPAに変換する。
///
/// 表にない記号はそのまま返す。中国語の声調記号は表を引かずにそのまま返す。
pub fn lookup(language: Language, raw: &str) -> &str {
    if language == Language::Mandarin && is_tone_marker(raw) {
        return raw;
    }
    get(language, raw).unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn unmapped_symbols_pass_through() {
        for language in Language::iter() {
            assert_eq!(lookup(language, "zzz"), "zzz");
        }
    }

    #[test]
    fn maps_each_notation() {
        assert_eq!(lookup(Language::English, "CH"), "tʃ");
        assert_eq!(lookup(Language::English, "G"), "ɡ");
        assert_eq!(lookup(Language::Mandarin, "zh"), "ʈʂ");
        assert_eq!(lookup(Language::Mandarin, "üe"), "yɛ");
        assert_eq!(lookup(Language::Mandarin, "üan"), "yɛn");
        assert_eq!(lookup(Language::Mandarin, "uang"), "wɑŋ");
        assert_eq!(lookup(Language::Japanese, "cl"), "ʔ");
        assert_eq!(lookup(Language::Japanese, "u"), "ɯ");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(lookup(Language::English, "ch"), "ch");
        assert_eq!(lookup(Language::Japanese, "A"), "A");
    }

    #[test]
    fn tone_markers_bypass_the_mandarin_table() {
        assert!(is_tone_marker("t3"));
        assert!(is_tone_marker("t12"));
        assert!(!is_tone_marker("t"));
        assert!(!is_tone_marker("ts"));
        assert!(!is_tone_marker("t3a"));

        assert_eq!(lookup(Language::Mandarin, "t3"), "t3");
        // 数字が続かない`t`は声母として引く
        assert_eq!(lookup(Language::Mandarin, "t"), "tʰ");
    }
}
