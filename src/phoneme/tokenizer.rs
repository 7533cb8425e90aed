use itertools::Itertools;
use once_cell::sync::Lazy;
use std::cmp::Reverse;

#[rustfmt::skip]
const IPA_PHONEMES: &[&str] = &[
    "tʃ", "dʒ", "uː", "iː", "eɪ", "aɪ", "oʊ", "aʊ", "ɔɪ",
    "ɑː", "ɜː", "ɔː", "ʊə", "ɪə", "eə",
    "p", "b", "t", "d", "k", "g", "f", "v", "θ", "ð", "s", "z",
    "ʃ", "ʒ", "h", "m", "n", "ŋ", "l", "r", "j", "w",
    "æ", "ʌ", "ɪ", "ʊ", "ɛ", "ə", "ɔ", "ɒ", "u", "i",
    // ARPABET表の出力先で、上の一覧にないもの
    "ɡ", "ɹ", "ɝ", "ɚ", "ɑ",
];

/// 長いものから順に並べた記号一覧。同じ長さの中では元の順序を保つ。
static ALPHABET: Lazy<Vec<&'static str>> = Lazy::new(|| {
    IPA_PHONEMES
        .iter()
        .copied()
        .sorted_by_key(|symbol| Reverse(symbol.chars().count()))
        .collect()
});

/// 区切りのないIPA文字列を音素に分割する。
///
/// 各位置で最長一致する記号を採用し、どの記号にも一致しない文字は捨てる。
pub fn tokenize(ipa: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = ipa;
    while let Some(c) = rest.chars().next() {
        match ALPHABET.iter().find(|symbol| rest.starts_with(**symbol)) {
            Some(symbol) => {
                tokens.push(symbol.to_string());
                rest = &rest[symbol.len()..];
            }
            None => rest = &rest[c.len_utf8()..],
        }
    }
    tokens
}

/// 単語ごとに[`tokenize`]して連結する。
pub fn tokenize_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words
        .iter()
        .flat_map(|word| tokenize(word.as_ref()))
        .collect()
}
