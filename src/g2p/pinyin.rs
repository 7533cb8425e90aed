use super::{G2p, Result};

use ::pinyin::ToPinyin;
use itertools::Itertools;

/// 二文字の声母を先に置く。
const INITIALS: &[&str] = &[
    "zh", "ch", "sh", "b", "p", "m", "f", "d", "t", "n", "l", "g", "k", "h", "j", "q", "x",
    "r", "z", "c", "s", "y", "w",
];

const NEUTRAL_TONE: char = '5';

/// 漢字を数字声調付きのピンインにする。
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinG2p;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// `zhong1`のような声調付きの音節。
    Syllable(String),
    /// 漢字以外の連続した文字列。
    Other(String),
}

fn segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut other = String::new();
    for (c, pinyin) in text.chars().zip(text.to_pinyin()) {
        match pinyin {
            Some(pinyin) => {
                if !other.is_empty() {
                    segments.push(Segment::Other(std::mem::take(&mut other)));
                }
                let mut syllable = pinyin.with_tone_num_end().to_string();
                if !syllable.ends_with(|c: char| c.is_ascii_digit()) {
                    syllable.push(NEUTRAL_TONE);
                }
                segments.push(Segment::Syllable(syllable));
            }
            None => other.push(c),
        }
    }
    if !other.is_empty() {
        segments.push(Segment::Other(other));
    }
    segments
}

/// 声調付きの音節を声母・韻母・声調記号に分ける。
///
/// `zhong1`は`["zh", "ong", "t1"]`になる。`j`・`q`・`x`・`y`の後の`u`は`ü`として扱う。
fn split_syllable(syllable: &str) -> Vec<String> {
    let base = syllable.trim_end_matches(|c: char| c.is_ascii_digit());
    let tone = &syllable[base.len()..];
    let base = base.replace('v', "ü");

    let initial = INITIALS
        .iter()
        .copied()
        .find(|initial| base.starts_with(initial) && base.len() > initial.len());
    let rest = &base[initial.map_or(0, str::len)..];
    let final_ = match initial {
        Some("j" | "q" | "x" | "y") if rest.starts_with('u') => format!("ü{}", &rest[1..]),
        _ => rest.to_string(),
    };

    let mut phonemes = Vec::with_capacity(3);
    phonemes.extend(initial.map(str::to_string));
    if !final_.is_empty() {
        phonemes.push(final_);
    }
    if !tone.is_empty() {
        phonemes.push(format!("t{}", tone));
    }
    phonemes
}

impl G2p for PinyinG2p {
    fn phonemize(&self, text: &str) -> Result<Vec<String>> {
        Ok(segments(text)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Syllable(syllable) => Some(split_syllable(&syllable)),
                Segment::Other(_) => None,
            })
            .flatten()
            .collect())
    }

    fn transliterate(&self, text: &str) -> Result<String> {
        Ok(segments(text)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Syllable(syllable) => Some(syllable),
                Segment::Other(other) => {
                    let other = other.trim();
                    (!other.is_empty()).then(|| other.to_string())
                }
            })
            .join(" "))
    }
}
