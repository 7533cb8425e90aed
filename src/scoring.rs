use derive_getters::Getters;
use serde::Serialize;

/// 二つの音素列を比べた結果。
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize)]
pub struct SequenceScore {
    /// 編集距離。
    distance: usize,
    /// 長い方の列の長さ。
    max_len: usize,
    /// 0〜100の一致率。
    score_percent: f64,
}

/// 音素を一単位とした編集距離（レーベンシュタイン距離）。
///
/// 挿入・削除・置換はいずれもコスト1、一致はコスト0。
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (n, m) = (a.len(), b.len());
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        dp[0][j] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[n][m]
}

/// `100 * (1 - 距離 / 長い方の長さ)`を0〜100に収めて返す。
///
/// 両方とも空の場合は正しく発音された根拠がないので0とする。
pub fn score_sequences<T: PartialEq>(reference: &[T], observed: &[T]) -> SequenceScore {
    let max_len = reference.len().max(observed.len());
    if max_len == 0 {
        return SequenceScore {
            distance: 0,
            max_len,
            score_percent: 0.0,
        };
    }
    let distance = edit_distance(reference, observed);
    let score_percent = 100.0 * (1.0 - distance as f64 / max_len as f64);
    SequenceScore {
        distance,
        max_len,
        score_percent: score_percent.clamp(0.0, 100.0),
    }
}

pub fn score<T: PartialEq>(reference: &[T], observed: &[T]) -> f64 {
    score_sequences(reference, observed).score_percent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_sequences_score_full_marks() {
        for symbols in [&["a"][..], &["k", "æ", "t"], &["tʃ", "uː", "tʃ", "uː"]] {
            let a = seq(symbols);
            assert_eq!(score(&a, &a), 100.0);
        }
    }

    #[test]
    fn empty_side_scores_zero() {
        let a = seq(&["k", "æ", "t"]);
        let empty: Vec<String> = Vec::new();
        assert_eq!(score(&a, &empty), 0.0);
        assert_eq!(score(&empty, &a), 0.0);
    }

    #[test]
    fn both_empty_is_guarded() {
        let empty: Vec<String> = Vec::new();
        let result = score_sequences(&empty, &empty);
        assert_eq!(*result.score_percent(), 0.0);
        assert!(!result.score_percent().is_nan());
        assert_eq!(*result.max_len(), 0);
    }

    #[test]
    fn transposition_is_penalized() {
        let result = score_sequences(&seq(&["a", "b"]), &seq(&["b", "a"]));
        assert_eq!(*result.distance(), 2);
        assert_eq!(*result.score_percent(), 0.0);
    }

    #[test]
    fn single_substitution() {
        let result = score_sequences(&seq(&["k", "æ", "t"]), &seq(&["k", "ɪ", "t"]));
        assert_eq!(*result.distance(), 1);
        assert_eq!(*result.max_len(), 3);
        assert!((result.score_percent() - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn symbols_are_compared_atomically() {
        // 文字単位なら"tʃ"と"t"は一部一致するが、音素単位では置換一回
        assert_eq!(edit_distance(&seq(&["tʃ"]), &seq(&["t"])), 1);
        assert_eq!(edit_distance(&seq(&["k", "i", "t", "ə", "n"]), &seq(&["s", "i", "t", "ɪ", "ŋ"])), 3);
    }

    #[test]
    fn insertions_and_deletions() {
        assert_eq!(edit_distance(&seq(&["a", "b", "c"]), &seq(&["a", "c"])), 1);
        assert_eq!(edit_distance(&seq(&["a"]), &seq(&["x", "a", "y"])), 2);
        assert!((score(&seq(&["a"]), &seq(&["x", "a", "y"])) - 100.0 / 3.0).abs() < 1e-9);
    }
}
