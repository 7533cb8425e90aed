use super::{G2p, G2pError, Result};

use std::io::Write as _;
use std::process::{Command, Stdio};
use tracing::debug;

/// espeak-ngで英語をIPAにする。
#[derive(Debug, Clone)]
pub struct EspeakG2p {
    command: String,
    voice: String,
}

impl EspeakG2p {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            voice: "en-us".to_string(),
        }
    }
}

impl G2p for EspeakG2p {
    fn phonemize(&self, text: &str) -> Result<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        // テキストが`-`で始まってもオプション扱いされないよう、標準入力から渡す
        let mut child = Command::new(&self.command)
            .args(["-q", "--ipa", "--stdin", "-v", self.voice.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(G2pError::Spawn)?;
        // 書き込みに失敗しても子プロセスは回収する
        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| stdin.write_all(text.as_bytes()));
        let output = child.wait_with_output().map_err(G2pError::Spawn)?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if let Err(e) = written {
            return Err(G2pError::Exited(format!("標準入力に書き込めませんでした（{}）{}", e, stderr)));
        }
        if !output.status.success() {
            return Err(G2pError::Exited(stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("espeak-ng output: {}", stdout.trim());
        Ok(parse_ipa_output(&stdout))
    }
}

/// espeak-ngの出力を単語ごとに分け、強勢記号と連結記号を取り除く。
fn parse_ipa_output(output: &str) -> Vec<String> {
    output
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !matches!(c, 'ˈ' | 'ˌ' | '\u{0361}' | '\u{035C}' | '‿'))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect()
}
