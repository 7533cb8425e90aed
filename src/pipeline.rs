use crate::aligner::{AlignRequest, AudioUpload, ForcedAligner};
use crate::error::{Error, Result};
use crate::g2p::G2pEngines;
use crate::language::Language;
use crate::model::ScoringResult;
use crate::phoneme::{canonical_reference, normalize};
use crate::sanitizer::sanitize;
use crate::scoring::score_sequences;

use derive_new::new;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 採点の依頼。
#[derive(Clone, Debug, new)]
pub struct AssessmentRequest {
    pub script: String,
    pub language: Language,
    pub audio: AudioUpload,
}

/// G2P・アライナー・採点をまとめて実行する。
pub struct Assessor {
    engines: G2pEngines,
    aligner: Arc<dyn ForcedAligner>,
}

impl Assessor {
    pub fn new(engines: G2pEngines, aligner: Arc<dyn ForcedAligner>) -> Self {
        Self { engines, aligner }
    }

    pub async fn assess(&self, request: AssessmentRequest) -> Result<ScoringResult> {
        let AssessmentRequest {
            script,
            language,
            audio,
        } = request;
        let id = Uuid::new_v4();
        info!("[{}] Assessing {} script ({} bytes of audio)", id, language, audio.bytes.len());

        // espeak-ngの起動とOpen JTalkのロック待ちはワーカーを止めるので別スレッドで行う
        let engines = self.engines.clone();
        let (ref_phones, transcript) = tokio::task::spawn_blocking(move || {
            // 参照音素列は前処理前のスクリプトから作る
            let ref_phones = engines.reference_phonemes(&script, language);
            let transcript = sanitize(&script, language, &engines);
            (ref_phones, transcript)
        })
        .await
        .map_err(|e| Error::Internal(e.into()))?;

        let ref_tokens = canonical_reference(&ref_phones, language);
        debug!("[{}] Reference tokens: {:?}", id, ref_tokens);
        debug!("[{}] Transcript for aligner: {}", id, transcript);

        let response = self
            .aligner
            .align(AlignRequest::new(audio, transcript, language))
            .await?;

        let audio_tokens = normalize(&response.phones, language);
        debug!("[{}] Observed tokens: {:?}", id, audio_tokens);

        let scored = score_sequences(&ref_tokens, &audio_tokens);
        info!(
            "[{}] Score: {:.2} (distance {} over {})",
            id,
            scored.score_percent(),
            scored.distance(),
            scored.max_len()
        );

        Ok(ScoringResult::new(
            *scored.score_percent(),
            *scored.distance(),
            ref_phones,
            ref_tokens,
            response.phones,
            audio_tokens,
            response.alignment,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::g2p::PinyinG2p;
    use crate::testing::{FailingG2p, FakeAligner, FakeG2p};

    use serde_json::json;

    fn engines(english: Vec<&str>) -> G2pEngines {
        G2pEngines::new(
            Arc::new(FakeG2p::new(english)),
            Arc::new(PinyinG2p),
            Arc::new(FakeG2p::new(vec!["n", "e", "k", "o"])),
        )
    }

    fn request(script: &str, language: Language) -> AssessmentRequest {
        AssessmentRequest::new(
            script.to_string(),
            language,
            AudioUpload::new("utt.wav".into(), Some("audio/wav".into()), b"RIFF".to_vec()),
        )
    }

    #[tokio::test]
    async fn perfect_english_match() {
        let aligner = Arc::new(FakeAligner::new(json!({
            "phones": ["K", "AE", "T"],
            "alignment": [
                {"phone": "K", "start": 0.0, "end": 0.08},
                {"phone": "AE", "start": 0.08, "end": 0.2},
                {"phone": "T", "start": 0.2, "end": 0.27}
            ]
        })));
        let assessor = Assessor::new(engines(vec!["kˈæt"]), aligner.clone());

        let result = assessor.assess(request("Cat!", Language::English)).await.unwrap();

        assert_eq!(*result.score_percent(), 100.0);
        assert_eq!(result.ref_phones(), &vec!["kˈæt".to_string()]);
        assert_eq!(result.ref_tokens(), &vec!["k", "æ", "t"]);
        assert_eq!(result.audio_tokens(), &vec!["k", "æ", "t"]);
        assert_eq!(result.audio_phones(), &vec!["K", "AE", "T"]);
        assert_eq!(result.alignment().len(), 3);

        let requests = aligner.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].transcript, "Cat!");
        assert_eq!(requests[0].language, Language::English);
    }

    #[tokio::test]
    async fn one_substitution_scores_two_thirds() {
        let aligner = Arc::new(FakeAligner::new(json!({
            "phones": ["k", "ɪ", "t"],
            "alignment": []
        })));
        let assessor = Assessor::new(engines(vec!["kæt"]), aligner);

        let result = assessor.assess(request("cat", Language::English)).await.unwrap();

        assert_eq!(*result.distance(), 1);
        assert!((result.score_percent() - 66.67).abs() < 0.01);
    }

    #[tokio::test]
    async fn missing_phones_is_reported_without_scoring() {
        let payload = json!({"status": "error", "stderr": "mfa crashed"});
        let aligner = Arc::new(FakeAligner::new(payload.clone()));
        let assessor = Assessor::new(engines(vec!["kæt"]), aligner);

        match assessor.assess(request("cat", Language::English)).await {
            Err(Error::AlignerFailed { details, .. }) => assert_eq!(details, payload),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_reference_g2p_scores_zero() {
        let aligner = Arc::new(FakeAligner::new(json!({"phones": ["k", "æ", "t"]})));
        let engines = G2pEngines::new(
            Arc::new(FailingG2p),
            Arc::new(PinyinG2p),
            Arc::new(FailingG2p),
        );
        let assessor = Assessor::new(engines, aligner);

        let result = assessor.assess(request("cat", Language::English)).await.unwrap();

        assert!(result.ref_phones().is_empty());
        assert_eq!(*result.score_percent(), 0.0);
    }

    #[tokio::test]
    async fn mandarin_uses_pinyin_on_both_sides() {
        let aligner = Arc::new(FakeAligner::new(json!({
            "phones": ["n", "i", "t3", "h", "ao", "t3"]
        })));
        let assessor = Assessor::new(engines(vec![]), aligner.clone());

        let result = assessor.assess(request("你好", Language::Mandarin)).await.unwrap();

        assert_eq!(result.ref_phones(), &vec!["n", "i", "t3", "h", "ao", "t3"]);
        assert_eq!(result.ref_tokens(), &vec!["n", "i", "t3", "x", "au̯", "t3"]);
        assert_eq!(*result.score_percent(), 100.0);
        assert_eq!(aligner.requests()[0].transcript, "ni3 hao3");
    }

    /// 呼び出されたスレッドを記録する。
    struct ThreadRecordingG2p {
        threads: std::sync::Mutex<Vec<std::thread::ThreadId>>,
    }

    impl crate::g2p::G2p for ThreadRecordingG2p {
        fn phonemize(&self, _text: &str) -> crate::g2p::Result<Vec<String>> {
            self.threads.lock().unwrap().push(std::thread::current().id());
            Ok(vec!["kæt".to_string()])
        }
    }

    #[tokio::test]
    async fn g2p_runs_off_the_request_thread() {
        let g2p = Arc::new(ThreadRecordingG2p {
            threads: std::sync::Mutex::new(Vec::new()),
        });
        let engines = G2pEngines::new(g2p.clone(), Arc::new(PinyinG2p), Arc::new(FailingG2p));
        let aligner = Arc::new(FakeAligner::new(json!({"phones": ["k", "æ", "t"]})));
        let assessor = Assessor::new(engines, aligner);

        let result = assessor.assess(request("cat", Language::English)).await.unwrap();

        assert_eq!(*result.score_percent(), 100.0);
        let threads = g2p.threads.lock().unwrap();
        assert_eq!(threads.len(), 1);
        assert_ne!(threads[0], std::thread::current().id());
    }

    #[tokio::test]
    async fn japanese_transcript_falls_back_to_script() {
        let aligner = Arc::new(FakeAligner::new(json!({"phones": ["n", "e", "k", "o"]})));
        let engines = G2pEngines::new(
            Arc::new(FakeG2p::new(vec![])),
            Arc::new(PinyinG2p),
            Arc::new(FailingG2p),
        );
        let assessor = Assessor::new(engines, aligner.clone());

        let result = assessor.assess(request(" ねこ ", Language::Japanese)).await.unwrap();

        assert_eq!(aligner.requests()[0].transcript, "ねこ");
        assert!(result.ref_tokens().is_empty());
        assert_eq!(*result.score_percent(), 0.0);
    }
}
