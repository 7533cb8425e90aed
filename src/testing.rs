//! テスト用の偽G2Pと偽アライナー。

use crate::aligner::{parse_response, AlignRequest, AlignerResponse, ForcedAligner};
use crate::error::Result;
use crate::g2p::{self, G2p, G2pError};

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// 常に同じ音素列を返す。書き起こしは音素を空白で繋げたもの。
pub struct FakeG2p {
    phonemes: Vec<String>,
}

impl FakeG2p {
    pub fn new(phonemes: Vec<&str>) -> Self {
        Self {
            phonemes: phonemes.into_iter().map(str::to_string).collect(),
        }
    }
}

impl G2p for FakeG2p {
    fn phonemize(&self, _text: &str) -> g2p::Result<Vec<String>> {
        Ok(self.phonemes.clone())
    }

    fn transliterate(&self, _text: &str) -> g2p::Result<String> {
        Ok(self.phonemes.join(" "))
    }
}

/// 常に失敗する。
pub struct FailingG2p;

impl G2p for FailingG2p {
    fn phonemize(&self, _text: &str) -> g2p::Result<Vec<String>> {
        Err(G2pError::Exited("fake failure".to_string()))
    }

    fn transliterate(&self, _text: &str) -> g2p::Result<String> {
        Err(G2pError::Exited("fake failure".to_string()))
    }
}

/// 決まった応答本文を返し、受け取った依頼を記録する。
pub struct FakeAligner {
    payload: Value,
    requests: Mutex<Vec<AlignRequest>>,
}

impl FakeAligner {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<AlignRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ForcedAligner for FakeAligner {
    async fn align(&self, request: AlignRequest) -> Result<AlignerResponse> {
        self.requests.lock().unwrap().push(request);
        parse_response(self.payload.clone())
    }
}
