//! Analysis backend boundary
//!
//! The backend is an external collaborator consumed over a JSON
//! request/response boundary. [`AnalysisBackend`] is the seam; the session
//! and cache only ever see the trait, so tests drive them with in-process
//! fakes and non-HTTP deployments can supply their own transport.

use crate::error::{ClientError, Result};
use jiedu_core::CharacterAnnotation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Full analysis of one sentence, from `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// The analyzed text as echoed by the backend.
    pub original: String,
    /// Pinyin for the whole text.
    pub pinyin: String,
    /// Sentence-level translation.
    pub translation: String,
    /// Flat ordered per-character annotations, punctuation included.
    pub character_analysis: Vec<CharacterAnnotation>,
}

/// Detected or requested Chinese script variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    /// Traditional characters
    Traditional,
    /// Simplified characters
    Simplified,
    /// A mix of both
    Mixed,
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptType::Traditional => write!(f, "traditional"),
            ScriptType::Simplified => write!(f, "simplified"),
            ScriptType::Mixed => write!(f, "mixed"),
        }
    }
}

/// Aggregate dictionary counts from `GET /dictionary/stats`.
///
/// Informational only; nothing in the core depends on these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryStats {
    /// Distinct head words.
    #[serde(default)]
    pub total_words: usize,
    /// Total dictionary entries.
    #[serde(default)]
    pub total_entries: usize,
    /// Words carrying more than one pinyin reading.
    #[serde(default)]
    pub words_with_multiple_pinyin: usize,
    /// Simplified-to-traditional mappings.
    #[serde(default)]
    pub simplified_mappings: usize,
    /// Traditional-to-simplified mappings.
    #[serde(default)]
    pub traditional_mappings: usize,
}

/// The external analysis/translation service.
#[async_trait::async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Analyze a sentence into pinyin, translation and per-character detail.
    async fn analyze(&self, text: &str) -> Result<AnalysisResponse>;

    /// Translate a batch of words/characters.
    async fn translate_batch(&self, items: &[String]) -> Result<HashMap<String, String>>;

    /// Detect the script variant of a text.
    async fn detect_script(&self, text: &str) -> Result<ScriptType>;

    /// Convert a text between script variants.
    async fn convert_script(&self, text: &str, to: ScriptType) -> Result<String>;

    /// Fetch aggregate dictionary statistics.
    async fn dictionary_stats(&self) -> Result<DictionaryStats>;
}

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct TranslateBatchRequest<'a> {
    items: &'a [String],
}

#[derive(Serialize)]
struct ConvertScriptRequest<'a> {
    text: &'a str,
    #[serde(rename = "toType")]
    to_type: ScriptType,
}

#[derive(Deserialize)]
struct TranslateBatchResponse {
    translations: HashMap<String, String>,
}

#[derive(Deserialize)]
struct DetectScriptResponse {
    #[serde(rename = "scriptType")]
    script_type: ScriptType,
}

#[derive(Deserialize)]
struct ConvertScriptResponse {
    #[serde(rename = "convertedText")]
    converted_text: String,
}

/// HTTP implementation of [`AnalysisBackend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client for the given base URL
    /// (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, "issuing backend request");
        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, "issuing backend request");
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "backend returned non-success");
            return Err(ClientError::Unavailable {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze(&self, text: &str) -> Result<AnalysisResponse> {
        self.post_json("analyze", &TextRequest { text }).await
    }

    async fn translate_batch(&self, items: &[String]) -> Result<HashMap<String, String>> {
        let response: TranslateBatchResponse = self
            .post_json("translate-batch", &TranslateBatchRequest { items })
            .await?;
        Ok(response.translations)
    }

    async fn detect_script(&self, text: &str) -> Result<ScriptType> {
        let response: DetectScriptResponse =
            self.post_json("detect-script", &TextRequest { text }).await?;
        Ok(response.script_type)
    }

    async fn convert_script(&self, text: &str, to: ScriptType) -> Result<String> {
        let response: ConvertScriptResponse = self
            .post_json("convert-script", &ConvertScriptRequest { text, to_type: to })
            .await?;
        Ok(response.converted_text)
    }

    async fn dictionary_stats(&self) -> Result<DictionaryStats> {
        self.get_json("dictionary/stats").await
    }
}
