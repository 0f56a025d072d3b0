use crate::error::{RankError, Result};
use serde::{Deserialize, Serialize};

/// Controls how documents are split into terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub lowercase: bool,
    /// Apply NFKC before splitting, folding ligatures and full-width forms that PDF text often carries.
    pub unicode_normalize: bool,
    /// Tokens shorter than this many characters are dropped.
    pub min_token_len: usize,
    pub remove_stopwords: bool,
    pub stem: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self { lowercase: true, unicode_normalize: true, min_token_len: 1, remove_stopwords: false, stem: false }
    }
}

/// Everything a ranking call needs besides its documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    pub tokenizer: TokenizerConfig,
    /// idf = ln((1 + n) / (1 + df)) + 1 when set, ln(n / df) + 1 otherwise.
    pub smooth_idf: bool,
    /// tf = 1 + ln(count) instead of the raw count.
    pub sublinear_tf: bool,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self { tokenizer: TokenizerConfig::default(), smooth_idf: true, sublinear_tf: false }
    }
}

impl RankerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tokenizer.min_token_len == 0 {
            return Err(RankError::InvalidInput("min_token_len must be at least 1".into()));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RankerConfig = serde_json::from_str(json)
            .map_err(|e| RankError::InvalidInput(format!("ranker config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
