use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TranslationPair {
    pub src: String,
    pub translation: String,
}

/// Wrapper giving the review sheet its single top-level `result` key.
#[derive(Debug, Serialize)]
pub struct ReviewDoc<'a> {
    pub result: &'a [TranslationPair],
}
