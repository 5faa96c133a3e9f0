use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;

use crate::model::pair::TranslationPair;

const ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";
const SOURCE_LANG: &str = "en";

pub struct TranslateConfig<'a> {
    pub api_key: &'a str,
    pub target_lang: &'a str,
}

/// Translates each msgid sequentially, pairing it with the service's text.
/// The first failure aborts the whole run.
pub fn translate_pairs(msgids: Vec<String>, cfg: &TranslateConfig) -> Result<Vec<TranslationPair>> {
    let client = Client::new();

    let total = msgids.len();
    let mut pairs: Vec<TranslationPair> = Vec::with_capacity(total);

    for (i, msgid) in msgids.into_iter().enumerate() {
        let translation = translate_text(&client, cfg, &msgid)
            .with_context(|| format!("translating entry {} of {total}", i + 1))?;
        debug!(n = i + 1, total, "translated entry");
        pairs.push(TranslationPair {
            src: msgid,
            translation,
        });
    }

    Ok(pairs)
}

pub fn translate_text(client: &Client, cfg: &TranslateConfig, text: &str) -> Result<String> {
    let body = json!({
        "q": text,
        "source": SOURCE_LANG,
        "target": cfg.target_lang,
        "format": "text"
    });

    let resp = client
        .post(ENDPOINT)
        .query(&[("key", cfg.api_key)])
        .json(&body)
        .send()?;

    let status = resp.status();
    // Read as text first: keeps the service's message when the body is not
    // the JSON we expect.
    let text_body = resp.text()?;

    if !status.is_success() {
        bail!(extract_error_message(status, &text_body));
    }

    translated_text(&text_body)
}

fn translated_text(body: &str) -> Result<String> {
    let v: serde_json::Value = serde_json::from_str(body)?;

    v.get("data")
        .and_then(|d| d.get("translations"))
        .and_then(|t| t.get(0))
        .and_then(|t| t.get("translatedText"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("response missing data.translations[0].translatedText"))
}

fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
    }

    let trimmed = body_text.trim();
    let snippet = if trimmed.chars().count() > 400 {
        let cut: String = trimmed.chars().take(400).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    };

    format!("HTTP {}: {}", status.as_u16(), snippet)
}
