use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

mod model;
mod services;

use services::pipeline::{self, JobConfig};

// Local setup: where the book's catalog lives, where the review sheet goes,
// and which section gets pre-translated this session. Adjust per machine.
const PO_FILE: &str = "/home/kanta/oss/comprehensive-rust/po/ja.po";
const OUTPUT_FILE: &str = "translation_pairs.yaml";
const SECTION: &str = "src/concurrency/";
const TARGET_LANG: &str = "ja";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let api_key =
        std::env::var("GOOGLE_API_KEY").context("GOOGLE_API_KEY is not set in the environment")?;

    let report = pipeline::run(&JobConfig {
        po_file: Path::new(PO_FILE),
        output: Path::new(OUTPUT_FILE),
        section: SECTION,
        target_lang: TARGET_LANG,
        api_key: &api_key,
        skip_code_fences: true,
        verbose: false,
    })?;

    info!(
        translated = report.translated,
        output = OUTPUT_FILE,
        "review sheet written"
    );
    Ok(())
}
