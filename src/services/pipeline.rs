use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::model::pair::{ReviewDoc, TranslationPair};
use crate::services::extract::{self, ExtractConfig};
use crate::services::translate::{self, TranslateConfig};

pub struct JobConfig<'a> {
    pub po_file: &'a Path,
    pub output: &'a Path,
    pub section: &'a str,
    pub target_lang: &'a str,
    pub api_key: &'a str,
    pub skip_code_fences: bool,
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub translated: usize,
}

pub fn run(cfg: &JobConfig) -> Result<RunReport> {
    let catalog = extract::load_catalog(cfg.po_file)?;

    let msgids = extract::untranslated_in_section(
        &catalog,
        &ExtractConfig {
            section: cfg.section,
            skip_code_fences: cfg.skip_code_fences,
            verbose: cfg.verbose,
        },
    )?;
    info!(
        count = msgids.len(),
        section = cfg.section,
        "collected untranslated entries"
    );

    let pairs = translate::translate_pairs(
        msgids,
        &TranslateConfig {
            api_key: cfg.api_key,
            target_lang: cfg.target_lang,
        },
    )?;

    write_pairs(cfg.output, &pairs)?;

    Ok(RunReport {
        translated: pairs.len(),
    })
}

/// Overwrites the review sheet; the handle is dropped once the document is
/// serialized.
fn write_pairs(path: &Path, pairs: &[TranslationPair]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create {}", path.display()))?;
    serde_yaml::to_writer(file, &ReviewDoc { result: pairs })
        .with_context(|| format!("writing review sheet to {}", path.display()))?;
    Ok(())
}
