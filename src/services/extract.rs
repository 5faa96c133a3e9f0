use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use polib::catalog::Catalog;
use polib::po_file;
use tracing::info;

pub struct ExtractConfig<'a> {
    pub section: &'a str,
    pub skip_code_fences: bool,
    pub verbose: bool,
}

const CODE_FENCE: &str = "```";

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    po_file::parse(path)
        .map_err(|err| anyhow!("{err}"))
        .with_context(|| format!("could not parse {} as a PO file", path.display()))
}

/// Collects untranslated msgids whose first occurrence path contains the
/// section substring, in catalog order.
///
/// Empty and whitespace-only msgids never survive; msgids containing a
/// Markdown code fence survive only when `skip_code_fences` is off. Zero
/// survivors is an error: running this tool against a section with nothing
/// to translate means the section string is wrong or the work is done.
pub fn untranslated_in_section(catalog: &Catalog, cfg: &ExtractConfig) -> Result<Vec<String>> {
    let mut msgids: Vec<String> = Vec::new();

    for msg in catalog.messages() {
        // Fuzzy entries already carry a draft translation.
        if msg.is_translated() || msg.is_fuzzy() {
            continue;
        }

        // An entry can occur in several files; the first one decides its
        // section. Entries without occurrence data belong to no section.
        let first = match first_occurrence_path(msg.source()) {
            Some(p) => p,
            None => continue,
        };

        if !first.contains(cfg.section) {
            continue;
        }

        let msgid = msg.msgid();
        if msgid.trim().is_empty() {
            continue;
        }
        if cfg.skip_code_fences && msgid.contains(CODE_FENCE) {
            continue;
        }

        if cfg.verbose {
            info!(occurrence = first, "untranslated: {msgid}");
        }

        msgids.push(msgid.to_string());
    }

    if msgids.is_empty() {
        bail!(
            "no untranslated entries under {:?}; wrong section, or nothing left to translate",
            cfg.section
        );
    }

    Ok(msgids)
}

/// First token of the rendered source comment, with a trailing `:line`
/// stripped when present.
fn first_occurrence_path(source: &str) -> Option<&str> {
    let first = source.split_whitespace().next()?;
    match first.rsplit_once(':') {
        Some((path, line)) if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) => {
            Some(path)
        }
        _ => Some(first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polib::message::Message;
    use polib::metadata::CatalogMetadata;
    use pretty_assertions::assert_eq;

    fn message(source: &str, msgid: &str, msgstr: &str) -> Message {
        Message::build_singular()
            .with_source(source.to_string())
            .with_msgid(msgid.to_string())
            .with_msgstr(msgstr.to_string())
            .done()
    }

    fn catalog(entries: &[(&str, &str, &str)]) -> Catalog {
        let mut catalog = Catalog::new(CatalogMetadata::new());
        for (source, msgid, msgstr) in entries {
            catalog.append_or_update(message(source, msgid, msgstr));
        }
        catalog
    }

    fn extract(catalog: &Catalog, section: &str) -> Result<Vec<String>> {
        untranslated_in_section(
            catalog,
            &ExtractConfig {
                section,
                skip_code_fences: true,
                verbose: false,
            },
        )
    }

    #[test]
    fn keeps_matching_untranslated_entries_in_catalog_order() {
        let catalog = catalog(&[
            ("src/concurrency/intro.md:3", "Hello", ""),
            ("src/welcome.md:1", "Elsewhere", ""),
            ("src/concurrency/threads.md:10", "Threads", ""),
            ("src/concurrency/done.md:4", "Done already", "済み"),
        ]);

        let msgids = extract(&catalog, "src/concurrency/").unwrap();
        assert_eq!(msgids, vec!["Hello".to_string(), "Threads".to_string()]);
    }

    #[test]
    fn skips_whitespace_only_msgid() {
        let catalog = catalog(&[
            ("src/concurrency/intro.md:3", "  \n ", ""),
            ("src/concurrency/intro.md:9", "Real text", ""),
        ]);

        let msgids = extract(&catalog, "src/concurrency/").unwrap();
        assert_eq!(msgids, vec!["Real text".to_string()]);
    }

    #[test]
    fn code_fence_skip_is_switchable() {
        let catalog = catalog(&[
            ("src/concurrency/intro.md:3", "```rust\nfn main() {}\n```", ""),
            ("src/concurrency/intro.md:9", "Prose", ""),
        ]);

        let skipped = extract(&catalog, "src/concurrency/").unwrap();
        assert_eq!(skipped, vec!["Prose".to_string()]);

        let kept = untranslated_in_section(
            &catalog,
            &ExtractConfig {
                section: "src/concurrency/",
                skip_code_fences: false,
                verbose: false,
            },
        )
        .unwrap();
        assert_eq!(
            kept,
            vec![
                "```rust\nfn main() {}\n```".to_string(),
                "Prose".to_string()
            ]
        );
    }

    #[test]
    fn zero_matches_is_an_error() {
        let catalog = catalog(&[("src/welcome.md:1", "Elsewhere", "")]);

        let err = extract(&catalog, "src/concurrency/").unwrap_err();
        assert!(err.to_string().contains("no untranslated entries"));
    }

    #[test]
    fn entry_without_occurrences_is_skipped() {
        let catalog = catalog(&[
            ("", "Orphan", ""),
            ("src/concurrency/intro.md:3", "Hello", ""),
        ]);

        let msgids = extract(&catalog, "src/concurrency/").unwrap();
        assert_eq!(msgids, vec!["Hello".to_string()]);
    }

    #[test]
    fn only_first_occurrence_decides_the_section() {
        let catalog = catalog(&[(
            "src/welcome.md:1 src/concurrency/intro.md:3",
            "Shared heading",
            "",
        )]);

        let err = extract(&catalog, "src/concurrency/").unwrap_err();
        assert!(err.to_string().contains("no untranslated entries"));
    }

    #[test]
    fn first_occurrence_path_strips_line_numbers() {
        assert_eq!(
            first_occurrence_path("src/concurrency/intro.md:3"),
            Some("src/concurrency/intro.md")
        );
        assert_eq!(
            first_occurrence_path("src/concurrency/intro.md:3 src/other.md:7"),
            Some("src/concurrency/intro.md")
        );
        assert_eq!(first_occurrence_path("src/no-line.md"), Some("src/no-line.md"));
        assert_eq!(first_occurrence_path(""), None);
        assert_eq!(first_occurrence_path("   "), None);
    }
}
