//! Batch conversion of a `wiki.d` directory.
//!
//! Records are parsed in parallel with rayon, then written in parallel once
//! every output path has a single owner. A failing file is recorded in the
//! report and never aborts the batch.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::convert::ConvertOptions;
use crate::detect::is_page_record;
use crate::error::{Error, Result};
use crate::model::PageRecord;
use crate::parser::RecordParser;
use crate::render::{output_path, write_page, WriteOptions};

/// Outcome of a directory conversion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Written output files
    pub converted: Vec<PathBuf>,

    /// Input files that are not page records
    pub skipped: Vec<PathBuf>,

    /// Input files that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// Total number of input files looked at.
    pub fn total(&self) -> usize {
        self.converted.len() + self.skipped.len() + self.failed.len()
    }

    /// Whether every page record converted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

enum Outcome {
    Converted(PathBuf),
    Skipped(PathBuf),
    Failed(PathBuf, String),
}

/// A parsed record waiting to be written.
struct PendingPage {
    source: PathBuf,
    target: PathBuf,
    record: PageRecord,
}

/// Convert a single page record file and write it below `output_dir`.
///
/// Returns the written path.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    options: &ConvertOptions,
    write_options: &WriteOptions,
) -> Result<PathBuf> {
    let record = RecordParser::open(input.as_ref())?.parse()?;
    write_page(output_dir.as_ref(), &record, options, write_options)
}

/// List the regular, non-hidden files of a directory in name order.
///
/// Deleted page copies (`Group.Page,del-<timestamp>`) are left out.
pub fn list_input_files<P: AsRef<Path>>(input_dir: P) -> Result<Vec<PathBuf>> {
    let input_dir = input_dir.as_ref();
    if !input_dir.is_dir() {
        return Err(Error::Other(format!(
            "Not a directory: {}",
            input_dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || is_deleted_copy(&name) || !entry.file_type()?.is_file() {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}

/// PmWiki keeps a deleted page as `Group.Page,del-<timestamp>`.
fn is_deleted_copy(file_name: &str) -> bool {
    file_name.contains(",del-")
}

/// Keep one page per output path: the one with the newest `time`. On a tie
/// the first in file order wins. Returns the kept pages and the superseded
/// ones.
fn select_newest(pages: Vec<PendingPage>) -> (Vec<PendingPage>, Vec<PendingPage>) {
    let mut kept: Vec<PendingPage> = Vec::with_capacity(pages.len());
    let mut by_target: HashMap<PathBuf, usize> = HashMap::new();
    let mut superseded = Vec::new();

    for page in pages {
        match by_target.get(&page.target) {
            Some(&index) => {
                if page.record.metadata.updated > kept[index].record.metadata.updated {
                    superseded.push(std::mem::replace(&mut kept[index], page));
                } else {
                    superseded.push(page);
                }
            }
            None => {
                by_target.insert(page.target.clone(), kept.len());
                kept.push(page);
            }
        }
    }
    (kept, superseded)
}

/// Convert every page record directly inside `input_dir` (non-recursive) into
/// per-site directories below `output_dir`.
pub fn convert_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    options: &ConvertOptions,
    write_options: &WriteOptions,
) -> Result<BatchReport> {
    convert_directory_with_progress(input_dir, output_dir, options, write_options, |_| {})
}

/// Like [`convert_directory`], calling `on_file` once per input file as it
/// finishes. The callback may run on any worker thread.
pub fn convert_directory_with_progress<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &ConvertOptions,
    write_options: &WriteOptions,
    on_file: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&Path) + Sync,
{
    let files = list_input_files(&input_dir)?;
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    log::info!(
        "Converting {} files from {}",
        files.len(),
        input_dir.as_ref().display()
    );

    let mut outcomes = Vec::with_capacity(files.len());
    let mut pending = Vec::new();

    let scanned: Vec<std::result::Result<PendingPage, Outcome>> = files
        .par_iter()
        .map(|path| {
            if !is_page_record(path) {
                log::warn!("Skipping {}: not a page record", path.display());
                return Err(Outcome::Skipped(path.clone()));
            }
            match RecordParser::open(path).and_then(|parser| parser.parse()) {
                Ok(record) => Ok(PendingPage {
                    source: path.clone(),
                    target: output_path(output_dir, &record.metadata, write_options),
                    record,
                }),
                Err(e) => {
                    log::warn!("Failed to convert {}: {}", path.display(), e);
                    Err(Outcome::Failed(path.clone(), e.to_string()))
                }
            }
        })
        .collect();

    for (path, scan) in files.iter().zip(scanned) {
        match scan {
            Ok(page) => pending.push(page),
            Err(outcome) => {
                on_file(path);
                outcomes.push(outcome);
            }
        }
    }

    let (pages, superseded) = select_newest(pending);
    for page in superseded {
        log::warn!(
            "Skipping {}: {} is written from a newer record",
            page.source.display(),
            page.target.display()
        );
        on_file(&page.source);
        outcomes.push(Outcome::Skipped(page.source));
    }

    let written: Vec<Outcome> = pages
        .par_iter()
        .map(|page| {
            let outcome = match write_page(output_dir, &page.record, options, write_options) {
                Ok(written) => {
                    log::info!("Converted {} -> {}", page.source.display(), written.display());
                    Outcome::Converted(written)
                }
                Err(e) => {
                    log::warn!("Failed to write {}: {}", page.source.display(), e);
                    Outcome::Failed(page.source.clone(), e.to_string())
                }
            };
            on_file(&page.source);
            outcome
        })
        .collect();
    outcomes.extend(written);

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Converted(path) => report.converted.push(path),
            Outcome::Skipped(path) => report.skipped.push(path),
            Outcome::Failed(path, message) => report.failed.push((path, message)),
        }
    }

    log::info!(
        "Batch finished: {} converted, {} skipped, {} failed",
        report.converted.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageMetadata;
    use chrono::DateTime;

    fn write_record(dir: &Path, file: &str, content: &str) {
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_list_input_files_skips_hidden_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        write_record(dir.path(), "Main.B", "x");
        write_record(dir.path(), "Main.A", "x");
        write_record(dir.path(), ".flock", "x");
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = list_input_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Main.A", "Main.B"]);
    }

    #[test]
    fn test_list_input_files_skips_deleted_copies() {
        let dir = tempfile::tempdir().unwrap();
        write_record(dir.path(), "Main.HomePage", "x");
        write_record(dir.path(), "Main.HomePage,del-1700000000", "x");

        let files = list_input_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("Main.HomePage")]);
    }

    fn pending(source: &str, updated: Option<i64>) -> PendingPage {
        let mut metadata = PageMetadata::from_name("Main.HomePage");
        metadata.updated = updated.and_then(|t| DateTime::from_timestamp(t, 0));
        PendingPage {
            source: PathBuf::from(source),
            target: PathBuf::from("out/Main/HomePage.md"),
            record: PageRecord::new(metadata, source),
        }
    }

    #[test]
    fn test_select_newest_keeps_latest_time() {
        let pages = vec![
            pending("Main.HomePage", Some(1_600_000_000)),
            pending("Main.HomeCopy", Some(1_700_000_000)),
            pending("Main.Untimed", None),
        ];

        let (kept, superseded) = select_newest(pages);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source, PathBuf::from("Main.HomeCopy"));

        let losers: Vec<_> = superseded.iter().map(|p| p.source.clone()).collect();
        assert_eq!(
            losers,
            vec![PathBuf::from("Main.HomePage"), PathBuf::from("Main.Untimed")]
        );
    }

    #[test]
    fn test_select_newest_tie_keeps_first() {
        let pages = vec![
            pending("Main.A", Some(1_700_000_000)),
            pending("Main.B", Some(1_700_000_000)),
        ];

        let (kept, superseded) = select_newest(pages);
        assert_eq!(kept[0].source, PathBuf::from("Main.A"));
        assert_eq!(superseded[0].source, PathBuf::from("Main.B"));
    }

    #[test]
    fn test_list_input_files_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(list_input_files(&missing), Err(Error::Other(_))));
    }

    #[test]
    fn test_batch_report_counts() {
        let report = BatchReport {
            converted: vec![PathBuf::from("a.md")],
            skipped: vec![PathBuf::from("b")],
            failed: vec![(PathBuf::from("c"), "boom".to_string())],
        };
        assert_eq!(report.total(), 3);
        assert!(!report.is_success());
    }
}
