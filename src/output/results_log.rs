//! Dated result files
//!
//! Every crawl run through the CLI leaves a plain-text record in the results
//! directory. Only the most recent files are kept.

use crate::crawler::CrawlReport;
use crate::output::OutputResult;
use chrono::Local;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// File name suffix of every result file; only these files are ever pruned
pub const RESULT_FILE_SUFFIX: &str = "_scraper-result.txt";

/// Writes a dated result file and prunes older ones
///
/// The file is named `<YYYY-MM-DD_HH-MM-SS>_scraper-result.txt` (local time).
/// The directory is created if it does not exist. Afterwards only the `keep`
/// most recently modified result files remain.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the file just written
/// * `Err(OutputError)` - Creating, writing or pruning failed
pub fn write_results_log(dir: &Path, report: &CrawlReport, keep: usize) -> OutputResult<PathBuf> {
    fs::create_dir_all(dir)?;

    let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = dir.join(format!("{}{}", stamp, RESULT_FILE_SUFFIX));

    let mut file = File::create(&path)?;
    file.write_all(format_results_log(report).as_bytes())?;
    file.flush()?;
    drop(file);

    let removed = prune_results(dir, keep)?;
    if !removed.is_empty() {
        tracing::debug!("Removed {} old result file(s)", removed.len());
    }

    Ok(path)
}

/// Formats a report in the result-file layout
///
/// One block per result: `Found at: <page>` followed by `Link: <url>` for
/// dead links or `Match: <text>` for search matches.
pub fn format_results_log(report: &CrawlReport) -> String {
    let mut out = String::new();

    match report {
        CrawlReport::Search(matches) => {
            for m in matches {
                out.push_str(&format!("Found at: {}\nMatch: {}\n", m.page_url, m.match_text));
            }
        }
        CrawlReport::DeadLinks(links) => {
            for link in links {
                out.push_str(&format!(
                    "Found at: {}\nLink: {}\n",
                    link.source_url, link.broken_url
                ));
            }
        }
    }

    out
}

/// Deletes all but the `keep` most recently modified result files in `dir`
///
/// Files without the result suffix are left alone.
///
/// # Returns
///
/// The paths that were removed
pub fn prune_results(dir: &Path, keep: usize) -> OutputResult<Vec<PathBuf>> {
    let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let is_result = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(RESULT_FILE_SUFFIX));
        if is_result {
            files.push((metadata.modified()?, entry.path()));
        }
    }

    // Newest first; names carry the timestamp, so they break mtime ties.
    files.sort_by(|a, b| b.cmp(a));

    let mut removed = Vec::new();
    for (_, path) in files.into_iter().skip(keep) {
        fs::remove_file(&path)?;
        removed.push(path);
    }

    Ok(removed)
}
