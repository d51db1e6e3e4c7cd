use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::anonymizer::Anonymizer;

/// Outcome totals for one run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Collects every file under `root` whose extension is listed in
/// `extensions`, sorted by path. The full list is gathered before any output
/// is written, so a run never picks up its own products.
pub fn discover_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect_into(root, extensions, &mut found)
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    found.sort();
    Ok(found)
}

fn collect_into(dir: &Path, extensions: &[String], found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            collect_into(&path, extensions, found)?;
        } else if has_eligible_extension(&path, extensions) {
            found.push(path);
        }
    }
    Ok(())
}

fn has_eligible_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| extensions.iter().any(|want| want == ext))
}

/// `dir/name.ext` becomes `dir/name_anonymized.ext`. An existing file of the
/// derived name is silently overwritten.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");
    let renamed = match input.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{}_anonymized.{}", stem, ext),
        None => format!("{}_anonymized", stem),
    };
    input.with_file_name(renamed)
}

/// Reads `path` as UTF-8, anonymizes it, and writes the derived sibling
/// file. The original is never modified.
pub fn process_file(engine: &mut Anonymizer, path: &Path) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let anonymized = engine.anonymize(&content);
    let target = output_path(path);
    fs::write(&target, anonymized)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    debug!("Wrote {}", target.display());
    Ok(())
}

/// Processes every eligible file under `root`, one at a time in discovery
/// order. A file that fails is logged with its path, counted, and skipped;
/// the run continues and no file is retried.
pub fn run(engine: &mut Anonymizer, root: &Path, extensions: &[String]) -> Result<RunSummary> {
    let files = discover_files(root, extensions)?;
    info!(
        "Discovered {} eligible files under {}",
        files.len(),
        root.display()
    );

    let mut summary = RunSummary::default();
    for path in &files {
        println!("Processing {}...", path.display());
        match process_file(engine, path) {
            Ok(()) => summary.processed += 1,
            Err(err) => {
                error!("Error processing {}: {:#}", path.display(), err);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}
