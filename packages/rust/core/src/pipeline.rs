//! End-to-end `convert` pipeline: registry table → classify → aggregate →
//! one JSON document per region.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use regiontree_registry::{RegistryReader, filter_active};
use regiontree_shared::{Classification, RegionTree, Result, SourceConfig, SourceRecord};

use crate::aggregator::aggregate;
use crate::classifier::classify;
use crate::exporter::{self, ExportOptions};

/// Configuration for the `convert` pipeline.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Registry table to read.
    pub input: PathBuf,
    /// Directory region documents are written into.
    pub output_dir: PathBuf,
    /// Column names, delimiter, active-status label.
    pub source: SourceConfig,
    pub export: ExportOptions,
    /// Build the trees but write nothing.
    pub dry_run: bool,
}

/// Per-region counts reported after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    pub name: String,
    pub code: String,
    pub districts: usize,
    pub localities: usize,
}

/// Result of the `convert` pipeline.
#[derive(Debug)]
pub struct ConvertResult {
    /// Rows in the registry table.
    pub rows_read: usize,
    /// Rows still in force.
    pub active_rows: usize,
    /// Active rows the classifier excluded (village names, unknown suffixes).
    pub excluded_rows: usize,
    pub regions: Vec<RegionSummary>,
    /// Documents written; empty on a dry run.
    pub files: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each record is classified.
    fn record_classified(&self, current: usize, total: usize);
    /// Called after a region document is written.
    fn region_written(&self, region: &str, path: &std::path::Path);
    /// Called when the pipeline completes.
    fn done(&self, result: &ConvertResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn record_classified(&self, _current: usize, _total: usize) {}
    fn region_written(&self, _region: &str, _path: &std::path::Path) {}
    fn done(&self, _result: &ConvertResult) {}
}

/// Run the full `convert` pipeline.
///
/// 1. Load the registry table
/// 2. Keep rows still in force
/// 3. Classify each name
/// 4. Aggregate into region trees
/// 5. Write one document per region (skipped on dry run)
#[instrument(skip_all, fields(input = %config.input.display(), dry_run = config.dry_run))]
pub fn convert(config: &ConvertConfig, progress: &dyn ProgressReporter) -> Result<ConvertResult> {
    let start = Instant::now();

    progress.phase("Reading registry");
    let records = RegistryReader::from_path(&config.input, &config.source)?.read_all()?;
    let rows_read = records.len();

    let active = filter_active(records);
    let active_rows = active.len();
    info!(rows_read, active_rows, "registry loaded");

    progress.phase("Classifying names");
    let (regions, excluded_rows) = build_regions(&active, progress);

    let files = if config.dry_run {
        info!("dry run, no documents written");
        Vec::new()
    } else {
        progress.phase("Writing region documents");
        let files = exporter::export_all(&config.output_dir, &regions, &config.export)?;
        for (tree, path) in regions.values().zip(&files) {
            progress.region_written(&tree.name, path);
        }
        files
    };

    let result = ConvertResult {
        rows_read,
        active_rows,
        excluded_rows,
        regions: regions.values().map(summarize).collect(),
        files,
        elapsed: start.elapsed(),
    };

    info!(
        regions = result.regions.len(),
        excluded = result.excluded_rows,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "convert pipeline complete"
    );
    progress.done(&result);

    Ok(result)
}

/// Classify active records and fold them into region trees.
///
/// Returns the trees and the number of records the classifier excluded.
pub fn build_regions(
    records: &[SourceRecord],
    progress: &dyn ProgressReporter,
) -> (BTreeMap<String, RegionTree>, usize) {
    let total = records.len();
    let mut excluded = 0;

    let classified: Vec<(Classification, String)> = records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| {
            let classification = classify(&record.full_name);
            progress.record_classified(i + 1, total);
            if classification.is_excluded() {
                debug!(code = %record.code, name = %record.full_name, "excluded by classifier");
                excluded += 1;
                return None;
            }
            Some((classification, record.code.clone()))
        })
        .collect();

    (aggregate(classified), excluded)
}

fn summarize(tree: &RegionTree) -> RegionSummary {
    RegionSummary {
        name: tree.name.clone(),
        code: tree.code.clone(),
        districts: tree.children.len(),
        localities: tree.leaf_count(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
