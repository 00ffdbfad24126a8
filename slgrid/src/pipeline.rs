//! Batch conversion of a station list into grid positions.
//!
//! A run moves `Idle → Loading → Processing → Done | Failed`. The output file
//! is written only on the way to `Done`; any record failure aborts the batch
//! and leaves the previous output in place. Regions resolved before the
//! failure stay in the cache.

use crate::cache::{CacheBackend, RegionCache};
use crate::error::{GridError, Result};
use crate::grid;
use crate::json_file;
use crate::lookup::AreaLookup;
use crate::resolver::AreaResolver;
use crate::slurl;
use crate::types::{OutputRecord, StationRecord};
use std::cell::Cell;
use std::path::Path;
use tracing::{debug, error, info};

const FIELDS_PER_RECORD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Loading,
    Processing,
    Done,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub records: usize,
    pub lookups: usize,
    pub cache_hits: usize,
}

/// Splits station-list text into `(name, url, marker)` triples. Lines are
/// trimmed and blank lines dropped before grouping.
pub fn group_records(text: &str) -> Result<Vec<StationRecord>> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() % FIELDS_PER_RECORD != 0 {
        return Err(GridError::Format(format!(
            "Number of non-blank lines ({}) is not a multiple of {FIELDS_PER_RECORD}",
            lines.len()
        )));
    }

    Ok(lines
        .chunks_exact(FIELDS_PER_RECORD)
        .map(|chunk| StationRecord {
            name: chunk[0].to_string(),
            url: chunk[1].to_string(),
            marker: chunk[2].to_string(),
        })
        .collect())
}

/// Converts every record in order, stopping at the first failure.
pub async fn process_records<L: AreaLookup, B: CacheBackend>(
    resolver: &mut AreaResolver<L>,
    cache: &mut RegionCache<B>,
    records: &[StationRecord],
) -> Result<Vec<OutputRecord>> {
    let mut output = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        match convert(resolver, cache, record).await {
            Ok(converted) => {
                debug!(
                    "Record {} '{}' -> {:?}",
                    index + 1,
                    converted.name,
                    converted.grid_pos
                );
                output.push(converted);
            }
            Err(e) => {
                debug!("Record {} '{}' failed: {}", index + 1, record.name, e);
                return Err(e);
            }
        }
    }

    Ok(output)
}

async fn convert<L: AreaLookup, B: CacheBackend>(
    resolver: &mut AreaResolver<L>,
    cache: &mut RegionCache<B>,
    record: &StationRecord,
) -> Result<OutputRecord> {
    let location = slurl::parse(&record.url)?;
    let origin = resolver.resolve(&location.area_name, cache).await?;
    let grid_pos = grid::compose(origin, location.offset());

    Ok(OutputRecord {
        name: record.name.clone(),
        url: location.canonical_url,
        region: location.area_name,
        marker: record.marker.clone(),
        grid_pos,
    })
}

pub struct Pipeline<L: AreaLookup, B: CacheBackend> {
    lookup: L,
    backend: B,
    state: Cell<PipelineState>,
}

impl<L: AreaLookup, B: CacheBackend> Pipeline<L, B> {
    pub fn new(lookup: L, backend: B) -> Self {
        Self {
            lookup,
            backend,
            state: Cell::new(PipelineState::Idle),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state.get()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads `input`, converts it, and writes `output` only if every record
    /// converted. The cache is loaded once per run.
    pub async fn run(&self, input: &Path, output: &Path) -> Result<BatchSummary> {
        let result = self.execute(input, output).await;

        match &result {
            Ok(summary) => {
                self.transition(PipelineState::Done);
                info!(
                    "Wrote {} record(s) to {} ({} lookup(s), {} cache hit(s))",
                    summary.records,
                    output.display(),
                    summary.lookups,
                    summary.cache_hits
                );
            }
            Err(e) => {
                self.transition(PipelineState::Failed);
                error!("Batch aborted, {} not written: {}", output.display(), e);
            }
        }

        result
    }

    async fn execute(&self, input: &Path, output: &Path) -> Result<BatchSummary> {
        self.transition(PipelineState::Loading);
        let mut cache = RegionCache::load(&self.backend)?;
        let text = tokio::fs::read_to_string(input).await?;
        let records = group_records(&text)?;
        info!("Read {} record(s) from {}", records.len(), input.display());

        self.transition(PipelineState::Processing);
        let mut resolver = AreaResolver::new(&self.lookup);
        let converted = process_records(&mut resolver, &mut cache, &records).await?;

        json_file::write_pretty(output, &converted)?;

        Ok(BatchSummary {
            records: converted.len(),
            lookups: resolver.lookups(),
            cache_hits: resolver.cache_hits(),
        })
    }

    fn transition(&self, next: PipelineState) {
        debug!("Pipeline {:?} -> {:?}", self.state.get(), next);
        self.state.set(next);
    }
}
