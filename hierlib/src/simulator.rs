use std::io::BufRead;
use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cache::CacheLevel;
use crate::config::{ConfigError, HierarchyConfig};
use crate::hierarchy::{AccessOutcome, CacheHierarchy};
use crate::stats::StatsReport;
use crate::trace::{AccessRecord, TraceReader};

/// The simulator drives a hierarchy with a trace and collects results.
///
/// It supports calling simulate multiple times, and will update the time taken to
/// simulate and the results accordingly
pub struct Simulator {
    hierarchy: CacheHierarchy,
    result: HierarchyResult,
    // Reused for every access so the resolution loop never allocates
    outcomes: Vec<AccessOutcome>,
    simulation_time: Duration,
}

/// The result of a hierarchy simulation. Can be serialised to the output format
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct HierarchyResult {
    pub total_accesses: u64,
    pub instruction_accesses: u64,
    pub data_accesses: u64,
    pub total_cycles: u64,
    pub backing_store_accesses: u64,
    pub instruction_levels: Vec<LevelResult>,
    pub data_levels: Vec<LevelResult>,
}

/// The counters for an individual level. Can be serialised to the output format
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct LevelResult {
    pub name: String,
    pub accesses: u64,
    pub hits: u64,
    pub misses: u64,
}

impl HierarchyResult {
    /// Snapshots the counters of a hierarchy
    pub fn from_hierarchy(hierarchy: &CacheHierarchy) -> Self {
        fn levels(levels: &[CacheLevel]) -> Vec<LevelResult> {
            levels
                .iter()
                .map(|level| LevelResult {
                    name: level.name().to_string(),
                    accesses: level.accesses(),
                    hits: level.hits(),
                    misses: level.misses(),
                })
                .collect()
        }
        let totals = hierarchy.totals();
        Self {
            total_accesses: totals.total_accesses,
            instruction_accesses: totals.instruction_accesses,
            data_accesses: totals.data_accesses,
            total_cycles: totals.total_cycles,
            // Backing store accesses are whatever misses the last level of either path
            backing_store_accesses: totals.misses,
            instruction_levels: levels(hierarchy.instruction_levels()),
            data_levels: levels(hierarchy.data_levels()),
        }
    }
}

impl Simulator {
    /// Creates a new simulator for a given configuration
    ///
    /// # Arguments
    ///
    /// * `config`: A hierarchy configuration, usually resulting from parsing JSON
    ///
    /// returns: Result<Simulator, ConfigError>
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        let hierarchy = CacheHierarchy::new(config)?;
        let result = HierarchyResult::from_hierarchy(&hierarchy);
        Ok(Self {
            hierarchy,
            result,
            outcomes: Vec::new(),
            simulation_time: Duration::new(0, 0),
        })
    }

    /// Resolves a single access and returns what happened at each visited level
    ///
    /// The returned outcomes are only valid until the next access; callers wanting to
    /// keep them must copy them out
    ///
    /// # Arguments
    ///
    /// * `record`: The access to resolve
    ///
    /// returns: &[AccessOutcome], one entry per visited level
    pub fn process(&mut self, record: AccessRecord) -> &[AccessOutcome] {
        self.hierarchy.resolve(record, &mut self.outcomes);
        &self.outcomes
    }

    /// Simulates every record in a line-oriented trace
    ///
    /// Malformed lines are skipped by the reader and logged; IO errors abort the run.
    /// Each record is resolved to completion before the next is read, so replaying the
    /// same trace against a fresh simulator always reproduces identical counters
    ///
    /// # Arguments
    ///
    /// * `reader`: The trace input
    ///
    /// returns: Result<&HierarchyResult, std::io::Error>
    pub fn simulate<R: BufRead>(&mut self, reader: R) -> std::io::Result<&HierarchyResult> {
        let start = Instant::now();
        let mut records = TraceReader::new(reader);
        let mut processed = 0u64;
        for record in &mut records {
            let record = record?;
            self.hierarchy.resolve(record, &mut self.outcomes);
            processed += 1;
        }
        if records.skipped() > 0 {
            warn!("{} malformed trace lines were skipped", records.skipped());
        }
        self.simulation_time += start.elapsed();
        debug!("processed {processed} accesses");
        self.result = HierarchyResult::from_hierarchy(&self.hierarchy);
        Ok(&self.result)
    }

    /// Derives ratios and AMAT figures from the current counters
    pub fn report(&self) -> StatsReport {
        StatsReport::from_hierarchy(&self.hierarchy)
    }

    /// Snapshots the raw counters
    pub fn snapshot(&self) -> HierarchyResult {
        HierarchyResult::from_hierarchy(&self.hierarchy)
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }

    /// Gets the number of never-filled lines for each level of each path
    pub fn cold_line_counts(&self) -> Vec<(String, usize)> {
        self.hierarchy.cold_line_counts()
    }

    pub fn hierarchy(&self) -> &CacheHierarchy {
        &self.hierarchy
    }
}
