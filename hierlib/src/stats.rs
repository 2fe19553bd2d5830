use serde::Serialize;

use crate::cache::CacheLevel;
use crate::hierarchy::CacheHierarchy;

/// Fraction of accesses that hit, 0.0 when nothing has been accessed yet
pub fn hit_ratio(hits: u64, accesses: u64) -> f64 {
    if accesses == 0 {
        0.0
    } else {
        hits as f64 / accesses as f64
    }
}

/// Fraction of accesses that missed, 0.0 when nothing has been accessed yet
pub fn miss_ratio(misses: u64, accesses: u64) -> f64 {
    if accesses == 0 {
        0.0
    } else {
        misses as f64 / accesses as f64
    }
}

/// Derived figures for one level
#[derive(Debug, Serialize, PartialEq)]
pub struct LevelStats {
    pub name: String,
    pub accesses: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_ratio: f64,
    pub miss_ratio: f64,
}

/// A view over a hierarchy's counters. Building a report mutates nothing
#[derive(Debug, Serialize, PartialEq)]
pub struct StatsReport {
    pub instruction_levels: Vec<LevelStats>,
    pub data_levels: Vec<LevelStats>,
    pub instruction_amat: f64,
    pub data_amat: f64,
    pub combined_amat: f64,
}

impl StatsReport {
    /// Computes the report from the current counters
    ///
    /// The per-path AMAT figures use the first level's latency as the hit time and that
    /// level's miss ratio against the configured backing store penalty; the data path is
    /// additionally weighted by the load/store fraction. The combined figure divides the
    /// cycles actually accumulated by the access count, preserving fractional cycles
    pub fn from_hierarchy(hierarchy: &CacheHierarchy) -> Self {
        let penalty = hierarchy.miss_penalty() as f64;
        let fraction = hierarchy.load_store_fraction() as f64 / 100.0;
        let first_instruction = &hierarchy.instruction_levels()[0];
        let first_data = &hierarchy.data_levels()[0];
        let instruction_amat = first_instruction.latency() as f64
            + miss_ratio(first_instruction.misses(), first_instruction.accesses()) * penalty;
        let data_amat = first_data.latency() as f64
            + fraction * miss_ratio(first_data.misses(), first_data.accesses()) * penalty;
        let totals = hierarchy.totals();
        let combined_amat = if totals.total_accesses == 0 {
            0.0
        } else {
            totals.total_cycles as f64 / totals.total_accesses as f64
        };
        Self {
            instruction_levels: level_stats(hierarchy.instruction_levels()),
            data_levels: level_stats(hierarchy.data_levels()),
            instruction_amat,
            data_amat,
            combined_amat,
        }
    }
}

fn level_stats(levels: &[CacheLevel]) -> Vec<LevelStats> {
    levels
        .iter()
        .map(|level| LevelStats {
            name: level.name().to_string(),
            accesses: level.accesses(),
            hits: level.hits(),
            misses: level.misses(),
            hit_ratio: hit_ratio(level.hits(), level.accesses()),
            miss_ratio: miss_ratio(level.misses(), level.accesses()),
        })
        .collect()
}
