use serde::Deserialize;
use thiserror::Error;

use crate::geometry::ADDRESS_WIDTH;

/// Fall-back miss penalty in cycles: 100ns of memory latency at a 4GHz clock
pub const DEFAULT_MISS_PENALTY: u64 = 400;

/// A hierarchy configuration with one or more levels, fastest first
///
/// The same level geometries are used for both the instruction and the data path
#[derive(Debug, Deserialize)]
pub struct HierarchyConfig {
    pub levels: Vec<LevelConfig>,
    /// Percentage of instructions that are loads or stores, 0 to 100
    pub load_store_fraction: u64,
    /// Extra cycles charged when every level misses. Defaults to 400.
    #[serde(default = "default_miss_penalty")]
    pub miss_penalty: u64,
}

/// A configuration for a single cache level
#[derive(Debug, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    pub cache_size: u64,
    pub block_size: u64,
    pub access_cycles: u64,
}

fn default_miss_penalty() -> u64 {
    DEFAULT_MISS_PENALTY
}

/// Rejected configurations
///
/// All of these surface when the hierarchy is built, before any access is processed. Once
/// construction succeeds the access path cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cache size {0} must be a power of two greater than 1")]
    CacheSize(u64),
    #[error("block size {0} must be a power of two")]
    BlockSize(u64),
    #[error("block size {block_size} must not exceed cache size {cache_size}")]
    BlockExceedsCache { cache_size: u64, block_size: u64 },
    #[error("access cycles {0} must be between 1 and 10")]
    AccessCycles(u64),
    #[error("load/store fraction {0} must be between 0 and 100")]
    LoadStoreFraction(u64),
    #[error("index bits {index_bits} plus offset bits {offset_bits} exceed the {width} bit address width", width = ADDRESS_WIDTH)]
    GeometryOverflow { index_bits: u32, offset_bits: u32 },
    #[error("a hierarchy requires at least one cache level")]
    NoLevels,
}
