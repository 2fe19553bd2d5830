use crate::config::{ConfigError, LevelConfig};
use crate::geometry::CacheGeometry;

/// One line slot
///
/// Starts invalid with tag 0 and is overwritten in place by every miss that maps to it.
/// Lives exactly as long as the level that owns it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Line {
    pub valid: bool,
    pub tag: u32,
}

/// The result of probing one level with one address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupResult {
    pub hit: bool,
    pub tag: u32,
    pub index: u32,
}

/// A single direct-mapped cache level
///
/// Each address maps to exactly one line slot, so a lookup is a single valid-bit and tag
/// comparison with no replacement decision to make. The level owns its access/hit/miss
/// counters and a fixed access latency in cycles
///
/// The line array is allocated once from the validated line count and never grows
pub struct CacheLevel {
    name: String,
    geometry: CacheGeometry,
    lines: Box<[Line]>,
    latency: u64,
    accesses: u64,
    hits: u64,
    misses: u64,
}

impl CacheLevel {
    /// Builds a level from its configuration, deriving and validating the geometry
    ///
    /// # Arguments
    ///
    /// * `config`: A level configuration, usually part of a parsed hierarchy configuration
    ///
    /// returns: Result<CacheLevel, ConfigError>
    pub fn new(config: &LevelConfig) -> Result<Self, ConfigError> {
        let geometry = CacheGeometry::new(config.cache_size, config.block_size)?;
        if !(1..=10).contains(&config.access_cycles) {
            return Err(ConfigError::AccessCycles(config.access_cycles));
        }
        Ok(Self {
            name: config.name.clone(),
            lines: vec![Line::default(); geometry.line_count() as usize].into_boxed_slice(),
            geometry,
            latency: config.access_cycles,
            accesses: 0,
            hits: 0,
            misses: 0,
        })
    }

    /// Probes the level with an address, updating counters and installing the block on a
    /// miss
    ///
    /// The only hit condition is a valid line whose tag matches. On a miss the incoming
    /// block unconditionally evicts whatever the slot held; a direct-mapped level has no
    /// other candidate. Exactly one slot is mutated on a miss, none on a hit
    ///
    /// # Arguments
    ///
    /// * `address`: The accessed address. The block containing it is installed on a miss
    ///
    /// returns: LookupResult
    pub fn lookup(&mut self, address: u32) -> LookupResult {
        let parts = self.geometry.decompose(address);
        let line = &mut self.lines[parts.index as usize];
        self.accesses += 1;
        let hit = line.valid && line.tag == parts.tag;
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
            line.valid = true;
            line.tag = parts.tag;
        }
        LookupResult {
            hit,
            tag: parts.tag,
            index: parts.index,
        }
    }

    /// Counts lines that have never been filled. Useful for analysing cache warm-up or
    /// debugging
    pub fn cold_line_count(&self) -> usize {
        self.lines.iter().filter(|line| !line.valid).count()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    pub fn latency(&self) -> u64 {
        self.latency
    }

    pub fn accesses(&self) -> u64 {
        self.accesses
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
