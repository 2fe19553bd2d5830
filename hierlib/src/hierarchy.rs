use crate::cache::CacheLevel;
use crate::config::{ConfigError, HierarchyConfig};
use crate::trace::{AccessKind, AccessRecord};

/// What happened at one level during a single access. Kept only for reporting, nothing
/// downstream computes with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOutcome {
    pub level: usize,
    pub hit: bool,
    pub tag: u32,
    pub index: u32,
}

/// Hierarchy-wide running totals
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyTotals {
    pub total_accesses: u64,
    pub instruction_accesses: u64,
    pub data_accesses: u64,
    pub total_cycles: u64,
    pub hits: u64,
    pub misses: u64,
}

/// A split instruction/data hierarchy of direct-mapped levels
///
/// Levels are ordered fastest first; memory sits implicitly beyond the last one. Both
/// paths are built from the same level configurations but keep independent line arrays
/// and counters
pub struct CacheHierarchy {
    instruction_path: Vec<CacheLevel>,
    data_path: Vec<CacheLevel>,
    miss_penalty: u64,
    load_store_fraction: u64,
    totals: HierarchyTotals,
}

impl CacheHierarchy {
    /// Builds both paths from a configuration, validating every level up front
    ///
    /// Once this returns Ok there is no failure mode left in the access path
    ///
    /// # Arguments
    ///
    /// * `config`: A hierarchy configuration, usually resulting from parsing JSON
    ///
    /// returns: Result<CacheHierarchy, ConfigError>
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        if config.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        if config.load_store_fraction > 100 {
            return Err(ConfigError::LoadStoreFraction(config.load_store_fraction));
        }
        let instruction_path = config
            .levels
            .iter()
            .map(CacheLevel::new)
            .collect::<Result<Vec<_>, _>>()?;
        let data_path = config
            .levels
            .iter()
            .map(CacheLevel::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            instruction_path,
            data_path,
            miss_penalty: config.miss_penalty,
            load_store_fraction: config.load_store_fraction,
            totals: HierarchyTotals::default(),
        })
    }

    /// Resolves one access against the matching path and returns its cycle cost
    ///
    /// The walk starts at the fastest level and charges each visited level's latency
    /// before probing it. The first hit stops the walk; lower levels are never probed
    /// once a level hits. When every level misses, the fixed miss penalty is charged once
    /// on top of the latencies already accumulated
    ///
    /// One outcome per visited level is pushed into `outcomes`, which is cleared first so
    /// callers can reuse the allocation across a long trace
    ///
    /// # Arguments
    ///
    /// * `record`: The access to resolve
    /// * `outcomes`: Buffer receiving one entry per visited level
    ///
    /// returns: u64, the cycle cost of this access
    pub fn resolve(&mut self, record: AccessRecord, outcomes: &mut Vec<AccessOutcome>) -> u64 {
        outcomes.clear();
        let path = match record.kind {
            AccessKind::Instruction => &mut self.instruction_path,
            AccessKind::Data => &mut self.data_path,
        };
        let mut cycles = 0u64;
        let mut hit = false;
        for (level, cache) in path.iter_mut().enumerate() {
            cycles += cache.latency();
            let result = cache.lookup(record.address);
            outcomes.push(AccessOutcome {
                level,
                hit: result.hit,
                tag: result.tag,
                index: result.index,
            });
            if result.hit {
                hit = true;
                break;
            }
        }
        if !hit {
            cycles += self.miss_penalty;
        }
        self.totals.total_accesses += 1;
        match record.kind {
            AccessKind::Instruction => self.totals.instruction_accesses += 1,
            AccessKind::Data => self.totals.data_accesses += 1,
        }
        if hit {
            self.totals.hits += 1;
        } else {
            self.totals.misses += 1;
        }
        self.totals.total_cycles += cycles;
        cycles
    }

    pub fn instruction_levels(&self) -> &[CacheLevel] {
        &self.instruction_path
    }

    pub fn data_levels(&self) -> &[CacheLevel] {
        &self.data_path
    }

    pub fn totals(&self) -> &HierarchyTotals {
        &self.totals
    }

    pub fn miss_penalty(&self) -> u64 {
        self.miss_penalty
    }

    pub fn load_store_fraction(&self) -> u64 {
        self.load_store_fraction
    }

    /// Counts never-filled lines for each level of each path, instruction path first
    pub fn cold_line_counts(&self) -> Vec<(String, usize)> {
        self.instruction_path
            .iter()
            .map(|level| (format!("instruction {}", level.name()), level.cold_line_count()))
            .chain(
                self.data_path
                    .iter()
                    .map(|level| (format!("data {}", level.name()), level.cold_line_count())),
            )
            .collect()
    }
}
