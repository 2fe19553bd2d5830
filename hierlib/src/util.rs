use crate::config::{HierarchyConfig, LevelConfig, DEFAULT_MISS_PENALTY};

/// Builds a configuration from (cache_size, block_size, access_cycles) triples, fastest
/// level first. Levels are named L1, L2, ... in order
pub fn build_config(levels: &[(u64, u64, u64)], load_store_fraction: u64) -> HierarchyConfig {
    HierarchyConfig {
        levels: levels
            .iter()
            .enumerate()
            .map(|(i, &(cache_size, block_size, access_cycles))| LevelConfig {
                name: format!("L{}", i + 1),
                cache_size,
                block_size,
                access_cycles,
            })
            .collect(),
        load_store_fraction,
        miss_penalty: DEFAULT_MISS_PENALTY,
    }
}

/// Generates a deterministic synthetic trace, alternating instruction and data accesses
///
/// Three out of four addresses walk a small window with the given stride, so caches warm
/// up and hit; every fourth comes from a linear congruential sequence and mostly misses.
/// Deterministic so benchmark runs stay comparable
pub fn generate_trace(records: usize, stride: u32) -> String {
    let mut out = String::with_capacity(records * 12);
    let mut noise: u32 = 0x2545_f491;
    for i in 0..records {
        let address = if i % 4 == 3 {
            noise = noise.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            noise
        } else {
            (i as u32).wrapping_mul(stride) % (1 << 14)
        };
        out.push(if i % 2 == 0 { 'I' } else { 'D' });
        out.push(' ');
        out.push_str(&address.to_string());
        out.push('\n');
    }
    out
}
