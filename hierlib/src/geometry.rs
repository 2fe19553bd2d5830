use crate::config::ConfigError;

/// All addresses in the model are 32 bits wide
pub const ADDRESS_WIDTH: u32 = 32;

/// The bit-field layout of one cache level, derived once from the validated sizes
///
/// The layout is immutable after construction, lookups only ever read it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    line_count: u64,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
}

/// An address decomposed against one geometry
///
/// The offset takes no part in tag comparison, it is kept for display and debugging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressParts {
    pub tag: u32,
    pub index: u32,
    pub offset: u32,
}

impl CacheGeometry {
    /// Derives the bit-field layout for a cache of `cache_size` bytes with `block_size`
    /// byte blocks
    ///
    /// # Arguments
    ///
    /// * `cache_size`: Total capacity in bytes, a power of two greater than 1
    /// * `block_size`: Block size in bytes, a power of two no larger than the cache
    ///
    /// returns: Result<CacheGeometry, ConfigError>
    pub fn new(cache_size: u64, block_size: u64) -> Result<Self, ConfigError> {
        if cache_size <= 1 || !cache_size.is_power_of_two() {
            return Err(ConfigError::CacheSize(cache_size));
        }
        if !block_size.is_power_of_two() {
            return Err(ConfigError::BlockSize(block_size));
        }
        if block_size > cache_size {
            return Err(ConfigError::BlockExceedsCache {
                cache_size,
                block_size,
            });
        }
        let line_count = cache_size / block_size;
        let offset_bits = block_size.trailing_zeros();
        let index_bits = line_count.trailing_zeros();
        if offset_bits + index_bits > ADDRESS_WIDTH {
            return Err(ConfigError::GeometryOverflow {
                index_bits,
                offset_bits,
            });
        }
        Ok(Self {
            line_count,
            offset_bits,
            index_bits,
            tag_bits: ADDRESS_WIDTH - index_bits - offset_bits,
        })
    }

    /// Splits an address into tag, index and offset
    ///
    /// Infallible and side-effect free; the shift amounts were bounded when the geometry
    /// was built. The arithmetic is done in 64 bits so a geometry with no tag bits is not
    /// a special case
    ///
    /// # Examples
    ///
    /// ```
    /// use hierlib::geometry::CacheGeometry;
    /// let geometry = CacheGeometry::new(1024, 64).unwrap();
    /// let parts = geometry.decompose(1024);
    /// assert_eq!((parts.tag, parts.index, parts.offset), (1, 0, 0));
    /// ```
    pub fn decompose(&self, address: u32) -> AddressParts {
        let address = u64::from(address);
        let offset = address & ((1u64 << self.offset_bits) - 1);
        let index = (address >> self.offset_bits) & ((1u64 << self.index_bits) - 1);
        let tag = address >> (self.offset_bits + self.index_bits);
        AddressParts {
            tag: tag as u32,
            index: index as u32,
            offset: offset as u32,
        }
    }

    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    pub fn tag_bits(&self) -> u32 {
        self.tag_bits
    }
}
