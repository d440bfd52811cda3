//! Configuration space

// Imports
use {
	anyhow::Context,
	itertools::Itertools,
	std::{fmt, ops::RangeInclusive, str::FromStr},
};

/// Cache configuration
///
/// Holds `2^s` sets of `e` lines, each line `2^b` bytes.
/// Can only be created for a capacity it divides exactly, so
/// `capacity == 2^s * 2^b * e` always holds.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct CacheConfig {
	/// Set-index bits
	s: u32,

	/// Block-offset bits
	b: u32,

	/// Associativity (lines per set)
	e: u64,
}

impl CacheConfig {
	/// Creates the configuration with `s` set-index bits and `b` block-offset
	/// bits for a cache of `capacity` bytes.
	///
	/// Returns `None` if `capacity / (2^s * 2^b)` isn't a positive integer.
	pub fn new(capacity: u64, s: u32, b: u32) -> Option<Self> {
		if s == 0 || b == 0 {
			return None;
		}

		// Note: A shift of 64 or more bits can't divide any `u64` capacity.
		let set_line_bytes = 1u64.checked_shl(s.checked_add(b)?)?;
		if capacity % set_line_bytes != 0 {
			return None;
		}

		let e = capacity / set_line_bytes;
		(e >= 1).then_some(Self { s, b, e })
	}

	/// Returns the set-index bits
	pub fn s(&self) -> u32 {
		self.s
	}

	/// Returns the block-offset bits
	pub fn b(&self) -> u32 {
		self.b
	}

	/// Returns the associativity
	pub fn e(&self) -> u64 {
		self.e
	}

	/// Returns the capacity, in bytes
	pub fn capacity(&self) -> u64 {
		self.e << (self.s + self.b)
	}
}

impl fmt::Display for CacheConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "s,b,E: {},{},{}", self.s, self.b, self.e)
	}
}

/// Inclusive range of bits
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct BitRange {
	pub min: u32,
	pub max: u32,
}

impl BitRange {
	/// Creates a new range
	pub const fn new(min: u32, max: u32) -> Self {
		Self { min, max }
	}

	/// Returns all bits in this range, ascending
	pub fn bits(&self) -> RangeInclusive<u32> {
		self.min..=self.max
	}

	/// Checks that this range is non-empty and starts at 1 or above
	pub fn validate(&self) -> Result<(), anyhow::Error> {
		anyhow::ensure!(self.min >= 1, "Range {self} must start at 1 or above");
		anyhow::ensure!(self.min <= self.max, "Range {self} is empty");

		Ok(())
	}
}

impl fmt::Display for BitRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}..={}", self.min, self.max)
	}
}

impl FromStr for BitRange {
	type Err = anyhow::Error;

	/// Parses either `min..=max` or `min-max`
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (min, max) = s
			.split_once("..=")
			.or_else(|| s.split_once('-'))
			.with_context(|| format!("Expected `min..=max` or `min-max`, found {s:?}"))?;

		let min = min.trim().parse().context("Unable to parse range start")?;
		let max = max.trim().parse().context("Unable to parse range end")?;

		Ok(Self { min, max })
	}
}

/// Configuration space
///
/// All valid configurations of a fixed capacity within bounds for `s` and `b`.
#[derive(Clone, Copy, Debug)]
pub struct ConfigSpace {
	/// Capacity, in bytes
	capacity: u64,

	/// Set-index bits range
	s_range: BitRange,

	/// Block-offset bits range
	b_range: BitRange,
}

impl ConfigSpace {
	/// Creates a new configuration space
	pub fn new(capacity: u64, s_range: BitRange, b_range: BitRange) -> Result<Self, anyhow::Error> {
		anyhow::ensure!(capacity > 0, "Capacity must be positive");
		s_range.validate().context("Invalid set-index bits range")?;
		b_range.validate().context("Invalid block-offset bits range")?;

		Ok(Self {
			capacity,
			s_range,
			b_range,
		})
	}

	/// Returns the capacity
	pub fn capacity(&self) -> u64 {
		self.capacity
	}

	/// Returns the set-index bits range
	pub fn s_range(&self) -> BitRange {
		self.s_range
	}

	/// Returns the block-offset bits range
	pub fn b_range(&self) -> BitRange {
		self.b_range
	}

	/// Returns all valid configurations.
	///
	/// Iterates over `s` ascending, and for each `s`, over `b` ascending.
	/// Pairs that don't divide the capacity evenly are skipped.
	pub fn iter(&self) -> impl Iterator<Item = CacheConfig> {
		let capacity = self.capacity;
		self.s_range
			.bits()
			.cartesian_product(self.b_range.bits())
			.filter_map(move |(s, b)| {
				let config = CacheConfig::new(capacity, s, b);
				if config.is_none() {
					tracing::trace!(s, b, capacity, "Skipping configuration that doesn't divide capacity");
				}
				config
			})
	}

	/// Returns the number of valid configurations
	pub fn len(&self) -> usize {
		self.iter().count()
	}

	/// Returns if there are no valid configurations
	pub fn is_empty(&self) -> bool {
		self.iter().next().is_none()
	}
}
