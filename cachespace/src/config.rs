//! Configuration

// Imports
use {
	crate::config_space::{BitRange, ConfigSpace},
	anyhow::Context,
	std::{fs, path::{Path, PathBuf}},
};

/// Sweep configuration
///
/// Any field missing from a config file takes its default value.
#[derive(PartialEq, Eq, Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
	/// Total cache capacity, in bytes
	pub capacity: u64,

	/// Set-index bits range
	pub s_range: BitRange,

	/// Block-offset bits range
	pub b_range: BitRange,

	/// Trace files, in the order to run them
	pub traces: Vec<PathBuf>,

	/// Simulator binary
	pub simulator: PathBuf,
}

impl SweepConfig {
	/// Default capacity
	pub const DEFAULT_CAPACITY: u64 = 32768;
	/// Default set-index bits range
	pub const DEFAULT_S_RANGE: BitRange = BitRange::new(1, 12);
	/// Default block-offset bits range
	pub const DEFAULT_B_RANGE: BitRange = BitRange::new(3, 14);
	/// Default simulator binary
	pub const DEFAULT_SIMULATOR: &'static str = "./csim-ref";

	/// Loads a configuration from a json file
	pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
		let file = fs::File::open(path).context("Unable to open file")?;
		serde_json::from_reader(file).context("Unable to parse file")
	}

	/// Returns the configuration space of this sweep
	pub fn config_space(&self) -> Result<ConfigSpace, anyhow::Error> {
		ConfigSpace::new(self.capacity, self.s_range, self.b_range)
	}
}

impl Default for SweepConfig {
	fn default() -> Self {
		Self {
			capacity:  Self::DEFAULT_CAPACITY,
			s_range:   Self::DEFAULT_S_RANGE,
			b_range:   Self::DEFAULT_B_RANGE,
			traces:    vec![],
			simulator: PathBuf::from(Self::DEFAULT_SIMULATOR),
		}
	}
}
