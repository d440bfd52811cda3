//! Arguments

// Imports
use {cachespace::BitRange, std::path::PathBuf};

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Config file
	///
	/// Json file with any of `capacity`, `s_range`, `b_range`, `traces` and `simulator`.
	/// Values passed as arguments take precedence over it.
	#[clap(long = "config")]
	pub config_file: Option<PathBuf>,

	/// Total cache capacity, in bytes
	#[clap(long = "capacity")]
	pub capacity: Option<u64>,

	/// Set-index bits range (`min..=max` or `min-max`)
	#[clap(long = "s-range")]
	pub s_range: Option<BitRange>,

	/// Block-offset bits range (`min..=max` or `min-max`)
	#[clap(long = "b-range")]
	pub b_range: Option<BitRange>,

	/// Simulator binary
	#[clap(long = "simulator")]
	pub simulator: Option<PathBuf>,

	/// Keep going after a run fails, reporting all failures at the end
	#[clap(long = "keep-going")]
	pub keep_going: bool,

	/// Only list all valid configurations, without running the simulator
	#[clap(long = "list")]
	pub list: bool,

	/// Directory to write a results table (`s,b,E,p`) for each trace to
	#[clap(long = "results-dir")]
	pub results_dir: Option<PathBuf>,

	/// Trace files
	pub traces: Vec<PathBuf>,
}
