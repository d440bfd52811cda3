//! Arguments

// Imports
use std::path::PathBuf;

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

	/// Input results table (csv with columns `s,b,E,p`)
	pub input_file: PathBuf,

	/// Output
	#[clap(flatten)]
	pub output: Output,

	/// Point size
	#[clap(long = "point-size", default_value_t = 1.5)]
	pub point_size: f64,

	/// Title
	#[clap(long = "title")]
	pub title: Option<String>,
}

/// Output
#[derive(Debug, clap::Args)]
pub struct Output {
	/// Interactive mode
	///
	/// Implied if no output file is given.
	#[clap(long = "interactive")]
	pub interactive: bool,

	/// Output file (png)
	#[clap(short = 'o', long = "output", group = "output-file")]
	pub file: Option<PathBuf>,

	/// Output file width
	#[clap(long = "output-width", requires = "output-file", default_value_t = 640)]
	pub width: u32,

	/// Output file height
	#[clap(long = "output-height", requires = "output-file", default_value_t = 480)]
	pub height: u32,
}
