//! External simulator

// Imports
use {
	crate::config_space::CacheConfig,
	cachespace_util::CommandLine,
	std::{
		fmt,
		io,
		path::{Path, PathBuf},
		process::{Command, ExitStatus, Stdio},
		string::FromUtf8Error,
	},
};

/// Trace file
///
/// Only ever read by the simulator.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct TraceRef(PathBuf);

impl TraceRef {
	/// Creates a new trace reference
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self(path.into())
	}

	/// Returns the path of this trace
	pub fn path(&self) -> &Path {
		&self.0
	}
}

impl fmt::Display for TraceRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.display().fmt(f)
	}
}

/// Simulator
pub trait Simulator {
	/// Simulates `trace` on a cache with configuration `config`.
	///
	/// Returns everything the simulator wrote to stdout.
	fn run(&mut self, config: &CacheConfig, trace: &TraceRef) -> Result<String, RunError>;
}

/// External simulator process
///
/// Invoked as `<path> -s <s> -b <b> -E <E> -t <trace>`, once per run,
/// waiting for it to exit before returning.
#[derive(Clone, Debug)]
pub struct ExternalSimulator {
	/// Path to the simulator binary
	path: PathBuf,
}

impl ExternalSimulator {
	/// Creates a new external simulator
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Returns the path of the simulator binary
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Builds the command to simulate `trace` with `config`
	pub fn command(&self, config: &CacheConfig, trace: &TraceRef) -> Command {
		let mut cmd = Command::new(&self.path);
		cmd.arg("-s")
			.arg(config.s().to_string())
			.arg("-b")
			.arg(config.b().to_string())
			.arg("-E")
			.arg(config.e().to_string())
			.arg("-t")
			.arg(trace.path())
			.stdin(Stdio::null());

		cmd
	}
}

impl Simulator for ExternalSimulator {
	fn run(&mut self, config: &CacheConfig, trace: &TraceRef) -> Result<String, RunError> {
		let mut cmd = self.command(config, trace);
		tracing::debug!(command = %cmd.command_line(), "Running simulator");

		let output = cmd.output().map_err(|source| RunError::Launch {
			path: self.path.clone(),
			source,
		})?;

		if !output.status.success() {
			return Err(RunError::Exit {
				status: output.status,
				stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
			});
		}

		String::from_utf8(output.stdout).map_err(|source| RunError::MalformedOutput { source })
	}
}

/// Simulator run error
#[derive(Debug, thiserror::Error)]
pub enum RunError {
	/// Unable to start the simulator
	#[error("Unable to launch simulator {path:?}")]
	Launch {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},

	/// Simulator exited unsuccessfully
	#[error("Simulator exited with {status}: {}", .stderr.trim())]
	Exit { status: ExitStatus, stderr: String },

	/// Simulator output wasn't text
	#[error("Simulator output was not valid utf-8")]
	MalformedOutput {
		#[source]
		source: FromUtf8Error,
	},
}

impl RunError {
	/// Returns if this error affects every run, not just the one that produced it
	pub fn is_fatal(&self) -> bool {
		matches!(self, Self::Launch { .. })
	}
}

#[cfg(test)]
mod tests {
	use {
		super::{ExternalSimulator, RunError, Simulator, TraceRef},
		crate::CacheConfig,
		similar_asserts as diff,
	};

	#[test]
	fn command_args() {
		let sim = ExternalSimulator::new("./csim-ref");
		let config = CacheConfig::new(32768, 4, 5).expect("Valid config");
		let cmd = sim.command(&config, &TraceRef::new("traces/ls.trace"));

		let args = cmd.get_args().map(|arg| arg.to_string_lossy().into_owned()).collect::<Vec<_>>();
		diff::assert_eq!(have: cmd.get_program().to_string_lossy(), want: "./csim-ref");
		diff::assert_eq!(have: args, want: ["-s", "4", "-b", "5", "-E", "64", "-t", "traces/ls.trace"]);
	}

	#[test]
	fn missing_binary_is_fatal() {
		let mut sim = ExternalSimulator::new("/nonexistent/cachespace/csim-ref");
		let config = CacheConfig::new(32768, 4, 5).expect("Valid config");

		let err = sim
			.run(&config, &TraceRef::new("traces/ls.trace"))
			.expect_err("Missing binary should fail");
		assert!(matches!(err, RunError::Launch { .. }));
		assert!(err.is_fatal());
	}
}
