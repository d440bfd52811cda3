//! Configuration sweep

// Imports
use {
	crate::{
		config_space::{CacheConfig, ConfigSpace},
		report::Report,
		simulator::{RunError, Simulator, TraceRef},
	},
	anyhow::Context,
	std::io,
};

/// What to do when a run fails
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum FailurePolicy {
	/// Abort the whole sweep
	#[default]
	Abort,

	/// Record the failure and continue with the next run.
	///
	/// Failing to launch the simulator still aborts, since no other run could succeed.
	KeepGoing,
}

/// Sweep
///
/// Runs the simulator for every configuration over every trace.
#[derive(Clone, Debug)]
pub struct Sweep {
	/// Configuration space
	space: ConfigSpace,

	/// Traces, in the order to run them
	traces: Vec<TraceRef>,

	/// Failure policy
	failure_policy: FailurePolicy,
}

impl Sweep {
	/// Creates a new sweep
	pub fn new(space: ConfigSpace, traces: Vec<TraceRef>, failure_policy: FailurePolicy) -> Self {
		Self {
			space,
			traces,
			failure_policy,
		}
	}

	/// Returns the configuration space
	pub fn space(&self) -> &ConfigSpace {
		&self.space
	}

	/// Returns the traces
	pub fn traces(&self) -> &[TraceRef] {
		&self.traces
	}

	/// Runs the sweep.
	///
	/// For each trace, runs `simulator` once for every configuration in order,
	/// writing each run to `report` as soon as it finishes.
	pub fn run<W: io::Write>(
		&self,
		simulator: &mut impl Simulator,
		report: &mut Report<W>,
	) -> Result<SweepSummary, anyhow::Error> {
		let mut summary = SweepSummary::default();
		let configs_len = self.space.len();

		for trace in &self.traces {
			tracing::info!("Running {configs_len} configurations over {trace}");
			report.trace_header(trace).context("Unable to write report")?;

			for config in self.space.iter() {
				let raw_output = match simulator.run(&config, trace) {
					Ok(raw_output) => raw_output,
					Err(err) if self.failure_policy == FailurePolicy::KeepGoing && !err.is_fatal() => {
						tracing::warn!("Run of {config} over {trace} failed: {err}");
						summary.failures.push(RunFailure {
							config,
							trace: trace.clone(),
							error: err,
						});
						continue;
					},
					Err(err) => {
						return Err(anyhow::Error::new(err).context(format!("Unable to run {config} over {trace}")))
					},
				};

				let record = RunRecord::new(config, trace.clone(), raw_output);
				report.run(&record).context("Unable to write report")?;
				summary.records.push(record);
			}
		}

		Ok(summary)
	}
}

/// Run record
///
/// Output of a single successful simulator run.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct RunRecord {
	/// Configuration
	config: CacheConfig,

	/// Trace
	trace: TraceRef,

	/// Simulator output
	raw_output: String,
}

impl RunRecord {
	/// Creates a new record
	pub fn new(config: CacheConfig, trace: TraceRef, raw_output: String) -> Self {
		Self {
			config,
			trace,
			raw_output,
		}
	}

	/// Returns the configuration that was simulated
	pub fn config(&self) -> &CacheConfig {
		&self.config
	}

	/// Returns the trace that was simulated
	pub fn trace(&self) -> &TraceRef {
		&self.trace
	}

	/// Returns everything the simulator wrote to stdout
	pub fn raw_output(&self) -> &str {
		&self.raw_output
	}
}

/// Failed run
#[derive(Debug)]
pub struct RunFailure {
	pub config: CacheConfig,
	pub trace:  TraceRef,
	pub error:  RunError,
}

/// Sweep summary
#[derive(Debug, Default)]
pub struct SweepSummary {
	/// Successful runs, in the order they ran
	records: Vec<RunRecord>,

	/// Failed runs, in the order they ran
	failures: Vec<RunFailure>,
}

impl SweepSummary {
	/// Returns all successful runs
	pub fn records(&self) -> &[RunRecord] {
		&self.records
	}

	/// Returns all successful runs of `trace`
	pub fn trace_records<'a>(&'a self, trace: &'a TraceRef) -> impl Iterator<Item = &'a RunRecord> + 'a {
		self.records.iter().filter(move |record| record.trace() == trace)
	}

	/// Returns all failed runs
	pub fn failures(&self) -> &[RunFailure] {
		&self.failures
	}

	/// Returns the number of successful runs
	pub fn successes(&self) -> usize {
		self.records.len()
	}

	/// Returns if no run failed
	pub fn is_success(&self) -> bool {
		self.failures.is_empty()
	}
}
