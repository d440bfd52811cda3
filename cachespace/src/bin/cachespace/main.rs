//! Cache configuration space explorer (`cachespace`)

// Modules
mod args;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	cachespace::{
		results::{self, ResultRow},
		ExternalSimulator,
		FailurePolicy,
		Report,
		SimSummary,
		Sweep,
		SweepConfig,
		SweepSummary,
		TraceRef,
	},
	cachespace_util::logger,
	clap::Parser,
	std::{
		fs,
		io,
		path::{Path, PathBuf},
	},
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Read the config file, then override it with any arguments
	let mut config = match &args.config_file {
		Some(config_file) => SweepConfig::from_file(config_file)
			.with_context(|| format!("Unable to load config file {config_file:?}"))?,
		None => SweepConfig::default(),
	};
	if let Some(capacity) = args.capacity {
		config.capacity = capacity;
	}
	if let Some(s_range) = args.s_range {
		config.s_range = s_range;
	}
	if let Some(b_range) = args.b_range {
		config.b_range = b_range;
	}
	if let Some(simulator) = args.simulator {
		config.simulator = simulator;
	}
	if !args.traces.is_empty() {
		config.traces = args.traces;
	}
	tracing::debug!(?config, "Sweep configuration");

	let space = config.config_space().context("Invalid sweep configuration")?;
	tracing::info!(
		"Found {} configurations for {} bytes with s in {} and b in {}",
		space.len(),
		space.capacity(),
		space.s_range(),
		space.b_range()
	);

	if args.list {
		for cache_config in space.iter() {
			println!("{cache_config}");
		}
		return Ok(());
	}

	anyhow::ensure!(!config.traces.is_empty(), "No trace files were given");
	let failure_policy = if args.keep_going {
		FailurePolicy::KeepGoing
	} else {
		FailurePolicy::Abort
	};
	let sweep = Sweep::new(space, config.traces.iter().map(TraceRef::new).collect(), failure_policy);

	// Note: Checked before running anything, so a clash doesn't waste a whole sweep.
	let results_tables = args
		.results_dir
		.as_deref()
		.map(|results_dir| results::table_paths(results_dir, sweep.traces()).map(|paths| (results_dir, paths)))
		.transpose()
		.context("Unable to choose results files")?;

	// Run the sweep
	let mut simulator = ExternalSimulator::new(&config.simulator);
	let mut report = Report::new(io::stdout().lock());
	let summary = sweep
		.run(&mut simulator, &mut report)
		.context("Unable to run sweep")?;
	tracing::info!(
		"Finished sweep with {} successful runs and {} failed runs",
		summary.successes(),
		summary.failures().len()
	);

	if let Some((results_dir, results_paths)) = &results_tables {
		self::write_results(results_dir, sweep.traces(), results_paths, &summary)
			.context("Unable to write results")?;
	}

	if !summary.is_success() {
		for failure in summary.failures() {
			tracing::error!("Run of {} over {} failed: {}", failure.config, failure.trace, failure.error);
		}
		anyhow::bail!("{} runs failed", summary.failures().len());
	}

	Ok(())
}

/// Writes a results table for each trace into `results_dir`, at `paths`
fn write_results(
	results_dir: &Path,
	traces: &[TraceRef],
	paths: &[PathBuf],
	summary: &SweepSummary,
) -> Result<(), anyhow::Error> {
	fs::create_dir_all(results_dir).context("Unable to create results directory")?;

	for (trace, path) in traces.iter().zip(paths) {
		let rows = summary
			.trace_records(trace)
			.map(ResultRow::from_record)
			.collect::<Result<Vec<_>, _>>()?;

		let file = fs::File::create(path).with_context(|| format!("Unable to create {path:?}"))?;
		results::write_table(file, rows).with_context(|| format!("Unable to write {path:?}"))?;
		tracing::info!(
			"Wrote results of {trace} to {path:?} (extraction rule v{})",
			SimSummary::EXTRACTION_RULE_VERSION
		);
	}

	Ok(())
}
