//! Creates graphs from `cachespace`'s results tables

// Modules
mod args;
mod colormap;
mod plot;
mod render;

// Imports
use {
	anyhow::Context,
	args::Args,
	cachespace::results,
	cachespace_util::logger,
	clap::Parser,
	colormap::ColorMap,
	plot::ScatterPlot,
	std::fs,
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Parse the whole table before drawing anything
	let rows = {
		let input_file = fs::File::open(&args.input_file).context("Unable to open input file")?;
		results::read_table(input_file).context("Unable to parse input file")?
	};
	tracing::info!("Loaded {} rows from {:?}", rows.len(), args.input_file);

	// Then build the plot and render it
	let color_map = ColorMap::hot();
	let plot = ScatterPlot::from_rows(&rows, &color_map).context("Unable to build plot")?;
	let metric_range = plot.metric_range();
	tracing::debug!(min = metric_range.min, max = metric_range.max, "Metric range");

	let mut fg = render::build_figure(&plot, &color_map, &render::Style {
		point_size: args.point_size,
		title:      args.title,
	});
	render::output(&mut fg, &args.output)?;

	Ok(())
}
