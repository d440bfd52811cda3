//! Rendering

// Imports
use {
	crate::{
		args,
		colormap::{self, ColorMap},
		plot::{self, ScatterPlot},
	},
	gnuplot::{AxesCommon, Color, Figure, Fix, PointSize, PointSymbol},
};

/// Number of segments in the color scale
const SCALE_SEGMENTS: usize = 64;

/// Style
#[derive(Clone, Debug)]
pub struct Style {
	/// Point size
	pub point_size: f64,

	/// Title
	pub title: Option<String>,
}

/// Builds the figure for `plot`.
///
/// The scatter takes up most of the figure, with the color scale to its right.
pub fn build_figure(plot: &ScatterPlot, color_map: &ColorMap, style: &Style) -> Figure {
	let mut fg = Figure::new();

	// Note: Each point is its own series, so each can have its own color.
	let scatter = fg.axes3d();
	scatter
		.set_pos(0.0, 0.0)
		.set_size(0.82, 1.0)
		.set_x_label("s", &[])
		.set_y_label("b", &[])
		.set_z_label("E", &[]);
	if let Some(title) = &style.title {
		scatter.set_title(title, &[]);
	}
	for point in plot.points() {
		let color = colormap::hex(point.color);
		tracing::trace!(s = point.s, b = point.b, e = point.e, metric = point.metric, %color, "Drawing point");
		scatter.points(
			[f64::from(point.s)],
			[f64::from(point.b)],
			[point.e as f64],
			&[PointSymbol('O'), PointSize(style.point_size), Color(color.as_str())],
		);
	}

	let segments = plot::scale_segments(plot.metric_range(), color_map, SCALE_SEGMENTS);
	let (scale_min, scale_max) = match (segments.first(), segments.last()) {
		(Some(first), Some(last)) => (first.start, last.end),
		_ => (0.0, 1.0),
	};

	let scale = fg.axes2d();
	scale
		.set_pos(0.86, 0.15)
		.set_size(0.06, 0.7)
		.set_x_range(Fix(0.0), Fix(1.0))
		.set_y_range(Fix(scale_min), Fix(scale_max))
		.set_x_ticks(None, &[], &[])
		.set_y_label("p", &[]);
	for segment in &segments {
		let color = colormap::hex(segment.color);
		scale.fill_between(
			[0.0, 1.0],
			[segment.start; 2],
			[segment.end; 2],
			&[Color(color.as_str())],
		);
	}

	fg
}

/// Outputs `fg` to a file and / or an interactive window
pub fn output(fg: &mut Figure, output: &args::Output) -> Result<(), anyhow::Error> {
	if let Some(file) = &output.file {
		fg.save_to_png(file, output.width, output.height)
			.map_err(|err| anyhow::anyhow!("Unable to save output file: {err:?}"))?;
		tracing::info!("Saved graph to {file:?}");
	}

	if output.interactive || output.file.is_none() {
		fg.show()
			.map_err(|err| anyhow::anyhow!("Unable to show graph: {err:?}"))?;
	}

	Ok(())
}
