//! Plot
//!
//! Everything about the plot that doesn't depend on how it's drawn.

// Imports
use {
	crate::colormap::ColorMap,
	anyhow::Context,
	cachespace::ResultRow,
	palette::Srgb,
};

/// Range of the metric over all points
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct MetricRange {
	pub min: f64,
	pub max: f64,
}

impl MetricRange {
	/// Returns the range of the metric in `rows`, or `None` if there are no rows
	pub fn from_rows(rows: &[ResultRow]) -> Option<Self> {
		rows.iter().map(|row| row.p).fold(None, |range, p| {
			Some(match range {
				None => Self { min: p, max: p },
				Some(Self { min, max }) => Self {
					min: min.min(p),
					max: max.max(p),
				},
			})
		})
	}

	/// Maps `value` to `0.0..=1.0` within this range.
	///
	/// If the range is a single value, maps everything to the middle.
	pub fn normalize(&self, value: f64) -> f64 {
		match self.max - self.min {
			len if len > 0.0 => ((value - self.min) / len).clamp(0.0, 1.0),
			_ => 0.5,
		}
	}
}

/// Scatter plot point
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct ScatterPoint {
	pub s:      u32,
	pub b:      u32,
	pub e:      u64,
	pub metric: f64,
	pub color:  Srgb<u8>,
}

/// 3D scatter plot of a results table
#[derive(Clone, Debug)]
pub struct ScatterPlot {
	/// Points, one per row
	points: Vec<ScatterPoint>,

	/// Metric range
	metric_range: MetricRange,
}

impl ScatterPlot {
	/// Creates the plot of `rows`, coloring each point by its metric
	pub fn from_rows(rows: &[ResultRow], color_map: &ColorMap) -> Result<Self, anyhow::Error> {
		let metric_range = MetricRange::from_rows(rows).context("Results table has no rows")?;
		let points = rows
			.iter()
			.map(|row| ScatterPoint {
				s:      row.s,
				b:      row.b,
				e:      row.e,
				metric: row.p,
				color:  color_map.color_at(metric_range.normalize(row.p)),
			})
			.collect();

		Ok(Self { points, metric_range })
	}

	/// Returns all points
	pub fn points(&self) -> &[ScatterPoint] {
		&self.points
	}

	/// Returns the metric range
	pub fn metric_range(&self) -> MetricRange {
		self.metric_range
	}
}

/// Color scale segment
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct ScaleSegment {
	pub start: f64,
	pub end:   f64,
	pub color: Srgb<u8>,
}

/// Splits `range` into `segments` equal parts, each colored at its middle.
///
/// If the range is a single value, returns a single segment around it instead.
pub fn scale_segments(range: MetricRange, color_map: &ColorMap, segments: usize) -> Vec<ScaleSegment> {
	let len = range.max - range.min;
	if len <= 0.0 {
		return vec![ScaleSegment {
			start: range.min - 0.5,
			end:   range.max + 0.5,
			color: color_map.color_at(0.5),
		}];
	}

	(0..segments)
		.map(|idx| {
			let start = range.min + len * idx as f64 / segments as f64;
			let end = range.min + len * (idx + 1) as f64 / segments as f64;
			ScaleSegment {
				start,
				end,
				color: color_map.color_at(range.normalize((start + end) / 2.0)),
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use {
		super::{MetricRange, ScatterPlot},
		crate::colormap::ColorMap,
		cachespace::ResultRow,
		similar_asserts as diff,
	};

	fn row(s: u32, b: u32, e: u64, p: f64) -> ResultRow {
		ResultRow { s, b, e, p }
	}

	#[test]
	fn one_point_per_row() {
		let rows = vec![
			row(1, 3, 1024, 0.5),
			row(5, 5, 32, 0.97),
			row(5, 5, 32, 0.97),
			row(10, 5, 1, 0.75),
		];
		let color_map = ColorMap::hot();
		let plot = ScatterPlot::from_rows(&rows, &color_map).expect("Rows aren't empty");

		diff::assert_eq!(have: plot.points().len(), want: rows.len());
		for (point, row) in plot.points().iter().zip(&rows) {
			diff::assert_eq!(have: (point.s, point.b, point.e, point.metric), want: (row.s, row.b, row.e, row.p));
		}
	}

	#[test]
	fn points_colored_by_metric() {
		let rows = vec![row(1, 3, 1024, 0.25), row(5, 5, 32, 0.75), row(10, 5, 1, 0.5)];
		let color_map = ColorMap::hot();
		let plot = ScatterPlot::from_rows(&rows, &color_map).expect("Rows aren't empty");

		diff::assert_eq!(have: plot.metric_range(), want: MetricRange { min: 0.25, max: 0.75 });

		let best = plot.points().iter().find(|point| point.metric == 0.75).expect("Point exists");
		diff::assert_eq!(have: (best.s, best.b, best.e), want: (5, 5, 32));
		diff::assert_eq!(have: best.color, want: color_map.color_at(1.0));
		diff::assert_eq!(have: plot.points()[0].color, want: color_map.color_at(0.0));
		diff::assert_eq!(have: plot.points()[2].color, want: color_map.color_at(0.5));
	}

	#[test]
	fn single_metric_uses_middle_color() {
		let rows = vec![row(1, 3, 1024, 0.25), row(2, 3, 512, 0.25)];
		let color_map = ColorMap::hot();
		let plot = ScatterPlot::from_rows(&rows, &color_map).expect("Rows aren't empty");

		assert!(plot.points().iter().all(|point| point.color == color_map.color_at(0.5)));
	}

	#[test]
	fn empty_table_is_rejected() {
		assert!(ScatterPlot::from_rows(&[], &ColorMap::hot()).is_err());
	}

	#[test]
	fn scale_segments_cover_range() {
		let range = MetricRange { min: 0.0, max: 1.0 };
		let color_map = ColorMap::hot();
		let segments = super::scale_segments(range, &color_map, 4);

		diff::assert_eq!(
			have: segments.iter().map(|segment| (segment.start, segment.end)).collect::<Vec<_>>(),
			want: vec![(0.0, 0.25), (0.25, 0.5), (0.5, 0.75), (0.75, 1.0)]
		);
		diff::assert_eq!(have: segments[0].color, want: color_map.color_at(0.125));
	}

	#[test]
	fn scale_segments_single_metric() {
		let range = MetricRange { min: 0.25, max: 0.25 };
		let color_map = ColorMap::hot();
		let segments = super::scale_segments(range, &color_map, 64);

		diff::assert_eq!(have: segments.len(), want: 1);
		diff::assert_eq!(have: (segments[0].start, segments[0].end), want: (-0.25, 0.75));
		diff::assert_eq!(have: segments[0].color, want: color_map.color_at(0.5));
	}
}
