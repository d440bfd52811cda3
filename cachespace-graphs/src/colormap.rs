//! Color map

// Imports
use {
	itertools::Itertools,
	palette::{LinSrgb, Mix, Srgb},
};

/// Continuous color map
///
/// Interpolates between color stops in linear light.
#[derive(Clone, Debug)]
pub struct ColorMap {
	/// Stops, sorted by position in `0.0..=1.0`
	stops: Vec<(f32, LinSrgb)>,
}

impl ColorMap {
	/// Creates a color map from `(position, color)` stops.
	///
	/// The stops must be sorted, starting at `0.0` and ending at `1.0`.
	pub fn new(stops: impl IntoIterator<Item = (f32, Srgb)>) -> Self {
		let stops = stops
			.into_iter()
			.map(|(pos, color)| (pos, color.into_linear()))
			.collect::<Vec<(f32, LinSrgb)>>();
		assert!(
			stops.first().map(|&(pos, _)| pos) == Some(0.0) && stops.last().map(|&(pos, _)| pos) == Some(1.0),
			"Color map stops must span 0.0..=1.0"
		);
		assert!(
			stops.iter().tuple_windows().all(|((lhs, _), (rhs, _))| lhs <= rhs),
			"Color map stops must be sorted"
		);

		Self { stops }
	}

	/// Black, through red and yellow, to white
	pub fn hot() -> Self {
		Self::new([
			(0.0, Srgb::new(0.0, 0.0, 0.0)),
			(0.365, Srgb::new(1.0, 0.0, 0.0)),
			(0.746, Srgb::new(1.0, 1.0, 0.0)),
			(1.0, Srgb::new(1.0, 1.0, 1.0)),
		])
	}

	/// Returns the color at `t`, clamped to `0.0..=1.0`
	pub fn color_at(&self, t: f64) -> Srgb<u8> {
		// Note: `NaN` fails every comparison, so it ends up at `0.0`
		let t = if t >= 0.0 { t.min(1.0) as f32 } else { 0.0 };

		let color = self
			.stops
			.iter()
			.tuple_windows()
			.find(|((_, _), (end, _))| t <= *end)
			.map(|(&(start_pos, start), &(end_pos, end))| match end_pos - start_pos {
				len if len > 0.0 => start.mix(end, (t - start_pos) / len),
				_ => end,
			})
			.unwrap_or_else(|| self.stops[self.stops.len() - 1].1);

		Srgb::<f32>::from_linear(color).into_format()
	}
}

/// Formats a color as `#rrggbb`
pub fn hex(color: Srgb<u8>) -> String {
	format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}
