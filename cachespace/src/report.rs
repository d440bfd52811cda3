//! Sweep report

// Imports
use {
	crate::{simulator::TraceRef, sweep::RunRecord},
	std::io::{self, Write},
};

/// Trace separator
pub const TRACE_SEPARATOR: &str = "----------------";

/// Report writer
///
/// Writes each run's output exactly as the simulator produced it,
/// followed by the configuration that produced it.
#[derive(Debug)]
pub struct Report<W> {
	/// Writer
	writer: W,
}

impl<W: Write> Report<W> {
	/// Creates a new report
	pub fn new(writer: W) -> Self {
		Self { writer }
	}

	/// Writes the header for all runs of `trace`
	pub fn trace_header(&mut self, trace: &TraceRef) -> Result<(), io::Error> {
		writeln!(self.writer, "/* {trace} */")?;
		writeln!(self.writer, "{TRACE_SEPARATOR}")?;
		self.writer.flush()
	}

	/// Writes a run.
	///
	/// Flushes afterwards, so whoever reads the report sees the run before the next one starts.
	pub fn run(&mut self, record: &RunRecord) -> Result<(), io::Error> {
		self.writer.write_all(record.raw_output().as_bytes())?;
		writeln!(self.writer, " {}", record.config())?;
		self.writer.flush()
	}

	/// Returns the inner writer
	pub fn into_inner(self) -> W {
		self.writer
	}
}

#[cfg(test)]
mod tests {
	use {
		super::Report,
		crate::{CacheConfig, RunRecord, TraceRef},
		similar_asserts as diff,
	};

	#[test]
	fn output_is_followed_by_config() {
		let trace = TraceRef::new("traces/ls.trace");
		let config = CacheConfig::new(32768, 10, 5).expect("Valid config");
		let record = RunRecord::new(config, trace.clone(), "hits:1 misses:2 evictions:3\n".to_owned());

		let mut report = Report::new(vec![]);
		report.trace_header(&trace).expect("Writing to vec can't fail");
		report.run(&record).expect("Writing to vec can't fail");

		diff::assert_eq!(
			have: String::from_utf8(report.into_inner()).expect("Report should be utf-8"),
			want: "/* traces/ls.trace */\n----------------\nhits:1 misses:2 evictions:3\n s,b,E: 10,5,1\n"
		);
	}

	#[test]
	fn output_is_kept_verbatim() {
		let config = CacheConfig::new(64, 1, 1).expect("Valid config");
		let raw_output = "  odd\r\nspacing\twithout newline".to_owned();
		let record = RunRecord::new(config, TraceRef::new("t"), raw_output.clone());

		let mut report = Report::new(vec![]);
		report.run(&record).expect("Writing to vec can't fail");

		diff::assert_eq!(
			have: report.into_inner(),
			want: format!("{raw_output} s,b,E: 1,1,16\n").into_bytes()
		);
	}
}
