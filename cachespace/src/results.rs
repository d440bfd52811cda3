//! Results
//!
//! The simulator's output is free text. To build a results table out of it,
//! we extract a [`SimSummary`] from each run, following the rule documented
//! on [`SimSummary::parse`], and turn it into a [`ResultRow`] whose metric is
//! the hit rate.
//!
//! Results tables are csv files with the header `s,b,E,p`.

// Imports
use {
	crate::{simulator::TraceRef, sweep::RunRecord},
	anyhow::Context,
	regex::Regex,
	std::{
		collections::HashSet,
		io,
		path::{Path, PathBuf},
		sync::OnceLock,
	},
};

/// Simulator summary
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct SimSummary {
	pub hits:      u64,
	pub misses:    u64,
	pub evictions: u64,
}

impl SimSummary {
	/// Version of the extraction rule implemented by [`SimSummary::parse`]
	pub const EXTRACTION_RULE_VERSION: u32 = 1;

	/// Extracts the summary from a simulator's output.
	///
	/// Uses the first occurrence of `hits:<n> misses:<n> evictions:<n>`,
	/// where any amount of whitespace may follow each colon and at least
	/// one whitespace separates each count from the next label.
	/// Everything else in the output is ignored.
	pub fn parse(raw_output: &str) -> Result<Self, anyhow::Error> {
		static SUMMARY_REGEX: OnceLock<Regex> = OnceLock::new();
		let regex = SUMMARY_REGEX.get_or_init(|| {
			Regex::new(r"hits:\s*(\d+)\s+misses:\s*(\d+)\s+evictions:\s*(\d+)").expect("Summary regex was invalid")
		});

		let captures = regex
			.captures(raw_output)
			.context("Output had no `hits: misses: evictions:` summary")?;
		let count = |idx: usize, name: &str| {
			captures[idx]
				.parse::<u64>()
				.with_context(|| format!("Unable to parse {name} count"))
		};

		Ok(Self {
			hits:      count(1, "hit")?,
			misses:    count(2, "miss")?,
			evictions: count(3, "eviction")?,
		})
	}

	/// Returns the total number of accesses
	pub fn accesses(&self) -> u64 {
		self.hits.saturating_add(self.misses)
	}

	/// Returns the fraction of accesses that hit, or `0.0` if there were no accesses
	pub fn hit_rate(&self) -> f64 {
		match self.accesses() {
			0 => 0.0,
			accesses => self.hits as f64 / accesses as f64,
		}
	}
}

/// Results table row
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ResultRow {
	/// Set-index bits
	pub s: u32,

	/// Block-offset bits
	pub b: u32,

	/// Associativity
	#[serde(rename = "E")]
	pub e: u64,

	/// Performance metric
	#[serde(alias = "metric")]
	pub p: f64,
}

impl ResultRow {
	/// Creates the row for a run, with the run's hit rate as the metric
	pub fn from_record(record: &RunRecord) -> Result<Self, anyhow::Error> {
		let config = record.config();
		let summary = SimSummary::parse(record.raw_output())
			.with_context(|| format!("Unable to extract summary of {config} over {}", record.trace()))?;

		Ok(Self {
			s: config.s(),
			b: config.b(),
			e: config.e(),
			p: summary.hit_rate(),
		})
	}
}

/// Columns of a results table, along with all names accepted for them
pub const COLUMNS: [(&str, &[&str]); 4] = [("s", &["s"]), ("b", &["b"]), ("E", &["E"]), ("p", &["p", "metric"])];

/// Reads a whole results table.
///
/// Fails if any column is missing or any row is malformed, without returning
/// any of the rows read so far.
pub fn read_table<R: io::Read>(reader: R) -> Result<Vec<ResultRow>, anyhow::Error> {
	let mut reader = csv::ReaderBuilder::new()
		.flexible(false)
		.trim(csv::Trim::All)
		.from_reader(reader);

	// Note: We check the header ourselves so a table with no rows still gets validated.
	let headers = reader.headers().context("Unable to read header")?.clone();
	for (column, names) in COLUMNS {
		anyhow::ensure!(
			headers.iter().any(|header| names.contains(&header)),
			"Missing column {column:?}, found columns {:?}",
			headers.iter().collect::<Vec<_>>()
		);
	}

	reader
		.deserialize::<ResultRow>()
		.enumerate()
		.map(|(idx, row)| -> Result<ResultRow, anyhow::Error> {
			let row = row.with_context(|| format!("Unable to parse row {}", idx + 1))?;
			anyhow::ensure!(row.p.is_finite(), "Row {} has a non-finite metric {}", idx + 1, row.p);
			Ok(row)
		})
		.collect()
}

/// Writes a results table
pub fn write_table<W: io::Write>(writer: W, rows: impl IntoIterator<Item = ResultRow>) -> Result<(), anyhow::Error> {
	let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

	// Note: Written by hand so that an empty table still has a header.
	writer
		.write_record(COLUMNS.map(|(column, _)| column))
		.context("Unable to write header")?;
	for row in rows {
		writer.serialize(row).context("Unable to write row")?;
	}
	writer.flush().context("Unable to flush table")?;

	Ok(())
}

/// Returns the path of each trace's results table inside `results_dir`.
///
/// Each table is named after its trace's file stem. Fails if two traces
/// would share a table.
pub fn table_paths(results_dir: &Path, traces: &[TraceRef]) -> Result<Vec<PathBuf>, anyhow::Error> {
	let mut seen = HashSet::new();
	traces
		.iter()
		.map(|trace| {
			let mut file_name = trace
				.path()
				.file_stem()
				.with_context(|| format!("Trace {trace} has no file name"))?
				.to_os_string();
			file_name.push(".csv");
			let path = results_dir.join(file_name);
			anyhow::ensure!(
				seen.insert(path.clone()),
				"Trace {trace} would overwrite the results of another trace at {path:?}"
			);

			Ok(path)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use {
		super::{ResultRow, SimSummary},
		crate::{CacheConfig, RunRecord, TraceRef},
		similar_asserts as diff,
		std::path::{Path, PathBuf},
	};

	#[test]
	fn parse_compact_summary() {
		diff::assert_eq!(
			have: SimSummary::parse("hits:4 misses:5 evictions:3\n").ok(),
			want: Some(SimSummary { hits: 4, misses: 5, evictions: 3 })
		);
	}

	#[test]
	fn parse_spaced_summary() {
		let output = "hits: 267989  misses: 1146  evictions: 1114\nmiss ratio: 0.43%\n";
		diff::assert_eq!(
			have: SimSummary::parse(output).ok(),
			want: Some(SimSummary {
				hits:      267989,
				misses:    1146,
				evictions: 1114,
			})
		);
	}

	#[test]
	fn parse_ignores_verbose_lines() {
		let output = "L 10,4 miss\nS 18,4 hit\nhits:1 misses:1 evictions:0\n";
		diff::assert_eq!(have: SimSummary::parse(output).map(|summary| summary.hits).ok(), want: Some(1));
	}

	#[test]
	fn parse_without_summary() {
		assert!(SimSummary::parse("").is_err());
		assert!(SimSummary::parse("hits:4 misses:5\n").is_err());
		assert!(SimSummary::parse("hits:x misses:5 evictions:3\n").is_err());
	}

	#[test]
	fn hit_rate() {
		let summary = SimSummary {
			hits:      3,
			misses:    1,
			evictions: 0,
		};
		diff::assert_eq!(have: summary.hit_rate(), want: 0.75);

		let empty = SimSummary {
			hits:      0,
			misses:    0,
			evictions: 0,
		};
		diff::assert_eq!(have: empty.hit_rate(), want: 0.0);
	}

	#[test]
	fn row_from_record() {
		let config = CacheConfig::new(32768, 5, 5).expect("Valid config");
		let record = RunRecord::new(
			config,
			TraceRef::new("traces/ls.trace"),
			"hits:97 misses:3 evictions:1\n".to_owned(),
		);

		diff::assert_eq!(have: ResultRow::from_record(&record).ok(), want: Some(ResultRow {
			s: 5,
			b: 5,
			e: 32,
			p: 0.97,
		}));
	}

	#[test]
	fn row_from_record_without_summary() {
		let config = CacheConfig::new(32768, 5, 5).expect("Valid config");
		let record = RunRecord::new(config, TraceRef::new("traces/ls.trace"), "segfault\n".to_owned());
		assert!(ResultRow::from_record(&record).is_err());
	}

	#[test]
	fn read_table() {
		let table = "s,b,E,p\n5,5,32,0.97\n10,5,1,0.5\n";
		diff::assert_eq!(have: super::read_table(table.as_bytes()).ok(), want: Some(vec![
			ResultRow {
				s: 5,
				b: 5,
				e: 32,
				p: 0.97,
			},
			ResultRow {
				s: 10,
				b: 5,
				e: 1,
				p: 0.5,
			},
		]));
	}

	#[test]
	fn read_table_metric_alias_and_order() {
		let table = "metric, E, b, s\n0.25, 4, 3, 2\n";
		diff::assert_eq!(have: super::read_table(table.as_bytes()).ok(), want: Some(vec![ResultRow {
			s: 2,
			b: 3,
			e: 4,
			p: 0.25,
		}]));
	}

	#[test]
	fn read_table_missing_column() {
		assert!(super::read_table("s,b,p\n5,5,0.97\n".as_bytes()).is_err());
		assert!(super::read_table("s,b,p\n".as_bytes()).is_err());
		assert!(super::read_table("".as_bytes()).is_err());
	}

	#[test]
	fn read_table_malformed_rows() {
		assert!(super::read_table("s,b,E,p\n5,5,32,0.97\n5,5,x,0.5\n".as_bytes()).is_err());
		assert!(super::read_table("s,b,E,p\n5,5,32\n".as_bytes()).is_err());
		assert!(super::read_table("s,b,E,p\n5,5,32.5,0.1\n".as_bytes()).is_err());
		assert!(super::read_table("s,b,E,p\n5,5,32,NaN\n".as_bytes()).is_err());
	}

	#[test]
	fn written_table_reads_back() {
		let rows = vec![
			ResultRow {
				s: 1,
				b: 3,
				e: 1024,
				p: 0.125,
			},
			ResultRow {
				s: 10,
				b: 5,
				e: 1,
				p: 1.0,
			},
		];

		let mut table = vec![];
		super::write_table(&mut table, rows.clone()).expect("Writing to vec can't fail");
		let table = String::from_utf8(table).expect("Table should be utf-8");

		assert!(table.starts_with("s,b,E,p\n"));
		diff::assert_eq!(have: super::read_table(table.as_bytes()).ok(), want: Some(rows));
	}

	#[test]
	fn empty_table_has_header() {
		let mut table = vec![];
		super::write_table(&mut table, []).expect("Writing to vec can't fail");
		diff::assert_eq!(have: table, want: b"s,b,E,p\n".to_vec());
	}

	#[test]
	fn table_paths_follow_trace_stems() {
		let traces = [TraceRef::new("traces/ls.trace"), TraceRef::new("other/mmul.ijk.trace")];
		diff::assert_eq!(
			have: super::table_paths(Path::new("out"), &traces).ok(),
			want: Some(vec![PathBuf::from("out/ls.csv"), PathBuf::from("out/mmul.ijk.csv")])
		);
	}

	#[test]
	fn table_paths_reject_shared_stems() {
		let traces = [TraceRef::new("traces/ls.trace"), TraceRef::new("traces/ls.trace")];
		assert!(super::table_paths(Path::new("out"), &traces).is_err());

		let traces = [TraceRef::new("a/ls.trace"), TraceRef::new("b/ls.log")];
		assert!(super::table_paths(Path::new("out"), &traces).is_err());
	}
}
