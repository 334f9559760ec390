//! Record sources and the loaded, immutable roster.

use csv::{ReaderBuilder, Trim};
use log::{info, warn};

use super::error::{Result, RosterError};
use super::record::{ArtistRecord, COL_FIELD, COL_LOCATION, COL_NAME, COL_ROLE, RawRow, normalize_row};

/// Columns the graph is built from. Absent ones read as empty, so every
/// artist is still loaded, just without those attribute nodes.
const GRAPH_COLUMNS: [&str; 3] = [COL_LOCATION, COL_FIELD, COL_ROLE];

/// Graph columns missing from a header line.
fn missing_graph_columns(headers: &[&str]) -> Vec<&'static str> {
	GRAPH_COLUMNS
		.into_iter()
		.filter(|col| !headers.contains(col))
		.collect()
}

/// Anything that can hand over the roster as raw tabular rows.
pub trait RecordSource {
	fn rows(&self) -> Result<Vec<RawRow>>;
}

/// Rows held in memory, mostly useful for tests and demos.
impl RecordSource for Vec<RawRow> {
	fn rows(&self) -> Result<Vec<RawRow>> {
		Ok(self.clone())
	}
}

/// CSV text with a header line.
pub struct CsvSource {
	content: String,
	delimiter: u8,
}

impl CsvSource {
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
			delimiter: b',',
		}
	}

	pub fn with_delimiter(mut self, delimiter: u8) -> Self {
		self.delimiter = delimiter;
		self
	}
}

impl RecordSource for CsvSource {
	fn rows(&self) -> Result<Vec<RawRow>> {
		let mut reader = ReaderBuilder::new()
			.delimiter(self.delimiter)
			.trim(Trim::Headers)
			.flexible(true)
			.from_reader(self.content.as_bytes());

		let headers = reader.headers()?.clone();
		let names: Vec<&str> = headers.iter().collect();
		if !names.contains(&COL_NAME) {
			return Err(RosterError::MissingColumn { column: COL_NAME });
		}
		for column in missing_graph_columns(&names) {
			warn!("roster has no {column:?} column, treating it as empty");
		}

		let mut rows = Vec::new();
		for record in reader.records() {
			let record = record?;
			rows.push(RawRow::from_pairs(headers.iter().zip(record.iter())));
		}
		Ok(rows)
	}
}

/// The normalized, read-only dataset for one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
	records: Vec<ArtistRecord>,
	rejected: usize,
}

impl Roster {
	/// Normalizes `rows`, skipping (and counting) the ones without a name.
	pub fn from_rows(rows: impl IntoIterator<Item = RawRow>) -> Self {
		let mut roster = Self::default();
		for (i, raw) in rows.into_iter().enumerate() {
			match normalize_row(i, &raw) {
				Ok(record) => roster.records.push(record),
				Err(err) => {
					warn!("skipping row: {err}");
					roster.rejected += 1;
				}
			}
		}
		info!(
			"roster loaded: {} artists, {} rows rejected",
			roster.records.len(),
			roster.rejected
		);
		roster
	}

	pub fn load(source: &impl RecordSource) -> Result<Self> {
		Ok(Self::from_rows(source.rows()?))
	}

	pub fn records(&self) -> &[ArtistRecord] {
		&self.records
	}

	/// Number of source rows dropped for data-quality reasons.
	pub fn rejected(&self) -> usize {
		self.rejected
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Distinct artist names in roster order.
	pub fn artist_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = Vec::with_capacity(self.records.len());
		for record in &self.records {
			if !names.contains(&record.name.as_str()) {
				names.push(&record.name);
			}
		}
		names
	}
}
