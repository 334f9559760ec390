//! Errors raised while loading the roster and resolving detail lookups.

use thiserror::Error;

/// Result alias for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Everything that can go wrong between the record source and the detail panel.
///
/// None of these are fatal to the app: rejected rows are skipped, lookup misses
/// render a neutral card, and a failed load renders an empty roster.
#[derive(Debug, Error)]
pub enum RosterError {
	/// A row had no usable `name`.
	#[error("row {row} has no name")]
	MissingName { row: usize },

	/// The source header lacks a required column.
	#[error("missing required column: {column}")]
	MissingColumn { column: &'static str },

	/// The CSV payload could not be read.
	#[error("csv error: {0}")]
	Csv(#[from] csv::Error),

	/// A selected node id does not name a known artist.
	#[error("no artist for node {id}")]
	LookupMiss { id: String },
}
