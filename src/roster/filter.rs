//! Facet selections and the record filter built from them.

use std::collections::BTreeSet;

use super::record::{ArtistRecord, TagSet};

/// One filterable dimension of the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facet {
	Field,
	Role,
	Country,
	City,
}

impl Facet {
	pub const ALL: [Self; 4] = [Self::Field, Self::Role, Self::Country, Self::City];

	pub fn title(self) -> &'static str {
		match self {
			Self::Field => "Filter by Field",
			Self::Role => "Filter by Role",
			Self::Country => "Filter by Country",
			Self::City => "Filter by City",
		}
	}
}

/// The user's current facet selections. An empty set leaves its facet
/// unconstrained; values within a facet are ORed, facets are ANDed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
	pub fields: BTreeSet<String>,
	pub roles: BTreeSet<String>,
	pub countries: BTreeSet<String>,
	pub cities: BTreeSet<String>,
}

impl FilterState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn selected(&self, facet: Facet) -> &BTreeSet<String> {
		match facet {
			Facet::Field => &self.fields,
			Facet::Role => &self.roles,
			Facet::Country => &self.countries,
			Facet::City => &self.cities,
		}
	}

	fn selected_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
		match facet {
			Facet::Field => &mut self.fields,
			Facet::Role => &mut self.roles,
			Facet::Country => &mut self.countries,
			Facet::City => &mut self.cities,
		}
	}

	pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
		self.selected(facet).contains(value)
	}

	/// Builder form of [`FilterState::select`].
	pub fn with(mut self, facet: Facet, value: impl Into<String>) -> Self {
		self.select(facet, value);
		self
	}

	pub fn select(&mut self, facet: Facet, value: impl Into<String>) {
		self.selected_mut(facet).insert(value.into().trim().to_string());
	}

	pub fn deselect(&mut self, facet: Facet, value: &str) {
		self.selected_mut(facet).remove(value.trim());
	}

	/// Flips `value` in or out of the selection for `facet`.
	pub fn toggle(&mut self, facet: Facet, value: &str) {
		if self.is_selected(facet, value.trim()) {
			self.deselect(facet, value);
		} else {
			self.select(facet, value);
		}
	}

	pub fn clear(&mut self) {
		*self = Self::default();
	}

	pub fn is_empty(&self) -> bool {
		Facet::ALL.iter().all(|&f| self.selected(f).is_empty())
	}

	/// Whether `record` satisfies every non-empty facet.
	pub fn matches(&self, record: &ArtistRecord) -> bool {
		let any_tag = |selected: &BTreeSet<String>, tags: &TagSet| {
			selected.is_empty() || tags.iter().any(|t| selected.contains(t))
		};
		let exact = |selected: &BTreeSet<String>, value: &str| {
			selected.is_empty() || selected.contains(value)
		};

		any_tag(&self.fields, &record.fields)
			&& any_tag(&self.roles, &record.roles)
			&& exact(&self.countries, &record.country)
			&& exact(&self.cities, &record.city)
	}

	/// The records passing the filter, in their original order.
	pub fn apply<'r>(&self, records: &'r [ArtistRecord]) -> impl Iterator<Item = &'r ArtistRecord> {
		records.iter().filter(move |r| self.matches(r))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::roster::record::{RawRow, normalize_row};

	fn record(name: &str, location: &str, fields: &str, roles: &str) -> ArtistRecord {
		let raw = RawRow::from_pairs([
			("name", name),
			("country and city", location),
			("professional field", fields),
			("role", roles),
		]);
		normalize_row(0, &raw).unwrap()
	}

	fn names<'a>(filter: &FilterState, records: &'a [ArtistRecord]) -> Vec<&'a str> {
		filter.apply(records).map(|r| r.name.as_str()).collect()
	}

	fn sample() -> Vec<ArtistRecord> {
		vec![
			record("A", "France, Paris", "Painting, Sculpture", "Artist"),
			record("B", "France", "Painting", "Curator"),
			record("C", "Germany, Berlin", "Music", "Artist, Curator"),
		]
	}

	#[test]
	fn empty_filter_passes_everything() {
		let records = sample();
		assert!(FilterState::new().is_empty());
		assert_eq!(names(&FilterState::new(), &records), ["A", "B", "C"]);
	}

	#[test]
	fn values_within_a_facet_are_ored() {
		let records = sample();
		let filter = FilterState::new()
			.with(Facet::Field, "Sculpture")
			.with(Facet::Field, "Music");
		assert_eq!(names(&filter, &records), ["A", "C"]);
	}

	#[test]
	fn facets_are_anded() {
		let records = sample();
		let filter = FilterState::new()
			.with(Facet::Role, "Curator")
			.with(Facet::Country, "France");
		assert_eq!(names(&filter, &records), ["B"]);
	}

	#[test]
	fn tag_match_is_exact_not_substring() {
		let records = vec![record("A", "", "Painting", "")];
		let filter = FilterState::new().with(Facet::Field, "Paint");
		assert!(names(&filter, &records).is_empty());
	}

	#[test]
	fn city_filter_excludes_records_without_city() {
		let records = sample();
		let filter = FilterState::new().with(Facet::City, "Paris");
		assert_eq!(names(&filter, &records), ["A"]);
	}

	#[test]
	fn toggle_and_clear() {
		let mut filter = FilterState::new();
		filter.toggle(Facet::Country, " France ");
		assert!(filter.is_selected(Facet::Country, "France"));
		filter.toggle(Facet::Country, "France");
		assert!(filter.is_empty());

		filter.select(Facet::Role, "Artist");
		filter.select(Facet::City, "Paris");
		filter.clear();
		assert_eq!(filter, FilterState::default());
	}
}
