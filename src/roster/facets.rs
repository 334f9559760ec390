//! Sorted facet vocabularies for the selection UI.

use std::collections::BTreeSet;

use super::filter::Facet;
use super::record::ArtistRecord;

/// Distinct non-empty values per facet, sorted lexicographically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetIndex {
	pub fields: Vec<String>,
	pub roles: Vec<String>,
	pub countries: Vec<String>,
	pub cities: Vec<String>,
}

impl FacetIndex {
	pub fn build(records: &[ArtistRecord]) -> Self {
		let mut fields = BTreeSet::new();
		let mut roles = BTreeSet::new();
		let mut countries = BTreeSet::new();
		let mut cities = BTreeSet::new();

		for record in records {
			fields.extend(record.fields.iter());
			roles.extend(record.roles.iter());
			countries.insert(record.country.as_str());
			cities.insert(record.city.as_str());
		}

		let sorted = |set: BTreeSet<&str>| -> Vec<String> {
			set.into_iter()
				.filter(|v| !v.is_empty())
				.map(str::to_string)
				.collect()
		};
		Self {
			fields: sorted(fields),
			roles: sorted(roles),
			countries: sorted(countries),
			cities: sorted(cities),
		}
	}

	pub fn values(&self, facet: Facet) -> &[String] {
		match facet {
			Facet::Field => &self.fields,
			Facet::Role => &self.roles,
			Facet::Country => &self.countries,
			Facet::City => &self.cities,
		}
	}
}
