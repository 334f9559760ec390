//! Raw rows, normalized artist records and the normalizer between them.

use std::collections::HashMap;

use super::error::{Result, RosterError};

/// Column holding the artist name. Required.
pub const COL_NAME: &str = "name";
/// Composite `"country, city"` column.
pub const COL_LOCATION: &str = "country and city";
/// Comma-separated professional fields.
pub const COL_FIELD: &str = "professional field";
/// Comma-separated roles.
pub const COL_ROLE: &str = "role";
/// Optional telegram handle.
pub const COL_TELEGRAM: &str = "telegram nickname";
/// Optional contact email.
pub const COL_EMAIL: &str = "email";
/// Optional direct photo link.
pub const COL_PHOTO_URL: &str = "photo url";
/// Optional photo link, consulted when `photo url` is empty.
pub const COL_PHOTO_DRIVE: &str = "photo google drive";

/// One row of the record source, keyed by column name.
///
/// Missing columns read as the empty string, so optional columns never need
/// special casing downstream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
	cells: HashMap<String, String>,
}

impl RawRow {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a row from `(column, value)` pairs. Column names are trimmed.
	pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		let mut row = Self::new();
		for (k, v) in pairs {
			row.insert(k, v);
		}
		row
	}

	pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
		let column: String = column.into();
		self.cells.insert(column.trim().to_string(), value.into());
	}

	/// Cell value for `column`, or `""` when the column is absent.
	pub fn get(&self, column: &str) -> &str {
		self.cells.get(column).map(String::as_str).unwrap_or("")
	}
}

/// An order-insignificant set of tags that remembers first-seen order for
/// stable iteration.
#[derive(Clone, Debug, Default, Eq)]
pub struct TagSet(Vec<String>);

impl TagSet {
	/// Splits a comma-separated list, trimming tokens and dropping empty and
	/// repeated ones.
	pub fn parse(raw: &str) -> Self {
		raw.split(',').map(str::trim).collect()
	}

	pub fn contains(&self, tag: &str) -> bool {
		self.0.iter().any(|t| t == tag)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Joins back into the comma-separated form [`TagSet::parse`] accepts.
	pub fn join(&self) -> String {
		self.0.join(", ")
	}
}

impl<'a> FromIterator<&'a str> for TagSet {
	fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
		let mut tags: Vec<String> = Vec::new();
		for tag in iter {
			if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
				tags.push(tag.to_string());
			}
		}
		Self(tags)
	}
}

impl PartialEq for TagSet {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().all(|t| other.contains(t))
	}
}

/// One person from the roster, normalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistRecord {
	pub name: String,
	pub country: String,
	pub city: String,
	pub fields: TagSet,
	pub roles: TagSet,
	pub telegram: Option<String>,
	pub email: Option<String>,
	pub photo_url: Option<String>,
}

impl ArtistRecord {
	/// Renders the record back into a raw row. Normalizing the result yields
	/// an equal record.
	pub fn to_row(&self) -> RawRow {
		let location = if self.city.is_empty() {
			self.country.clone()
		} else {
			format!("{}, {}", self.country, self.city)
		};
		let mut row = RawRow::from_pairs([
			(COL_NAME, self.name.clone()),
			(COL_LOCATION, location),
			(COL_FIELD, self.fields.join()),
			(COL_ROLE, self.roles.join()),
		]);
		for (column, value) in [
			(COL_TELEGRAM, &self.telegram),
			(COL_EMAIL, &self.email),
			(COL_PHOTO_URL, &self.photo_url),
		] {
			if let Some(v) = value {
				row.insert(column, v.clone());
			}
		}
		row
	}
}

/// Splits `"country, city"` on the first comma. Without a comma the whole
/// value is the country.
pub fn split_location(raw: &str) -> (String, String) {
	match raw.split_once(',') {
		Some((country, city)) => (country.trim().to_string(), city.trim().to_string()),
		None => (raw.trim().to_string(), String::new()),
	}
}

fn optional(value: &str) -> Option<String> {
	let value = value.trim();
	(!value.is_empty()).then(|| value.to_string())
}

/// Normalizes one source row. `row` is the zero-based data row index, used
/// only for error reporting.
pub fn normalize_row(row: usize, raw: &RawRow) -> Result<ArtistRecord> {
	let name = raw.get(COL_NAME).trim();
	if name.is_empty() {
		return Err(RosterError::MissingName { row });
	}
	let (country, city) = split_location(raw.get(COL_LOCATION));

	Ok(ArtistRecord {
		name: name.to_string(),
		country,
		city,
		fields: TagSet::parse(raw.get(COL_FIELD)),
		roles: TagSet::parse(raw.get(COL_ROLE)),
		telegram: optional(raw.get(COL_TELEGRAM)),
		email: optional(raw.get(COL_EMAIL)),
		photo_url: optional(raw.get(COL_PHOTO_URL)).or_else(|| optional(raw.get(COL_PHOTO_DRIVE))),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(pairs: &[(&str, &str)]) -> RawRow {
		RawRow::from_pairs(pairs.iter().copied())
	}

	#[test]
	fn splits_location_on_first_comma() {
		assert_eq!(
			split_location(" France ,  Paris "),
			("France".into(), "Paris".into())
		);
		assert_eq!(
			split_location("USA, New York, Brooklyn"),
			("USA".into(), "New York, Brooklyn".into())
		);
		assert_eq!(split_location(" Georgia "), ("Georgia".into(), String::new()));
		assert_eq!(split_location(""), (String::new(), String::new()));
	}

	#[test]
	fn city_only_when_comma_present() {
		for raw in ["France", "France, Paris", ", Paris", "Spain,", ""] {
			let (_, city) = split_location(raw);
			if !city.is_empty() {
				assert!(raw.contains(','), "{raw:?} produced city {city:?}");
			}
		}
	}

	#[test]
	fn tags_are_trimmed_and_deduplicated() {
		let tags = TagSet::parse(" Painting, Sculpture ,,Painting , ");
		assert_eq!(tags.len(), 2);
		assert!(tags.contains("Painting"));
		assert!(tags.contains("Sculpture"));
		assert!(!tags.contains("Paint"));
		assert_eq!(tags.iter().collect::<Vec<_>>(), ["Painting", "Sculpture"]);
	}

	#[test]
	fn tag_set_equality_ignores_order() {
		assert_eq!(TagSet::parse("a, b"), TagSet::parse("b, a"));
		assert_ne!(TagSet::parse("a, b"), TagSet::parse("a"));
	}

	#[test]
	fn normalizes_full_row() {
		let rec = normalize_row(
			0,
			&row(&[
				("name", "  Anna "),
				("country and city", "France, Paris"),
				("professional field", "Painting, Sculpture"),
				("role", "Artist"),
				("telegram nickname", "@anna"),
				("email", " "),
			]),
		)
		.unwrap();
		assert_eq!(rec.name, "Anna");
		assert_eq!(rec.country, "France");
		assert_eq!(rec.city, "Paris");
		assert_eq!(rec.fields, TagSet::parse("Sculpture, Painting"));
		assert_eq!(rec.roles, TagSet::parse("Artist"));
		assert_eq!(rec.telegram.as_deref(), Some("@anna"));
		assert_eq!(rec.email, None);
		assert_eq!(rec.photo_url, None);
	}

	#[test]
	fn falls_back_to_drive_photo_column() {
		let rec = normalize_row(
			0,
			&row(&[
				("name", "B"),
				("photo url", ""),
				("photo google drive", "https://drive.example/b.png"),
			]),
		)
		.unwrap();
		assert_eq!(rec.photo_url.as_deref(), Some("https://drive.example/b.png"));
	}

	#[test]
	fn rejects_blank_name() {
		let err = normalize_row(7, &row(&[("name", "   "), ("role", "Artist")])).unwrap_err();
		assert!(matches!(err, RosterError::MissingName { row: 7 }));
		assert!(normalize_row(0, &RawRow::new()).is_err());
	}

	#[test]
	fn normalizing_is_idempotent() {
		let rows = [
			row(&[
				("name", "A"),
				("country and city", " France ,Paris, 11e "),
				("professional field", "Painting,Sculpture, Painting"),
				("role", " Artist "),
				("email", "a@example.org"),
			]),
			row(&[("name", "B"), ("country and city", ", Berlin")]),
			row(&[("name", "C"), ("country and city", "Japan")]),
			row(&[("name", "D")]),
		];
		for (i, raw) in rows.iter().enumerate() {
			let once = normalize_row(i, raw).unwrap();
			let twice = normalize_row(i, &once.to_row()).unwrap();
			assert_eq!(once, twice);
		}
	}
}
