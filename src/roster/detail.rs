//! Resolving a selected node back to the artist behind it.

use std::collections::HashMap;

use log::debug;

use super::error::{Result, RosterError};
use super::graph::{NodeKey, NodeKind};
use super::record::ArtistRecord;
use super::source::Roster;

impl Roster {
	/// First record whose name equals `name` after trimming.
	pub fn find_artist(&self, name: &str) -> Option<&ArtistRecord> {
		let name = name.trim();
		self.records().iter().find(|r| r.name == name)
	}

	/// The artist behind a renderer node id. Anything other than a known
	/// person node is a [`RosterError::LookupMiss`].
	pub fn lookup_node(&self, id: &str) -> Result<&ArtistRecord> {
		let found = NodeKey::parse(id)
			.filter(|key| key.kind == NodeKind::Person)
			.and_then(|key| self.find_artist(&key.label));
		found.ok_or_else(|| {
			debug!("no artist behind node {id}");
			RosterError::LookupMiss { id: id.to_string() }
		})
	}

	/// Hover card text for every person node, keyed by node id. Duplicate
	/// names keep the first record, like [`Roster::lookup_node`].
	pub fn hover_cards(&self) -> HashMap<String, Vec<String>> {
		let mut cards = HashMap::new();
		for record in self.records() {
			cards
				.entry(NodeKey::new(NodeKind::Person, &record.name).id())
				.or_insert_with(|| ArtistDetail::new(record, "").card_lines());
		}
		cards
	}
}

/// What the detail card shows for one artist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistDetail {
	pub name: String,
	pub photo: String,
	pub location: String,
	pub fields: Vec<String>,
	pub roles: Vec<String>,
	pub telegram: Option<String>,
	pub email: Option<String>,
}

impl ArtistDetail {
	/// `default_photo` stands in when the record has no photo link.
	pub fn new(record: &ArtistRecord, default_photo: &str) -> Self {
		let location = match (record.country.is_empty(), record.city.is_empty()) {
			(_, true) => record.country.clone(),
			(true, false) => record.city.clone(),
			(false, false) => format!("{}, {}", record.country, record.city),
		};
		Self {
			name: record.name.clone(),
			photo: record
				.photo_url
				.clone()
				.unwrap_or_else(|| default_photo.to_string()),
			location,
			fields: record.fields.iter().map(str::to_string).collect(),
			roles: record.roles.iter().map(str::to_string).collect(),
			telegram: record.telegram.clone(),
			email: record.email.clone(),
		}
	}

	/// Name first, then whichever contacts are present.
	pub fn card_lines(&self) -> Vec<String> {
		let mut lines = vec![self.name.clone()];
		lines.extend(self.telegram.as_ref().map(|t| format!("Telegram: {t}")));
		lines.extend(self.email.as_ref().map(|e| format!("Email: {e}")));
		lines
	}
}
