//! Derives the artist/attribute graph from the filtered roster.
//!
//! Every node is identified by its [`NodeKey`] (kind + trimmed label), so a
//! field shared by many artists is one node, and a country that happens to be
//! spelled like a role stays two nodes. The graph is rebuilt from scratch for
//! every filter change; iteration order follows the filtered record order.

use std::collections::{HashMap, HashSet};

use log::debug;
use serde::Serialize;

use super::filter::FilterState;
use super::record::ArtistRecord;

/// Category of a graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeKind {
	Person,
	Location,
	Field,
	Role,
}

impl NodeKind {
	pub const ALL: [Self; 4] = [Self::Person, Self::Location, Self::Field, Self::Role];

	/// Prefix used in node ids.
	pub fn prefix(self) -> &'static str {
		match self {
			Self::Person => "person",
			Self::Location => "location",
			Self::Field => "field",
			Self::Role => "role",
		}
	}

	fn from_prefix(prefix: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|k| k.prefix() == prefix)
	}
}

/// Identity of a node: two keys are the same node iff kind and label match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey {
	pub kind: NodeKind,
	pub label: String,
}

impl NodeKey {
	pub fn new(kind: NodeKind, label: &str) -> Self {
		Self {
			kind,
			label: label.trim().to_string(),
		}
	}

	/// The renderer-facing id, `"{kind}:{label}"`.
	pub fn id(&self) -> String {
		format!("{}:{}", self.kind.prefix(), self.label)
	}

	/// Inverse of [`NodeKey::id`].
	pub fn parse(id: &str) -> Option<Self> {
		let (prefix, label) = id.split_once(':')?;
		Some(Self::new(NodeKind::from_prefix(prefix)?, label))
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
}

/// Undirected edge between two node ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
	pub source: String,
	pub target: String,
}

impl GraphEdge {
	pub fn connects(&self, a: &str, b: &str) -> bool {
		(self.source == a && self.target == b) || (self.source == b && self.target == a)
	}
}

/// Node and edge lists handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RosterGraph {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl RosterGraph {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
		self.nodes.iter().filter(move |n| n.kind == kind)
	}

	/// Number of artists in the graph.
	pub fn person_count(&self) -> usize {
		self.nodes_of(NodeKind::Person).count()
	}

	pub fn has_edge(&self, a: &str, b: &str) -> bool {
		self.edges.iter().any(|e| e.connects(a, b))
	}

	/// Number of edges touching `id`.
	pub fn degree(&self, id: &str) -> usize {
		self.edges
			.iter()
			.filter(|e| e.source == id || e.target == id)
			.count()
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}

/// Accumulates nodes and edges, deduplicating both.
#[derive(Default)]
struct GraphBuilder {
	graph: RosterGraph,
	index: HashMap<NodeKey, usize>,
	edges: HashSet<(usize, usize)>,
}

impl GraphBuilder {
	/// Index of the node for `(kind, label)`, creating it on first sight.
	fn node(&mut self, kind: NodeKind, label: &str) -> usize {
		let key = NodeKey::new(kind, label);
		if let Some(&idx) = self.index.get(&key) {
			return idx;
		}
		let idx = self.graph.nodes.len();
		self.graph.nodes.push(GraphNode {
			id: key.id(),
			label: key.label.clone(),
			kind,
		});
		self.index.insert(key, idx);
		idx
	}

	fn link(&mut self, a: usize, b: usize) {
		if a == b || !self.edges.insert((a.min(b), a.max(b))) {
			return;
		}
		self.graph.edges.push(GraphEdge {
			source: self.graph.nodes[a].id.clone(),
			target: self.graph.nodes[b].id.clone(),
		});
	}

	fn add_record(&mut self, record: &ArtistRecord) {
		let person = self.node(NodeKind::Person, &record.name);

		let country = (!record.country.is_empty())
			.then(|| self.node(NodeKind::Location, &record.country));
		let city = (!record.city.is_empty()).then(|| self.node(NodeKind::Location, &record.city));
		for location in [country, city].into_iter().flatten() {
			self.link(person, location);
		}
		if let (Some(country), Some(city)) = (country, city) {
			self.link(country, city);
		}

		for field in record.fields.iter() {
			let field = self.node(NodeKind::Field, field);
			self.link(person, field);
		}
		for role in record.roles.iter() {
			let role = self.node(NodeKind::Role, role);
			self.link(person, role);
		}
	}

	fn finish(self) -> RosterGraph {
		self.graph
	}
}

/// Builds the graph of every record passing `filter`.
pub fn build_graph(records: &[ArtistRecord], filter: &FilterState) -> RosterGraph {
	let mut builder = GraphBuilder::default();
	for record in filter.apply(records) {
		builder.add_record(record);
	}
	let graph = builder.finish();
	debug!(
		"graph rebuilt: {} artists, {} nodes, {} edges",
		graph.person_count(),
		graph.nodes.len(),
		graph.edges.len()
	);
	graph
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::roster::filter::Facet;
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

	fn id(kind: NodeKind, label: &str) -> String {
		NodeKey::new(kind, label).id()
	}

	#[test]
	fn node_ids_round_trip_and_reject_garbage() {
		let key = NodeKey::new(NodeKind::Location, " New York ");
		assert_eq!(key.id(), "location:New York");
		assert_eq!(NodeKey::parse(&key.id()), Some(key));
		assert_eq!(
			NodeKey::parse("person:Jean: the Elder").map(|k| k.label),
			Some("Jean: the Elder".to_string())
		);
		assert_eq!(NodeKey::parse("planet:Mars"), None);
		assert_eq!(NodeKey::parse("no separator"), None);
	}

	#[test]
	fn same_label_in_different_kinds_stays_separate() {
		let records = [record("A", "Artist", "Artist", "Artist")];
		let graph = build_graph(&records, &FilterState::new());
		assert_eq!(graph.nodes.len(), 4);
		for kind in NodeKind::ALL.into_iter().skip(1) {
			assert!(graph.has_edge(&id(NodeKind::Person, "A"), &id(kind, "Artist")));
		}
	}

	#[test]
	fn country_and_city_with_same_label_make_no_self_loop() {
		let records = [record("A", "Monaco, Monaco", "", "")];
		let graph = build_graph(&records, &FilterState::new());
		assert_eq!(graph.nodes_of(NodeKind::Location).count(), 1);
		assert_eq!(graph.edges.len(), 1);
		assert!(graph.edges.iter().all(|e| e.source != e.target));
	}

	#[test]
	fn shared_field_is_one_node_with_an_edge_per_artist() {
		let records = [
			record("A", "", "Painting", ""),
			record("B", "", "Painting, Film", ""),
			record("C", "", "Painting", ""),
		];
		let graph = build_graph(&records, &FilterState::new());
		let painting = id(NodeKind::Field, "Painting");
		assert_eq!(graph.nodes.iter().filter(|n| n.id == painting).count(), 1);
		assert_eq!(graph.degree(&painting), 3);
	}

	#[test]
	fn shared_country_city_link_is_added_once() {
		let records = [
			record("A", "France, Paris", "", ""),
			record("B", "France, Paris", "", ""),
		];
		let graph = build_graph(&records, &FilterState::new());
		let (france, paris) = (id(NodeKind::Location, "France"), id(NodeKind::Location, "Paris"));
		assert_eq!(graph.edges.iter().filter(|e| e.connects(&france, &paris)).count(), 1);
		assert_eq!(graph.edges.len(), 5);
	}

	#[test]
	fn duplicate_names_merge_into_one_person() {
		let records = [
			record("A", "France", "Painting", ""),
			record("A", "Italy", "", "Curator"),
		];
		let graph = build_graph(&records, &FilterState::new());
		assert_eq!(graph.person_count(), 1);
		assert_eq!(graph.degree(&id(NodeKind::Person, "A")), 4);
	}

	#[test]
	fn output_order_follows_record_order() {
		let records = [
			record("Zed", "Spain, Madrid", "Music", "Artist"),
			record("Amy", "Chile", "Dance", "Artist"),
		];
		let graph = build_graph(&records, &FilterState::new());
		let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
		assert_eq!(labels, ["Zed", "Spain", "Madrid", "Music", "Artist", "Amy", "Chile", "Dance"]);
		assert_eq!(graph, build_graph(&records, &FilterState::new()));
	}

	#[test]
	fn no_match_gives_empty_graph() {
		let records = [record("A", "France", "Painting", "Artist")];
		let filter = FilterState::new().with(Facet::Country, "Peru");
		let graph = build_graph(&records, &filter);
		assert!(graph.is_empty());
		assert!(graph.edges.is_empty());
		assert_eq!(graph.person_count(), 0);
	}

	#[test]
	fn serializes_to_renderer_contract() {
		let records = [record("A", "France", "", "")];
		let json = build_graph(&records, &FilterState::new()).to_json().unwrap();
		assert_eq!(
			json,
			r#"{"nodes":[{"id":"person:A","label":"A","kind":"Person"},{"id":"location:France","label":"France","kind":"Location"}],"edges":[{"source":"person:A","target":"location:France"}]}"#
		);
	}
}
