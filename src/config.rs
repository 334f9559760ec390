//! Visual configuration, built once and passed down to the page and canvas.

use serde::Deserialize;

use crate::roster::NodeKind;

/// Colors, sizes and fallbacks for the artist network view.
///
/// Deserializes from partial JSON; anything left out keeps its default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
	pub page_background: String,
	pub page_text: String,
	/// Selected tags, buttons and other highlights.
	pub accent: String,
	pub person_color: String,
	pub location_color: String,
	pub field_color: String,
	pub role_color: String,
	pub edge_color: String,
	pub edge_highlight: String,
	pub label_color: String,
	/// Radius of person nodes, in graph units.
	pub person_radius: f64,
	/// Radius of location, field and role nodes.
	pub attribute_radius: f64,
	pub default_photo: String,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			page_background: "#262123".into(),
			page_text: "#E8DED3".into(),
			accent: "#6A50FF".into(),
			person_color: "#4C4646".into(),
			location_color: "#D3DAE8".into(),
			field_color: "#EEC0E7".into(),
			role_color: "#F4C07C".into(),
			edge_color: "#4C4646".into(),
			edge_highlight: "#B3A0EB".into(),
			label_color: "#E8DED3".into(),
			person_radius: 8.0,
			attribute_radius: 6.0,
			default_photo: "https://static.tildacdn.com/tild3532-6664-4163-b538-663866613835/hosq-design-NEW.png".into(),
		}
	}
}

impl Theme {
	/// Parses a (possibly partial) JSON theme.
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	pub fn node_color(&self, kind: NodeKind) -> &str {
		match kind {
			NodeKind::Person => &self.person_color,
			NodeKind::Location => &self.location_color,
			NodeKind::Field => &self.field_color,
			NodeKind::Role => &self.role_color,
		}
	}

	pub fn node_radius(&self, kind: NodeKind) -> f64 {
		match kind {
			NodeKind::Person => self.person_radius,
			_ => self.attribute_radius,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let theme = Theme::from_json(r##"{"accent": "#FF0000", "person_radius": 12.0}"##).unwrap();
		assert_eq!(theme.accent, "#FF0000");
		assert_eq!(theme.node_radius(NodeKind::Person), 12.0);
		assert_eq!(theme.node_color(NodeKind::Role), "#F4C07C");
	}

	#[test]
	fn rejects_malformed_json() {
		assert!(Theme::from_json("{\"accent\": 3}").is_err());
	}

	#[test]
	fn person_nodes_are_larger() {
		let theme = Theme::default();
		assert!(theme.node_radius(NodeKind::Person) > theme.node_radius(NodeKind::Field));
		assert_eq!(theme.node_color(NodeKind::Location), "#D3DAE8");
	}
}
