use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use crate::config::Theme;
use crate::roster::{NodeKind, RosterGraph};

/// Extra screen-independent slack around a node for picking.
pub const HIT_PADDING: f64 = 4.0;
/// Pointer travel (screen px) below which a press+release counts as a click.
pub const CLICK_TOLERANCE: f64 = 3.0;
/// Largest per-frame node shift (graph units) that still counts as still.
const SETTLE_SHIFT: f32 = 0.05;
/// Still frames in a row before the simulation stops stepping.
const SETTLE_FRAMES: u32 = 30;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	pub radius: f64,
	/// Hover card lines; empty for nodes that only show their label.
	pub card: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub theme: Theme,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	/// Cleared once the layout settles; dragging or reloading sets it again.
	pub animation_running: bool,
	calm_frames: u32,
	cards: HashMap<String, Vec<String>>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 250.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(
		data: &RosterGraph,
		theme: Theme,
		cards: HashMap<String, Vec<String>>,
		width: f64,
		height: f64,
	) -> Self {
		let mut state = Self {
			graph: simulation(),
			theme,
			cards,
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			calm_frames: 0,
		};
		state.load(data);
		state
	}

	/// Replaces the simulated graph, keeping the current pan and zoom.
	pub fn load(&mut self, data: &RosterGraph) {
		let mut graph = simulation();
		let mut id_to_idx = HashMap::with_capacity(data.nodes.len());
		let mut edges = Vec::with_capacity(data.edges.len());

		// Artists start on an inner ring, their attributes on an outer one.
		let count = data.nodes.len().max(1) as f64;
		let spread = 60.0 + 6.0 * count.sqrt();
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let ring = match node.kind {
				NodeKind::Person => spread,
				_ => spread * 1.8,
			};
			let idx = graph.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: self.theme.node_color(node.kind).to_string(),
					radius: self.theme.node_radius(node.kind),
					card: self.cards.get(&node.id).cloned().unwrap_or_default(),
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(edge.source.as_str()), id_to_idx.get(edge.target.as_str()))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}
		debug!(
			"canvas loaded {} nodes, {} edges",
			data.nodes.len(),
			edges.len()
		);

		self.graph = graph;
		self.edges = edges;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
		self.wake();
	}

	/// Restarts the simulation after something moved the layout.
	pub fn wake(&mut self) {
		self.animation_running = true;
		self.calm_frames = 0;
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + HIT_PADDING {
				found = Some(node.index());
			}
		});
		found
	}

	/// Renderer id of the node at `idx`.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Graph position and card lines of the hovered node, when it has a card.
	pub fn hover_card(&self) -> Option<(f64, f64, Vec<String>)> {
		let idx = self.hover.node?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let card = &node.data.user_data.card;
			if node.index() == idx && !card.is_empty() {
				found = Some((node.x() as f64, node.y() as f64, card.clone()));
			}
		});
		found
	}

	fn positions(&self) -> Vec<(f32, f32)> {
		let mut out = Vec::new();
		self.graph.visit_nodes(|node| out.push((node.x(), node.y())));
		out
	}

	fn step(&mut self, dt: f32) {
		let before = self.positions();
		self.graph.update(dt);
		let shift = before
			.iter()
			.zip(self.positions())
			.map(|(a, b)| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
			.fold(0.0, f32::max);

		if shift < SETTLE_SHIFT {
			self.calm_frames += 1;
		} else {
			self.calm_frames = 0;
		}
		if self.calm_frames >= SETTLE_FRAMES {
			debug!("simulation settled");
			self.animation_running = false;
		}
	}

	/// Advances the layout while it is still moving, and the hover easing
	/// always.
	pub fn tick(&mut self, dt: f32) {
		if self.animation_running {
			self.step(dt);
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	/// Keeps the graph centred in the new viewport.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::roster::{CsvSource, FilterState, Roster, build_graph};

	fn state() -> ForceGraphState {
		let roster = Roster::load(&CsvSource::new(
			"name,country and city,professional field,role\nA,\"France, Paris\",Painting,Artist\nB,France,Painting,Curator\n",
		))
		.unwrap();
		let graph = build_graph(roster.records(), &FilterState::new());
		ForceGraphState::new(&graph, Theme::default(), roster.hover_cards(), 800.0, 600.0)
	}

	fn index_of(state: &ForceGraphState, id: &str) -> DefaultNodeIdx {
		let mut found = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some(node.index());
			}
		});
		found.unwrap()
	}

	#[test]
	fn hover_highlights_neighbours() {
		let mut s = state();
		let a = index_of(&s, "person:A");
		s.set_hover(Some(a));
		assert!(s.is_hovered(a));
		assert_eq!(s.hover.neighbors.len(), 4);
		assert!(s.is_highlighted(index_of(&s, "location:Paris")));
		assert!(!s.is_highlighted(index_of(&s, "person:B")));

		s.set_hover(None);
		assert!(s.has_active_highlight());
		assert!(s.is_highlighted(index_of(&s, "role:Artist")));
	}

	#[test]
	fn picks_node_under_pointer() {
		let s = state();
		let a = index_of(&s, "person:A");
		let mut at = (0.0, 0.0);
		s.graph.visit_nodes(|node| {
			if node.index() == a {
				at = (node.x() as f64, node.y() as f64);
			}
		});
		let (sx, sy) = (at.0 + s.transform.x, at.1 + s.transform.y);
		assert_eq!(s.node_at_position(sx, sy).and_then(|i| s.node_id(i)).as_deref(), Some("person:A"));
	}

	#[test]
	fn reload_swaps_graph_and_resets_hover() {
		let mut s = state();
		let a = index_of(&s, "person:A");
		s.set_hover(Some(a));
		s.transform.k = 2.0;
		s.load(&RosterGraph::default());
		assert!(!s.has_active_highlight());
		assert_eq!(s.transform.k, 2.0);
		let mut count = 0;
		s.graph.visit_nodes(|_| count += 1);
		assert_eq!(count, 0);
	}

	#[test]
	fn hovering_a_person_shows_its_card() {
		let mut s = state();
		s.set_hover(Some(index_of(&s, "person:A")));
		let (_, _, lines) = s.hover_card().unwrap();
		assert_eq!(lines, ["A"]);

		s.set_hover(Some(index_of(&s, "location:Paris")));
		assert!(s.hover_card().is_none());
		s.set_hover(None);
		assert!(s.hover_card().is_none());
	}

	#[test]
	fn empty_layout_settles_and_wakes_on_reload() {
		let mut s = state();
		s.load(&RosterGraph::default());
		for _ in 0..SETTLE_FRAMES {
			assert!(s.animation_running);
			s.tick(0.016);
		}
		assert!(!s.animation_running);

		s.load(&RosterGraph::default());
		assert!(s.animation_running);
	}

	#[test]
	fn settled_layout_stays_put_but_hover_still_eases() {
		let mut s = state();
		s.animation_running = false;
		let before = s.positions();
		s.set_hover(Some(index_of(&s, "person:B")));
		for _ in 0..20 {
			s.tick(0.016);
		}
		assert_eq!(s.positions(), before);
		assert!(s.hover.highlight_t > 0.0);
	}

	#[test]
	fn resize_keeps_graph_centred() {
		let mut s = state();
		s.transform.x = 350.0;
		s.resize(1000.0, 500.0);
		assert_eq!((s.width, s.height), (1000.0, 500.0));
		assert_eq!(s.transform.x, 450.0);
		assert_eq!(s.transform.y, 250.0);
	}
}
