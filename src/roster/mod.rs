//! The roster core: normalizing rows, filtering, and deriving the graph.

mod detail;
mod error;
mod facets;
mod filter;
mod graph;
mod record;
mod source;

pub use detail::ArtistDetail;
pub use error::{Result, RosterError};
pub use facets::FacetIndex;
pub use filter::{Facet, FilterState};
pub use graph::{GraphEdge, GraphNode, NodeKey, NodeKind, RosterGraph, build_graph};
pub use record::{ArtistRecord, RawRow, TagSet, normalize_row, split_location};
pub use source::{CsvSource, RecordSource, Roster};
