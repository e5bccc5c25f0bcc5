//! Citation graph store and its load-time passes.

mod document;
pub mod layout;
mod metadata;
pub mod normalize;
mod palette;
mod store;

pub use document::{Attributes, DocumentEdge, DocumentNode, GraphDocument, check_upload_name};
pub use metadata::{GraphMetadata, GraphStats, YearRange};
pub use store::{Edge, Extent, NodeIdx, Paper, PaperGraph};

use log::info;

use crate::error::Result;
use crate::settings::ExplorerSettings;

/// A graph ready for exploration: normalized, positioned and summarized.
#[derive(Clone, Debug)]
pub struct LoadedGraph {
	pub graph: PaperGraph,
	pub metadata: GraphMetadata,
}

impl LoadedGraph {
	/// Run every load-time pass over a parsed document.
	pub fn load(doc: &GraphDocument, settings: &ExplorerSettings) -> Result<Self> {
		let mut graph = PaperGraph::from_document(doc)?;
		layout::layout_if_unpositioned(&mut graph, settings.layout_iterations);
		let metadata = GraphMetadata::extract(&graph);
		info!(
			"graph loaded: {} nodes, {} edges, years {}-{}",
			metadata.stats.nodes, metadata.stats.edges, metadata.year_range.min, metadata.year_range.max
		);
		Ok(Self { graph, metadata })
	}
}
