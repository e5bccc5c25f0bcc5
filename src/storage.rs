//! Browser `localStorage` cache of the last loaded graph.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use web_sys::Storage;

use crate::error::{ExplorerError, Result};
use crate::graph::{GraphDocument, GraphMetadata, LoadedGraph, PaperGraph, layout};
use crate::settings::ExplorerSettings;

const GRAPH_KEY: &str = "graphData";
const METADATA_KEY: &str = "metadata";

/// What the cache holds between visits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedGraph {
	pub document: GraphDocument,
	pub metadata: GraphMetadata,
}

impl CachedGraph {
	/// Serialize into the two stored values.
	pub fn encode(&self) -> Result<(String, String)> {
		Ok((
			serde_json::to_string(&self.document)?,
			serde_json::to_string(&self.metadata)?,
		))
	}

	pub fn decode(graph: &str, metadata: &str) -> Result<Self> {
		Ok(Self {
			document: serde_json::from_str(graph)?,
			metadata: serde_json::from_str(metadata)?,
		})
	}

	/// Rebuild the store, reusing the cached metadata.
	pub fn restore(self, settings: &ExplorerSettings) -> Result<LoadedGraph> {
		let mut graph = PaperGraph::from_document(&self.document)?;
		layout::layout_if_unpositioned(&mut graph, settings.layout_iterations);
		Ok(LoadedGraph {
			graph,
			metadata: self.metadata,
		})
	}

	pub fn of(loaded: &LoadedGraph) -> Self {
		Self {
			document: loaded.graph.to_document(),
			metadata: loaded.metadata.clone(),
		}
	}
}

fn local_storage() -> Result<Storage> {
	web_sys::window()
		.ok_or_else(|| ExplorerError::Storage("no window".into()))?
		.local_storage()
		.map_err(|e| ExplorerError::Storage(format!("{e:?}")))?
		.ok_or_else(|| ExplorerError::Storage("localStorage unavailable".into()))
}

/// Persist the document and its metadata.
pub fn save(cached: &CachedGraph) -> Result<()> {
	let storage = local_storage()?;
	let (graph, metadata) = cached.encode()?;
	storage
		.set_item(GRAPH_KEY, &graph)
		.and_then(|_| storage.set_item(METADATA_KEY, &metadata))
		.map_err(|e| ExplorerError::Storage(format!("{e:?}")))?;
	info!("cached graph ({} bytes)", graph.len());
	Ok(())
}

/// Restore the cached graph; a corrupt cache is dropped.
pub fn load() -> Option<CachedGraph> {
	let storage = local_storage().ok()?;
	let graph = storage.get_item(GRAPH_KEY).ok()??;
	let metadata = storage.get_item(METADATA_KEY).ok()??;

	match CachedGraph::decode(&graph, &metadata) {
		Ok(cached) => Some(cached),
		Err(e) => {
			warn!("discarding cached graph: {e}");
			clear();
			None
		}
	}
}

pub fn clear() {
	if let Ok(storage) = local_storage() {
		let _ = storage.remove_item(GRAPH_KEY);
		let _ = storage.remove_item(METADATA_KEY);
	}
}
