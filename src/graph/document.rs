use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ExplorerError, Result};

/// Free-form attribute map carried by nodes and edges.
pub type Attributes = Map<String, Value>;

/// A node as it appears in the exchange document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
	pub id: String,
	#[serde(flatten)]
	pub attributes: Attributes,
}

/// An edge as it appears in the exchange document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentEdge {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub source: String,
	pub target: String,
	#[serde(flatten)]
	pub attributes: Attributes,
}

/// Node/edge list exchanged with uploads and the local cache.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
	pub nodes: Vec<DocumentNode>,
	#[serde(default, alias = "links")]
	pub edges: Vec<DocumentEdge>,
}

impl GraphDocument {
	/// Parse a JSON document, rejecting documents without nodes.
	pub fn from_json(src: &str) -> Result<Self> {
		let doc: Self = serde_json::from_str(src)?;
		if doc.nodes.is_empty() {
			return Err(ExplorerError::EmptyGraph);
		}
		Ok(doc)
	}
}

/// Check an upload's file name before reading it.
pub fn check_upload_name(name: &str) -> Result<()> {
	if name.to_lowercase().ends_with(".json") {
		Ok(())
	} else {
		Err(ExplorerError::UnsupportedFile(name.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_flat_attributes() {
		let doc = GraphDocument::from_json(
			r#"{
				"nodes": [
					{"id": "a", "label": "Paper A", "x": 1.0, "y": 2.0},
					{"id": "b", "label": "Paper B"}
				],
				"edges": [{"source": "a", "target": "b", "weight": 2}]
			}"#,
		)
		.unwrap();
		assert_eq!(doc.nodes.len(), 2);
		assert_eq!(doc.nodes[0].attributes["label"], "Paper A");
		assert_eq!(doc.edges[0].id, None);
		assert_eq!(doc.edges[0].attributes["weight"], 2);
	}

	#[test]
	fn links_alias_is_accepted() {
		let doc = GraphDocument::from_json(
			r#"{"nodes": [{"id": "a"}, {"id": "b"}], "links": [{"source": "a", "target": "b"}]}"#,
		)
		.unwrap();
		assert_eq!(doc.edges.len(), 1);
	}

	#[test]
	fn empty_document_is_rejected() {
		let err = GraphDocument::from_json(r#"{"nodes": [], "edges": []}"#).unwrap_err();
		assert!(matches!(err, ExplorerError::EmptyGraph));
	}

	#[test]
	fn upload_names() {
		assert!(check_upload_name("MotorLearning.JSON").is_ok());
		assert!(matches!(
			check_upload_name("graph.gexf"),
			Err(ExplorerError::UnsupportedFile(_))
		));
	}
}
