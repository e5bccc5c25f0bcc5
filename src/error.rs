//! Crate-wide error type.

use thiserror::Error;

/// Errors raised by the explorer core and its browser plumbing.
#[derive(Debug, Error)]
pub enum ExplorerError {
	/// A camera fit was requested over zero nodes.
	#[error("cannot fit the viewport to an empty node selection")]
	EmptySelection,

	/// A node identifier that is not present in the graph store.
	#[error("node {0:?} not found in graph")]
	UnknownNode(String),

	/// The graph document, settings or cached payload is not valid JSON.
	#[error("parse error: {0}")]
	Parse(#[from] serde_json::Error),

	/// Settings that parse but cannot drive the renderer.
	#[error("invalid settings: {0}")]
	InvalidSettings(String),

	/// Browser storage is unavailable or rejected a write.
	#[error("storage error: {0}")]
	Storage(String),

	/// An uploaded file whose format the explorer does not read.
	#[error("unsupported file {0:?}, expected a .json graph document")]
	UnsupportedFile(String),

	/// A graph document without a single node.
	#[error("graph document contains no nodes")]
	EmptyGraph,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_selection_display() {
		let e = ExplorerError::EmptySelection;
		assert!(e.to_string().contains("empty node selection"));
	}

	#[test]
	fn unknown_node_names_the_id() {
		let e = ExplorerError::UnknownNode("n42".into());
		assert!(e.to_string().contains("n42"));
	}

	#[test]
	fn invalid_settings_names_the_problem() {
		let e = ExplorerError::InvalidSettings("min_camera_ratio 5 exceeds max_camera_ratio 3".into());
		assert_eq!(e.to_string(), "invalid settings: min_camera_ratio 5 exceeds max_camera_ratio 3");
	}

	#[test]
	fn json_error_converts() {
		let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
		let e: ExplorerError = err.into();
		assert!(e.to_string().starts_with("parse error"));
		let _: &dyn std::error::Error = &e;
	}
}
