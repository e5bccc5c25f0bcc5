//! Renderer and explorer settings.
//!
//! Every field has a default, so a settings document only needs the keys it
//! overrides.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};

/// Id of the optional `<script type="application/json">` holding overrides.
pub const SETTINGS_ELEMENT_ID: &str = "explorer-settings";

/// Tunables for the canvas renderer, the camera and the load-time layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerSettings {
	/// Smallest camera ratio (closest zoom).
	pub min_camera_ratio: f64,
	/// Largest camera ratio (furthest zoom).
	pub max_camera_ratio: f64,
	/// Draw labels of every node large enough, not only forced ones.
	pub render_labels: bool,
	/// Minimum on-screen node size for a label when `render_labels` is set.
	pub label_rendered_size_threshold: f64,
	/// Label font size in pixels.
	pub label_size: f64,
	/// Node color when the document carries none.
	pub default_node_color: String,
	/// Edge color.
	pub default_edge_color: String,
	/// Color of nodes faded out by hover or search.
	pub dimmed_node_color: String,
	/// Opacity of faded nodes.
	pub dimmed_opacity: f64,
	/// Fill color of the hovered node.
	pub hover_color: String,
	/// Multiplier applied to every node size before drawing.
	pub node_size_scale: f64,
	/// Camera transition to a single selected node.
	pub select_duration_ms: f64,
	/// Camera transition when framing a suggestion set.
	pub fit_duration_ms: f64,
	/// Camera transition for keyboard zoom and reset.
	pub keyboard_zoom_duration_ms: f64,
	/// Simulation steps for graphs loaded without positions.
	pub layout_iterations: usize,
}

impl Default for ExplorerSettings {
	fn default() -> Self {
		Self {
			min_camera_ratio: 0.08,
			max_camera_ratio: 3.0,
			render_labels: false,
			label_rendered_size_threshold: 7.0,
			label_size: 12.0,
			default_node_color: "#6c9".into(),
			default_edge_color: "#e0e0e0".into(),
			dimmed_node_color: "#f6f6f6".into(),
			dimmed_opacity: 0.3,
			hover_color: "#FFA500".into(),
			node_size_scale: 1.0 / 3.0,
			select_duration_ms: 500.0,
			fit_duration_ms: 500.0,
			keyboard_zoom_duration_ms: 600.0,
			layout_iterations: 100,
		}
	}
}

impl ExplorerSettings {
	/// Parse a (possibly partial) JSON settings document.
	pub fn from_json(src: &str) -> Result<Self> {
		let settings: Self = serde_json::from_str(src)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reject values the camera and renderer cannot work with.
	pub fn validate(&self) -> Result<()> {
		let (min, max) = (self.min_camera_ratio, self.max_camera_ratio);
		if !(min.is_finite() && min > 0.0) {
			return Err(ExplorerError::InvalidSettings(format!(
				"min_camera_ratio must be a positive number, got {min}"
			)));
		}
		if !(max.is_finite() && max > 0.0) {
			return Err(ExplorerError::InvalidSettings(format!(
				"max_camera_ratio must be a positive number, got {max}"
			)));
		}
		if min > max {
			return Err(ExplorerError::InvalidSettings(format!(
				"min_camera_ratio {min} exceeds max_camera_ratio {max}"
			)));
		}
		if !(self.node_size_scale.is_finite() && self.node_size_scale >= 0.0) {
			return Err(ExplorerError::InvalidSettings(format!(
				"node_size_scale must be a non-negative number, got {}",
				self.node_size_scale
			)));
		}
		Ok(())
	}

	/// Settings embedded in the page as a JSON script element, or the
	/// defaults when there is none.
	pub fn from_page() -> Self {
		let text = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(SETTINGS_ELEMENT_ID))
			.and_then(|el| el.text_content());
		let Some(text) = text else {
			return Self::default();
		};
		match Self::from_json(&text) {
			Ok(settings) => {
				info!("using page settings");
				settings
			}
			Err(e) => {
				warn!("ignoring invalid page settings: {e}");
				Self::default()
			}
		}
	}
}
