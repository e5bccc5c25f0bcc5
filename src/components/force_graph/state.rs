use std::sync::Arc;

use log::{debug, warn};

use super::camera::{Camera, FitMode, Frame, GraphView, fit_viewport_to_nodes};
use super::types::{Dimensions, PaperDetails, Point};
use crate::graph::{LoadedGraph, NodeIdx};
use crate::search::{CameraRequest, SearchEdit, SearchIndex, SearchState};
use crate::settings::ExplorerSettings;

/// Extra pixels around a node disc that still count as a hit.
pub const HIT_SLACK: f64 = 4.0;
/// Pointer travel below which a press/release pair is a click.
pub const CLICK_TOLERANCE: f64 = 3.0;
const ZOOM_FACTOR: f64 = 1.5;

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start: Point,
	pub last: Point,
}

pub struct GraphCanvasState {
	pub loaded: Arc<LoadedGraph>,
	pub index: SearchIndex,
	pub search: SearchState,
	pub camera: Camera,
	pub pan: PanState,
	pub settings: ExplorerSettings,
	pub width: f64,
	pub height: f64,
}

impl GraphCanvasState {
	pub fn new(loaded: Arc<LoadedGraph>, settings: ExplorerSettings, width: f64, height: f64) -> Self {
		let index = SearchIndex::build(&loaded.graph);
		let search = SearchState::new(loaded.metadata.year_range);
		Self {
			camera: Camera::new(settings.min_camera_ratio, settings.max_camera_ratio),
			loaded,
			index,
			search,
			pan: PanState::default(),
			settings,
			width,
			height,
		}
	}

	pub fn frame(&self) -> Frame {
		Frame::new(self.loaded.graph.extent(), Dimensions::new(self.width, self.height))
	}

	/// Node position in canvas pixels under the current camera.
	pub fn screen_position(&self, frame: &Frame, node: NodeIdx) -> Point {
		let (x, y) = self.loaded.graph.position(node);
		frame.project(&self.camera.state(), frame.to_framed(x, y))
	}

	/// Topmost node whose disc covers the canvas point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeIdx> {
		let frame = self.frame();
		let mut found = None;
		for (idx, paper) in self.loaded.graph.nodes() {
			let p = self.screen_position(&frame, idx);
			let (dx, dy) = (p.x - sx, p.y - sy);
			let radius = paper.size * self.settings.node_size_scale + HIT_SLACK;
			if (dx * dx + dy * dy).sqrt() < radius {
				found = Some(idx);
			}
		}
		found
	}

	pub fn set_hover(&mut self, node: Option<NodeIdx>) -> bool {
		self.search.set_hovered(node, &self.loaded.graph)
	}

	/// Run a search edit and carry out the camera move it asks for.
	pub fn apply_search(&mut self, edit: SearchEdit) {
		let request = self.search.apply_edit(edit, &self.index, &self.loaded.graph);
		match request {
			CameraRequest::Stay => {}
			CameraRequest::CenterOn(node) => {
				let frame = self.frame();
				let (x, y) = self.loaded.graph.position(node);
				let center = frame.to_framed(x, y);
				let mut target = self.camera.target();
				target.x = center.x;
				target.y = center.y;
				self.camera.animate(target, self.settings.select_duration_ms);
			}
			CameraRequest::Fit(nodes) => {
				let mode = FitMode::Animate {
					duration_ms: self.settings.fit_duration_ms,
				};
				let view = GraphView::new(&self.loaded.graph, Dimensions::new(self.width, self.height));
				if let Err(e) = fit_viewport_to_nodes(&mut self.camera, &view, &nodes, mode) {
					warn!("viewport fit failed: {e}");
				}
			}
		}
	}

	/// Detail card for a clicked canvas point, `None` on background.
	pub fn click(&self, sx: f64, sy: f64) -> Option<PaperDetails> {
		let node = self.node_at_position(sx, sy)?;
		debug!("clicked node {}", self.loaded.graph.node(node).id);
		Some(PaperDetails::of(&self.loaded.graph, node))
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 1.0 / 1.1 } else { 1.1 };
		let frame = self.frame();
		self.camera.zoom_at(&frame, Point::new(sx, sy), factor);
	}

	pub fn start_pan(&mut self, sx: f64, sy: f64) {
		let p = Point::new(sx, sy);
		self.pan = PanState {
			active: true,
			moved: false,
			start: p,
			last: p,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if !self.pan.active {
			return;
		}
		let p = Point::new(sx, sy);
		let (dx, dy) = (p.x - self.pan.start.x, p.y - self.pan.start.y);
		if (dx * dx + dy * dy).sqrt() > CLICK_TOLERANCE {
			self.pan.moved = true;
		}
		let frame = self.frame();
		self.camera.pan_by(&frame, self.pan.last, p);
		self.pan.last = p;
	}

	/// Finish a press; returns whether it was a click rather than a drag.
	pub fn end_pan(&mut self) -> bool {
		let was_click = self.pan.active && !self.pan.moved;
		self.pan = PanState::default();
		was_click
	}

	/// Keyboard camera controls; returns whether the key was handled.
	pub fn key(&mut self, key: &str) -> bool {
		let duration = self.settings.keyboard_zoom_duration_ms;
		match key {
			"+" | "=" => self.camera.animated_zoom(ZOOM_FACTOR, duration),
			"-" => self.camera.animated_unzoom(ZOOM_FACTOR, duration),
			"0" => self.camera.animated_reset(duration),
			_ => return false,
		}
		true
	}

	pub fn tick(&mut self, dt_ms: f64) {
		self.camera.tick(dt_ms);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::GraphDocument;
	use crate::search::SearchField;

	fn canvas() -> GraphCanvasState {
		let doc = GraphDocument::from_json(
			r#"{"nodes": [
				{"id": "a", "label": "Motor learning", "x": 0, "y": 0, "size": 6},
				{"id": "b", "label": "Motor memory", "x": 10, "y": 10, "size": 6},
				{"id": "c", "label": "Vision", "x": 100, "y": 100, "size": 6}
			],
			"edges": [{"source": "a", "target": "b"}]}"#,
		)
		.unwrap();
		let settings = ExplorerSettings::default();
		let loaded = LoadedGraph::load(&doc, &settings).unwrap();
		GraphCanvasState::new(Arc::new(loaded), settings, 800.0, 600.0)
	}

	#[test]
	fn hit_testing_finds_projected_nodes() {
		let s = canvas();
		let frame = s.frame();
		let p = s.screen_position(&frame, NodeIdx(2));
		assert_eq!(s.node_at_position(p.x + 1.0, p.y), Some(NodeIdx(2)));
		assert_eq!(s.node_at_position(p.x + 50.0, p.y), None);
		assert_eq!(s.click(p.x, p.y).map(|d| d.title), Some("Vision".to_string()));
	}

	#[test]
	fn search_moves_the_camera() {
		let mut s = canvas();
		s.apply_search(SearchEdit::Query(SearchField::Label, "motor".into()));
		assert!(s.camera.is_animating());
		assert!(s.camera.target().ratio < 1.0);

		s.apply_search(SearchEdit::Query(SearchField::Label, "Vision".into()));
		assert_eq!(s.search.selected_node, Some(NodeIdx(2)));
		let target = s.camera.target();
		let c = s.frame().to_framed(100.0, 100.0);
		assert_eq!((target.x, target.y), (c.x, c.y));
	}

	#[test]
	fn empty_result_leaves_camera_alone() {
		let mut s = canvas();
		s.apply_search(SearchEdit::Query(SearchField::Label, "nothing".into()));
		assert!(!s.camera.is_animating());
		assert_eq!(s.search.suggestions.as_ref().map(|n| n.len()), Some(0));
	}

	#[test]
	fn drag_versus_click() {
		let mut s = canvas();
		s.start_pan(100.0, 100.0);
		s.pan_to(101.0, 100.0);
		assert!(s.end_pan());

		let before = s.camera.state();
		s.start_pan(100.0, 100.0);
		s.pan_to(160.0, 100.0);
		assert!(!s.end_pan());
		assert!(s.camera.state().x < before.x);
	}

	#[test]
	fn keyboard_zoom() {
		let mut s = canvas();
		assert!(s.key("+"));
		assert!(s.camera.target().ratio < 1.0);
		assert!(s.key("0"));
		assert_eq!(s.camera.target().ratio, 1.0);
		assert!(!s.key("x"));
	}
}
