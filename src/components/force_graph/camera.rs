//! Camera, graph framing and the viewport fitter.
//!
//! Node coordinates are first *framed*: centered on the graph's bounding box
//! and divided by its larger side, so the whole graph lies in `[0, 1]`. The
//! camera lives in framed space; ratio `1` shows the whole graph and smaller
//! ratios zoom in.

use std::collections::HashSet;

use log::debug;

use super::types::{Dimensions, Point};
use crate::error::{ExplorerError, Result};
use crate::graph::{Extent, NodeIdx, PaperGraph};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
	pub x: f64,
	pub y: f64,
	pub ratio: f64,
	pub angle: f64,
}

impl Default for CameraState {
	fn default() -> Self {
		Self {
			x: 0.5,
			y: 0.5,
			ratio: 1.0,
			angle: 0.0,
		}
	}
}

/// Extent width/height with zero sides replaced by one.
fn graph_dimensions(extent: &Extent) -> Dimensions {
	let or_one = |v: f64| if v == 0.0 { 1.0 } else { v };
	Dimensions::new(or_one(extent.width()), or_one(extent.height()))
}

/// Reconcile the viewport's aspect ratio with the graph's.
///
/// When one is taller than wide and the other wider than tall the graph
/// already touches opposite sides, so no correction applies.
pub fn correction_ratio(viewport: Dimensions, graph: Dimensions) -> f64 {
	let viewport_ratio = viewport.height / viewport.width;
	let graph_ratio = graph.height / graph.width;

	if (viewport_ratio < 1.0 && graph_ratio > 1.0) || (viewport_ratio > 1.0 && graph_ratio < 1.0) {
		return 1.0;
	}
	graph_ratio
		.max(1.0 / graph_ratio)
		.min((1.0 / viewport_ratio).max(viewport_ratio))
}

/// Maps data coordinates to framed space and framed space to the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
	pub extent: Extent,
	pub viewport: Dimensions,
}

impl Frame {
	pub fn new(extent: Extent, viewport: Dimensions) -> Self {
		Self { extent, viewport }
	}

	pub fn graph_dimensions(&self) -> Dimensions {
		graph_dimensions(&self.extent)
	}

	/// Data position to framed position.
	pub fn to_framed(&self, x: f64, y: f64) -> Point {
		let dims = self.graph_dimensions();
		let side = dims.width.max(dims.height);
		let (cx, cy) = self.extent.center();
		Point::new((x - cx) / side + 0.5, (y - cy) / side + 0.5)
	}

	/// Screen pixels per framed unit at `ratio`.
	fn scale(&self, ratio: f64) -> f64 {
		let smallest = self.viewport.width.min(self.viewport.height);
		smallest * correction_ratio(self.viewport, self.graph_dimensions()) / ratio
	}

	/// Framed position to viewport pixels.
	pub fn project(&self, camera: &CameraState, framed: Point) -> Point {
		let scale = self.scale(camera.ratio);
		let (dx, dy) = (framed.x - camera.x, framed.y - camera.y);
		let (sin, cos) = (-camera.angle).sin_cos();
		Point::new(
			self.viewport.width / 2.0 + (dx * cos - dy * sin) * scale,
			self.viewport.height / 2.0 + (dx * sin + dy * cos) * scale,
		)
	}

	/// Viewport pixels back to framed space.
	pub fn unproject(&self, camera: &CameraState, screen: Point) -> Point {
		let scale = self.scale(camera.ratio);
		let (sx, sy) = (
			(screen.x - self.viewport.width / 2.0) / scale,
			(screen.y - self.viewport.height / 2.0) / scale,
		);
		let (sin, cos) = camera.angle.sin_cos();
		Point::new(camera.x + sx * cos - sy * sin, camera.y + sx * sin + sy * cos)
	}
}

/// Display-data lookups the fitter needs from a renderer.
pub trait DisplaySource {
	fn viewport(&self) -> Dimensions;
	/// Bounding box of the whole graph in data coordinates.
	fn graph_extent(&self) -> Extent;
	/// Raw data coordinates of a node.
	fn data_position(&self, node: NodeIdx) -> Option<Point>;
	/// Framed coordinates of a node as currently displayed.
	fn framed_position(&self, node: NodeIdx) -> Option<Point>;
}

/// A graph as framed inside a viewport.
pub struct GraphView<'a> {
	pub graph: &'a PaperGraph,
	pub frame: Frame,
}

impl<'a> GraphView<'a> {
	pub fn new(graph: &'a PaperGraph, viewport: Dimensions) -> Self {
		Self {
			graph,
			frame: Frame::new(graph.extent(), viewport),
		}
	}
}

impl DisplaySource for GraphView<'_> {
	fn viewport(&self) -> Dimensions {
		self.frame.viewport
	}

	fn graph_extent(&self) -> Extent {
		self.frame.extent
	}

	fn data_position(&self, node: NodeIdx) -> Option<Point> {
		(node.0 < self.graph.node_count()).then(|| {
			let (x, y) = self.graph.position(node);
			Point::new(x, y)
		})
	}

	fn framed_position(&self, node: NodeIdx) -> Option<Point> {
		self.data_position(node).map(|p| self.frame.to_framed(p.x, p.y))
	}
}

/// Camera state framing every node of `nodes`, with the angle reset.
pub fn fit_to_nodes<S: DisplaySource>(source: &S, nodes: &HashSet<NodeIdx>) -> Result<CameraState> {
	if nodes.is_empty() {
		return Err(ExplorerError::EmptySelection);
	}

	let mut data = Vec::with_capacity(nodes.len());
	let mut framed = Vec::with_capacity(nodes.len());
	for &node in nodes {
		let (Some(d), Some(f)) = (source.data_position(node), source.framed_position(node)) else {
			return Err(ExplorerError::UnknownNode(node.0.to_string()));
		};
		data.push((d.x, d.y));
		framed.push((f.x, f.y));
	}
	let group = Extent::of_points(data).ok_or(ExplorerError::EmptySelection)?;
	let group_framed = Extent::of_points(framed).ok_or(ExplorerError::EmptySelection)?;

	let graph = graph_dimensions(&source.graph_extent());
	let group_width = if group.width() == 0.0 { graph.width } else { group.width() };
	let group_height = if group.height() == 0.0 { graph.height } else { group.height() };

	let viewport = source.viewport();
	let correction = correction_ratio(viewport, graph);
	let binding = if group_height / group_width < viewport.height / viewport.width {
		group_width
	} else {
		group_height
	};
	let ratio = binding / graph.width.max(graph.height) * correction;

	let (x, y) = group_framed.center();
	Ok(CameraState { x, y, ratio, angle: 0.0 })
}

fn ease_in_out_quad(t: f64) -> f64 {
	if t < 0.5 {
		2.0 * t * t
	} else {
		-1.0 + (4.0 - 2.0 * t) * t
	}
}

#[derive(Clone, Debug)]
struct Transition {
	from: CameraState,
	to: CameraState,
	elapsed_ms: f64,
	duration_ms: f64,
}

/// How a computed camera state is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitMode {
	Animate { duration_ms: f64 },
	Instant,
}

/// Camera with bounded zoom and at most one running transition.
#[derive(Clone, Debug)]
pub struct Camera {
	state: CameraState,
	transition: Option<Transition>,
	min_ratio: f64,
	max_ratio: f64,
}

impl Camera {
	/// Bounds given in the wrong order are swapped.
	pub fn new(min_ratio: f64, max_ratio: f64) -> Self {
		Self {
			state: CameraState::default(),
			transition: None,
			min_ratio: min_ratio.min(max_ratio),
			max_ratio: max_ratio.max(min_ratio),
		}
	}

	pub fn state(&self) -> CameraState {
		self.state
	}

	pub fn is_animating(&self) -> bool {
		self.transition.is_some()
	}

	/// Target of the running transition, or the current state.
	pub fn target(&self) -> CameraState {
		self.transition.as_ref().map(|t| t.to).unwrap_or(self.state)
	}

	fn bounded(&self, mut state: CameraState) -> CameraState {
		state.ratio = state.ratio.clamp(self.min_ratio, self.max_ratio);
		state
	}

	/// Jump to `state`, cancelling any transition.
	pub fn set_state(&mut self, state: CameraState) {
		self.transition = None;
		self.state = self.bounded(state);
	}

	/// Start a transition to `target`, superseding a running one.
	pub fn animate(&mut self, target: CameraState, duration_ms: f64) {
		let to = self.bounded(target);
		if duration_ms <= 0.0 {
			self.set_state(to);
			return;
		}
		self.transition = Some(Transition {
			from: self.state,
			to,
			elapsed_ms: 0.0,
			duration_ms,
		});
	}

	/// Advance the running transition; returns whether the state moved.
	pub fn tick(&mut self, dt_ms: f64) -> bool {
		let Some(t) = self.transition.as_mut() else {
			return false;
		};
		t.elapsed_ms += dt_ms;
		let progress = (t.elapsed_ms / t.duration_ms).min(1.0);
		let k = ease_in_out_quad(progress);
		let lerp = |a: f64, b: f64| a + (b - a) * k;
		self.state = CameraState {
			x: lerp(t.from.x, t.to.x),
			y: lerp(t.from.y, t.to.y),
			ratio: lerp(t.from.ratio, t.to.ratio),
			angle: lerp(t.from.angle, t.to.angle),
		};
		if progress >= 1.0 {
			self.state = t.to;
			self.transition = None;
		}
		true
	}

	pub fn apply(&mut self, target: CameraState, mode: FitMode) {
		match mode {
			FitMode::Animate { duration_ms } => self.animate(target, duration_ms),
			FitMode::Instant => self.set_state(target),
		}
	}

	pub fn animated_zoom(&mut self, factor: f64, duration_ms: f64) {
		let mut target = self.target();
		target.ratio /= factor;
		self.animate(target, duration_ms);
	}

	pub fn animated_unzoom(&mut self, factor: f64, duration_ms: f64) {
		self.animated_zoom(1.0 / factor, duration_ms);
	}

	pub fn animated_reset(&mut self, duration_ms: f64) {
		self.animate(CameraState::default(), duration_ms);
	}

	/// Zoom by `factor` keeping the framed point under `screen` fixed.
	pub fn zoom_at(&mut self, frame: &Frame, screen: Point, factor: f64) {
		let anchor = frame.unproject(&self.state, screen);
		let ratio = (self.state.ratio / factor).clamp(self.min_ratio, self.max_ratio);
		let k = ratio / self.state.ratio;
		self.set_state(CameraState {
			x: anchor.x - (anchor.x - self.state.x) * k,
			y: anchor.y - (anchor.y - self.state.y) * k,
			ratio,
			angle: self.state.angle,
		});
	}

	/// Move the camera so the view follows a screen-space drag.
	pub fn pan_by(&mut self, frame: &Frame, from: Point, to: Point) {
		let (a, b) = (frame.unproject(&self.state, from), frame.unproject(&self.state, to));
		let mut state = self.state;
		state.x -= b.x - a.x;
		state.y -= b.y - a.y;
		self.set_state(state);
	}
}

/// Frame `nodes` and hand the result to the camera.
pub fn fit_viewport_to_nodes<S: DisplaySource>(
	camera: &mut Camera,
	source: &S,
	nodes: &HashSet<NodeIdx>,
	mode: FitMode,
) -> Result<CameraState> {
	let target = fit_to_nodes(source, nodes)?;
	debug!(
		"fitting {} nodes: center ({:.3}, {:.3}) ratio {:.3}",
		nodes.len(),
		target.x,
		target.y,
		target.ratio
	);
	camera.apply(target, mode);
	Ok(target)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::GraphDocument;

	const EPS: f64 = 1e-9;

	fn square_graph() -> PaperGraph {
		let doc = GraphDocument::from_json(
			r#"{"nodes": [
				{"id": "a", "x": 0, "y": 0},
				{"id": "b", "x": 10, "y": 10},
				{"id": "c", "x": 100, "y": 100},
				{"id": "d", "x": 100, "y": 0}
			]}"#,
		)
		.unwrap();
		PaperGraph::from_document(&doc).unwrap()
	}

	fn set(ids: &[usize]) -> HashSet<NodeIdx> {
		ids.iter().copied().map(NodeIdx).collect()
	}

	#[test]
	fn correction_cases() {
		// opposite orientations
		assert_eq!(correction_ratio(Dimensions::new(800.0, 600.0), Dimensions::new(100.0, 200.0)), 1.0);
		// both wide: limited by the squarer of the two
		let c = correction_ratio(Dimensions::new(800.0, 600.0), Dimensions::new(200.0, 100.0));
		assert!((c - 4.0 / 3.0).abs() < EPS);
		assert_eq!(correction_ratio(Dimensions::new(800.0, 600.0), Dimensions::new(100.0, 100.0)), 1.0);
	}

	#[test]
	fn subset_fit_zooms_in_and_centers() {
		let g = square_graph();
		let view = GraphView::new(&g, Dimensions::new(800.0, 600.0));
		let subset = set(&[0, 1]);

		let fit = fit_to_nodes(&view, &subset).unwrap();
		let whole = fit_to_nodes(&view, &set(&[0, 1, 2, 3])).unwrap();
		assert!(fit.ratio < whole.ratio);
		assert!((fit.ratio - 0.1).abs() < EPS);
		assert!((whole.ratio - 1.0).abs() < EPS);
		assert_eq!(fit.angle, 0.0);

		let a = view.framed_position(NodeIdx(0)).unwrap();
		let b = view.framed_position(NodeIdx(1)).unwrap();
		assert!((fit.x - (a.x + b.x) / 2.0).abs() < EPS);
		assert!((fit.y - (a.y + b.y) / 2.0).abs() < EPS);
	}

	#[test]
	fn fitted_nodes_are_on_screen() {
		let g = square_graph();
		let view = GraphView::new(&g, Dimensions::new(800.0, 600.0));
		let subset = set(&[0, 1]);
		let fit = fit_to_nodes(&view, &subset).unwrap();
		for node in subset {
			let p = view.frame.project(&fit, view.framed_position(node).unwrap());
			assert!((-EPS..=800.0 + EPS).contains(&p.x), "{p:?}");
			assert!((-EPS..=600.0 + EPS).contains(&p.y), "{p:?}");
		}
	}

	#[test]
	fn single_node_falls_back_to_graph_size() {
		let g = square_graph();
		let view = GraphView::new(&g, Dimensions::new(800.0, 600.0));
		let fit = fit_to_nodes(&view, &set(&[2])).unwrap();
		assert!(fit.ratio.is_finite());
		assert!((fit.ratio - 1.0).abs() < EPS);
		let c = view.framed_position(NodeIdx(2)).unwrap();
		assert_eq!((fit.x, fit.y), (c.x, c.y));
	}

	#[test]
	fn empty_and_unknown_selections_are_rejected() {
		let g = square_graph();
		let view = GraphView::new(&g, Dimensions::new(800.0, 600.0));
		assert!(matches!(fit_to_nodes(&view, &HashSet::new()), Err(ExplorerError::EmptySelection)));
		assert!(matches!(
			fit_to_nodes(&view, &set(&[99])),
			Err(ExplorerError::UnknownNode(_))
		));
	}

	#[test]
	fn projection_round_trips() {
		let g = square_graph();
		let frame = GraphView::new(&g, Dimensions::new(640.0, 480.0)).frame;
		let cam = CameraState { x: 0.3, y: 0.6, ratio: 0.4, angle: 0.7 };
		let p = Point::new(0.25, 0.8);
		let back = frame.unproject(&cam, frame.project(&cam, p));
		assert!((back.x - p.x).abs() < EPS && (back.y - p.y).abs() < EPS);
		// the camera center sits in the middle of the viewport
		let center = frame.project(&cam, Point::new(cam.x, cam.y));
		assert!((center.x - 320.0).abs() < EPS && (center.y - 240.0).abs() < EPS);
	}

	#[test]
	fn animation_reaches_target_and_is_superseded() {
		let mut camera = Camera::new(0.08, 3.0);
		let target = CameraState { x: 0.2, y: 0.8, ratio: 0.5, angle: 0.0 };
		camera.animate(target, 500.0);
		assert!(camera.tick(250.0));
		assert!(camera.is_animating());
		let mid = camera.state();
		assert!(mid.x < 0.5 && mid.x > 0.2);

		let other = CameraState { x: 0.9, y: 0.1, ratio: 2.0, angle: 0.0 };
		camera.animate(other, 500.0);
		assert_eq!(camera.target(), other);
		assert!(camera.tick(600.0));
		assert!(!camera.is_animating());
		assert_eq!(camera.state(), other);
		assert!(!camera.tick(16.0));
	}

	#[test]
	fn instant_mode_and_ratio_bounds() {
		let mut camera = Camera::new(0.08, 3.0);
		camera.animate(CameraState::default(), 500.0);
		camera.apply(CameraState { x: 0.1, y: 0.1, ratio: 0.01, angle: 0.0 }, FitMode::Instant);
		assert!(!camera.is_animating());
		assert_eq!(camera.state().ratio, 0.08);

		camera.animated_unzoom(1.5, 0.0);
		assert!((camera.state().ratio - 0.12).abs() < EPS);
		camera.animated_reset(0.0);
		assert_eq!(camera.state(), CameraState::default());
	}

	#[test]
	fn swapped_ratio_bounds_still_clamp() {
		let mut camera = Camera::new(5.0, 3.0);
		camera.set_state(CameraState { ratio: 1.0, ..CameraState::default() });
		assert_eq!(camera.state().ratio, 3.0);
		camera.animate(CameraState { ratio: 9.0, ..CameraState::default() }, 0.0);
		assert_eq!(camera.target().ratio, 5.0);
	}

	#[test]
	fn wheel_zoom_keeps_cursor_anchor() {
		let g = square_graph();
		let frame = GraphView::new(&g, Dimensions::new(800.0, 600.0)).frame;
		let mut camera = Camera::new(0.08, 3.0);
		let cursor = Point::new(600.0, 150.0);
		let before = frame.unproject(&camera.state(), cursor);
		camera.zoom_at(&frame, cursor, 1.1);
		let after = frame.unproject(&camera.state(), cursor);
		assert!((before.x - after.x).abs() < EPS && (before.y - after.y).abs() < EPS);
		assert!(camera.state().ratio < 1.0);
	}

	#[test]
	fn fit_through_camera() {
		let g = square_graph();
		let view = GraphView::new(&g, Dimensions::new(800.0, 600.0));
		let mut camera = Camera::new(0.08, 3.0);
		let target =
			fit_viewport_to_nodes(&mut camera, &view, &set(&[0, 1]), FitMode::Animate { duration_ms: 500.0 })
				.unwrap();
		assert!(camera.is_animating());
		assert_eq!(camera.target(), target);
	}
}
