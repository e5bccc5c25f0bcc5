//! Force-directed placement for documents that arrive without coordinates.

use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::info;

use super::store::{NodeIdx, PaperGraph};

const LAYOUT_RADIUS: f64 = 100.0;
const LAYOUT_STEP: f32 = 0.016;

#[derive(Clone, Debug, Default)]
struct LayoutNode {
	idx: usize,
}

/// Lay the graph out with the force simulation when no node is positioned.
///
/// Returns whether a layout was computed.
pub fn layout_if_unpositioned(graph: &mut PaperGraph, iterations: usize) -> bool {
	if graph.has_positions() {
		return false;
	}

	let mut sim: ForceGraph<LayoutNode, ()> = ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});
	let count = graph.node_count();
	let mut handles = Vec::with_capacity(count);

	for idx in graph.node_indices() {
		let angle = (idx.0 as f64) * 2.0 * PI / count as f64;
		let handle = sim.add_node(NodeData {
			x: (LAYOUT_RADIUS * angle.cos()) as f32,
			y: (LAYOUT_RADIUS * angle.sin()) as f32,
			mass: 10.0,
			is_anchor: false,
			user_data: LayoutNode { idx: idx.0 },
		});
		handles.push(handle);
	}
	for edge in graph.edges() {
		sim.add_edge(handles[edge.source.0], handles[edge.target.0], EdgeData::default());
	}

	for _ in 0..iterations {
		sim.update(LAYOUT_STEP);
	}

	let mut placed = Vec::with_capacity(count);
	sim.visit_nodes(|node| {
		placed.push((node.data.user_data.idx, node.x() as f64, node.y() as f64));
	});
	for (idx, x, y) in placed {
		graph.set_position(NodeIdx(idx), x, y);
	}

	info!("force layout placed {count} nodes in {iterations} steps");
	true
}
