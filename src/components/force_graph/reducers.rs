//! Per-paint visual overrides driven by hover, selection and suggestions.

use super::types::{EdgeDisplay, NodeDisplay};
use crate::graph::{Edge, NodeIdx, Paper, PaperGraph};
use crate::search::SearchState;
use crate::settings::ExplorerSettings;

const EDGE_SIZE: f64 = 0.5;

fn dim(display: &mut NodeDisplay, settings: &ExplorerSettings) {
	display.label = None;
	display.color = settings.dimmed_node_color.clone();
	display.opacity = settings.dimmed_opacity;
}

pub fn node_reducer(
	node: NodeIdx,
	paper: &Paper,
	state: &SearchState,
	settings: &ExplorerSettings,
) -> NodeDisplay {
	let mut res = NodeDisplay {
		color: paper.color.clone().unwrap_or_else(|| settings.default_node_color.clone()),
		label: Some(paper.label.clone()),
		size: paper.size * settings.node_size_scale,
		opacity: 1.0,
		highlighted: false,
		force_label: false,
		z_index: 0,
	};

	let outside_hover = state.hovered_neighbors.as_ref().is_some_and(|neighbors| {
		state.hovered_node != Some(node) && !neighbors.contains(&node)
	});

	if outside_hover {
		dim(&mut res, settings);
	} else if state.selected_node == Some(node) {
		res.highlighted = true;
		res.z_index = 2;
	} else if let Some(suggestions) = &state.suggestions {
		if suggestions.contains(&node) {
			res.force_label = true;
			res.z_index = 1;
		} else {
			dim(&mut res, settings);
		}
	}
	res
}

pub fn edge_reducer(
	edge: &Edge,
	graph: &PaperGraph,
	state: &SearchState,
	settings: &ExplorerSettings,
) -> EdgeDisplay {
	let mut res = EdgeDisplay {
		color: settings.default_edge_color.clone(),
		size: EDGE_SIZE,
		hidden: false,
		z_index: 0,
	};

	if let Some(hovered) = state.hovered_node {
		let touches = |n: NodeIdx| n == hovered || graph.are_neighbors(n, hovered);
		if !(touches(edge.source) && touches(edge.target)) {
			res.hidden = true;
		}
	}

	if let Some(suggestions) = &state.suggestions {
		if suggestions.contains(&edge.source) && suggestions.contains(&edge.target) {
			res.z_index = 1;
		} else {
			res.hidden = true;
		}
	}
	res
}
