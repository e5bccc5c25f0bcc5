use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::reducers::{edge_reducer, node_reducer};
use super::state::GraphCanvasState;
use super::types::{NodeDisplay, Point};
use crate::graph::NodeIdx;

const BACKGROUND: &str = "#ffffff";
const LABEL_COLOR: &str = "#000";

pub fn render(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let frame = state.frame();
	let positions: Vec<Point> = state
		.loaded
		.graph
		.node_indices()
		.map(|idx| state.screen_position(&frame, idx))
		.collect();

	draw_edges(state, ctx, &positions);
	draw_nodes(state, ctx, &positions);
	draw_hovered(state, ctx, &positions);
}

fn draw_edges(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d, positions: &[Point]) {
	let graph = &state.loaded.graph;
	let mut edges: Vec<_> = graph
		.edges()
		.iter()
		.map(|edge| (edge, edge_reducer(edge, graph, &state.search, &state.settings)))
		.filter(|(_, display)| !display.hidden)
		.collect();
	edges.sort_by_key(|(_, display)| display.z_index);

	for (edge, display) in edges {
		let (a, b) = (positions[edge.source.0], positions[edge.target.0]);
		ctx.set_stroke_style_str(&display.color);
		ctx.set_line_width(display.size);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d, positions: &[Point]) {
	let mut nodes: Vec<(NodeIdx, NodeDisplay)> = state
		.loaded
		.graph
		.nodes()
		.map(|(idx, paper)| (idx, node_reducer(idx, paper, &state.search, &state.settings)))
		.collect();
	nodes.sort_by_key(|(_, display)| display.z_index);

	for (idx, display) in &nodes {
		let p = positions[idx.0];
		ctx.set_global_alpha(display.opacity);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, display.size, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&display.color);
		ctx.fill();

		if display.highlighted {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, display.size + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(LABEL_COLOR);
			ctx.set_line_width(1.5);
			ctx.stroke();
		}
		ctx.set_global_alpha(1.0);
	}

	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font(&format!("{}px sans-serif", state.settings.label_size));
	for (idx, display) in &nodes {
		let Some(label) = &display.label else {
			continue;
		};
		let visible = display.force_label
			|| display.highlighted
			|| (state.settings.render_labels
				&& display.size >= state.settings.label_rendered_size_threshold);
		if visible {
			let p = positions[idx.0];
			let _ = ctx.fill_text(label, p.x + display.size + 3.0, p.y + state.settings.label_size / 3.0);
		}
	}
}

/// The hovered node, drawn over everything with its label underneath.
fn draw_hovered(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d, positions: &[Point]) {
	let Some(idx) = state.search.hovered_node else {
		return;
	};
	let paper = state.loaded.graph.node(idx);
	let display = node_reducer(idx, paper, &state.search, &state.settings);
	let p = positions[idx.0];

	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, display.size, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&state.settings.hover_color);
	ctx.fill();

	ctx.set_font(&format!("bold {}px Arial", state.settings.label_size));
	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_text_align("center");
	let _ = ctx.fill_text(&paper.label, p.x, p.y + display.size + state.settings.label_size);
	ctx.set_text_align("start");
}
