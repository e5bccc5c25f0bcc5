use crate::graph::{NodeIdx, PaperGraph};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Width and height of a viewport or a bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
	pub width: f64,
	pub height: f64,
}

impl Dimensions {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// Per-paint node appearance produced by the node reducer.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDisplay {
	pub color: String,
	pub label: Option<String>,
	pub size: f64,
	pub opacity: f64,
	pub highlighted: bool,
	pub force_label: bool,
	pub z_index: i32,
}

/// Per-paint edge appearance produced by the edge reducer.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDisplay {
	pub color: String,
	pub size: f64,
	pub hidden: bool,
	pub z_index: i32,
}

/// Detail card for a clicked paper.
#[derive(Clone, Debug, PartialEq)]
pub struct PaperDetails {
	pub title: String,
	pub authors: Vec<String>,
	pub abstract_text: String,
	pub keywords: Vec<String>,
	pub year: String,
	pub journal: String,
	pub citation_count: u64,
	pub doi: String,
}

impl PaperDetails {
	/// Card payload for `node`; citations fall back to the in-degree.
	pub fn of(graph: &PaperGraph, node: NodeIdx) -> Self {
		let paper = graph.node(node);
		Self {
			title: paper.label.clone(),
			authors: paper.author.clone(),
			abstract_text: paper.abstract_text.clone(),
			keywords: paper.keywords.clone(),
			year: paper.date.clone(),
			journal: paper.journal.clone(),
			citation_count: paper
				.citation_count
				.unwrap_or_else(|| graph.in_degree(node) as u64),
			doi: paper.doi.clone(),
		}
	}
}
