use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::store::{NodeIdx, PaperGraph};

/// Lower bound used when no node carries a parseable year.
pub const FALLBACK_MIN_YEAR: i32 = 1900;

/// Inclusive span of publication years.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
	pub min: i32,
	pub max: i32,
}

impl YearRange {
	pub fn new(min: i32, max: i32) -> Self {
		Self { min, max }
	}

	pub fn contains(&self, year: i32) -> bool {
		self.min <= year && year <= self.max
	}
}

/// Aggregate counts shown next to the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
	pub nodes: usize,
	pub edges: usize,
	pub components: usize,
	pub density: f64,
}

/// Values derived once per load and cached alongside the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
	pub stats: GraphStats,
	pub clusters: Vec<String>,
	pub authors: Vec<String>,
	#[serde(rename = "yearRange")]
	pub year_range: YearRange,
}

impl GraphMetadata {
	pub fn extract(graph: &PaperGraph) -> Self {
		let nodes = graph.node_count();
		let edges = graph.edge_count();
		let density = if nodes < 2 {
			0.0
		} else {
			edges as f64 / (nodes as f64 * (nodes as f64 - 1.0))
		};

		let clusters: BTreeSet<String> =
			graph.nodes().filter_map(|(_, p)| p.cluster.clone()).collect();
		let authors: BTreeSet<String> = graph
			.nodes()
			.flat_map(|(_, p)| p.author.iter().cloned())
			.collect();

		let years = graph.nodes().filter_map(|(_, p)| p.year());
		let year_range = years
			.fold(None, |acc: Option<YearRange>, y| {
				Some(match acc {
					None => YearRange::new(y, y),
					Some(r) => YearRange::new(r.min.min(y), r.max.max(y)),
				})
			})
			.unwrap_or_else(|| YearRange::new(FALLBACK_MIN_YEAR, current_year()));

		Self {
			stats: GraphStats {
				nodes,
				edges,
				components: count_components(graph),
				density,
			},
			clusters: clusters.into_iter().collect(),
			authors: authors.into_iter().collect(),
			year_range,
		}
	}
}

fn count_components(graph: &PaperGraph) -> usize {
	let mut seen: HashSet<NodeIdx> = HashSet::new();
	let mut components = 0;
	for start in graph.node_indices() {
		if !seen.insert(start) {
			continue;
		}
		components += 1;
		let mut stack = vec![start];
		while let Some(idx) = stack.pop() {
			for &next in graph.neighbors(idx) {
				if seen.insert(next) {
					stack.push(next);
				}
			}
		}
	}
	components
}

#[cfg(target_arch = "wasm32")]
fn current_year() -> i32 {
	js_sys::Date::new_0().get_full_year() as i32
}

#[cfg(not(target_arch = "wasm32"))]
fn current_year() -> i32 {
	2026
}
