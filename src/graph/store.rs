use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use serde_json::Value;

use super::document::{Attributes, DocumentEdge, DocumentNode, GraphDocument};
use super::normalize::{self, UNDEFINED_YEAR};
use super::palette::cluster_color;
use crate::error::{ExplorerError, Result};

const BASE_SIZE: f64 = 5.0;
const MAX_CITED_SIZE: f64 = 10.0;

/// Dense index of a node inside a [`PaperGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIdx(pub usize);

/// A typed, normalized node record.
#[derive(Clone, Debug, PartialEq)]
pub struct Paper {
	pub id: String,
	pub label: String,
	pub author: Vec<String>,
	pub abstract_text: String,
	pub keywords: Vec<String>,
	pub journal: String,
	/// Four character year or `"undefined"`.
	pub date: String,
	pub doi: String,
	pub citation_count: Option<u64>,
	pub cluster: Option<String>,
	/// Document colour, else the cluster colour; `None` draws the default.
	pub color: Option<String>,
	pub x: f64,
	pub y: f64,
	/// Document size, else grown with the citation count.
	pub size: f64,
	/// Whether the document supplied both coordinates.
	pub positioned: bool,
	/// Normalized attribute map, kept for export.
	pub attributes: Attributes,
}

impl Paper {
	fn from_document(node: &DocumentNode) -> Self {
		let attributes = normalize::normalize(&node.attributes);
		let text = |key: &str| match attributes.get(key) {
			Some(Value::String(s)) => Some(s.clone()),
			Some(Value::Number(n)) => Some(n.to_string()),
			_ => None,
		};
		let number = |key: &str| attributes.get(key).and_then(Value::as_f64);

		let label = text("label")
			.or_else(|| text("title"))
			.unwrap_or_else(|| node.id.clone());
		let citation_count = ["citationCount", "citationcount", "citations"]
			.iter()
			.find_map(|key| match attributes.get(*key) {
				Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
				Some(Value::String(s)) => s.trim().parse().ok(),
				_ => None,
			});
		let (x, y) = (number("x"), number("y"));
		let cluster = text("cluster").or_else(|| text("subfield"));

		Self {
			id: node.id.clone(),
			label,
			author: normalize::coerce_list(attributes.get("author")),
			abstract_text: text("abstract").unwrap_or_default(),
			keywords: normalize::coerce_list(attributes.get("keywords")),
			journal: text("journal").unwrap_or_default(),
			date: text("date").unwrap_or_else(|| UNDEFINED_YEAR.into()),
			doi: text("doi").unwrap_or_default(),
			citation_count,
			color: text("color").or_else(|| cluster.as_deref().map(cluster_color)),
			cluster,
			positioned: x.is_some() && y.is_some(),
			x: x.unwrap_or(0.0),
			y: y.unwrap_or(0.0),
			size: number("size").unwrap_or(BASE_SIZE),
			attributes,
		}
	}

	/// Parsed publication year, `None` for the sentinel or garbage.
	pub fn year(&self) -> Option<i32> {
		normalize::parse_year(&self.date)
	}
}

/// An edge between two stored nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: String,
	pub source: NodeIdx,
	pub target: NodeIdx,
	pub attributes: Attributes,
}

/// Spatial bounding box in data coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
	pub min_x: f64,
	pub max_x: f64,
	pub min_y: f64,
	pub max_y: f64,
}

impl Extent {
	/// Bounding box of a point cloud, `None` when empty.
	pub fn of_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
		points.into_iter().fold(None, |acc, (x, y)| {
			Some(match acc {
				None => Extent { min_x: x, max_x: x, min_y: y, max_y: y },
				Some(e) => Extent {
					min_x: e.min_x.min(x),
					max_x: e.max_x.max(x),
					min_y: e.min_y.min(y),
					max_y: e.max_y.max(y),
				},
			})
		})
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn center(&self) -> (f64, f64) {
		((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
	}
}

/// In-memory citation graph, immutable after load apart from layout backfill.
#[derive(Clone, Debug, Default)]
pub struct PaperGraph {
	nodes: Vec<Paper>,
	edges: Vec<Edge>,
	by_id: HashMap<String, NodeIdx>,
	neighbors: Vec<HashSet<NodeIdx>>,
	in_degree: Vec<usize>,
}

impl PaperGraph {
	/// Build the store from a document, normalizing every node.
	pub fn from_document(doc: &GraphDocument) -> Result<Self> {
		if doc.nodes.is_empty() {
			return Err(ExplorerError::EmptyGraph);
		}
		let mut graph = Self::default();

		for node in &doc.nodes {
			if graph.by_id.contains_key(&node.id) {
				warn!("duplicate node id {:?}, keeping the first occurrence", node.id);
				continue;
			}
			let idx = NodeIdx(graph.nodes.len());
			graph.by_id.insert(node.id.clone(), idx);
			graph.nodes.push(Paper::from_document(node));
			graph.neighbors.push(HashSet::new());
			graph.in_degree.push(0);
		}

		for (i, edge) in doc.edges.iter().enumerate() {
			graph.add_edge(i, edge);
		}
		graph.size_by_citations();

		debug!(
			"graph store built: {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		Ok(graph)
	}

	fn add_edge(&mut self, position: usize, edge: &DocumentEdge) {
		let (Some(&source), Some(&target)) = (self.by_id.get(&edge.source), self.by_id.get(&edge.target))
		else {
			warn!(
				"dropping edge {} -> {}: endpoint not in graph",
				edge.source, edge.target
			);
			return;
		};
		self.neighbors[source.0].insert(target);
		self.neighbors[target.0].insert(source);
		self.in_degree[target.0] += 1;
		self.edges.push(Edge {
			id: edge.id.clone().unwrap_or_else(|| format!("e{position}")),
			source,
			target,
			attributes: edge.attributes.clone(),
		});
	}

	/// Nodes without a document size grow by one per five citations, capped.
	fn size_by_citations(&mut self) {
		for (paper, &cited) in self.nodes.iter_mut().zip(&self.in_degree) {
			if paper.attributes.get("size").and_then(Value::as_f64).is_none() {
				paper.size = (BASE_SIZE + cited as f64 / 5.0).min(MAX_CITED_SIZE);
			}
		}
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn node(&self, idx: NodeIdx) -> &Paper {
		&self.nodes[idx.0]
	}

	pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &Paper)> {
		self.nodes.iter().enumerate().map(|(i, p)| (NodeIdx(i), p))
	}

	pub fn node_indices(&self) -> impl Iterator<Item = NodeIdx> + use<> {
		(0..self.nodes.len()).map(NodeIdx)
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Undirected neighborhood.
	pub fn neighbors(&self, idx: NodeIdx) -> &HashSet<NodeIdx> {
		&self.neighbors[idx.0]
	}

	pub fn are_neighbors(&self, a: NodeIdx, b: NodeIdx) -> bool {
		self.neighbors[a.0].contains(&b)
	}

	pub fn in_degree(&self, idx: NodeIdx) -> usize {
		self.in_degree[idx.0]
	}

	/// Whether any node came with document coordinates.
	pub fn has_positions(&self) -> bool {
		self.nodes.iter().any(|p| p.positioned)
	}

	pub fn set_position(&mut self, idx: NodeIdx, x: f64, y: f64) {
		let paper = &mut self.nodes[idx.0];
		paper.x = x;
		paper.y = y;
		paper.positioned = true;
		paper.attributes.insert("x".into(), x.into());
		paper.attributes.insert("y".into(), y.into());
	}

	pub fn position(&self, idx: NodeIdx) -> (f64, f64) {
		let paper = &self.nodes[idx.0];
		(paper.x, paper.y)
	}

	/// Bounding box of the whole graph.
	pub fn extent(&self) -> Extent {
		Extent::of_points(self.nodes.iter().map(|p| (p.x, p.y))).unwrap_or(Extent {
			min_x: 0.0,
			max_x: 0.0,
			min_y: 0.0,
			max_y: 0.0,
		})
	}

	/// Export the normalized graph back into the exchange format.
	pub fn to_document(&self) -> GraphDocument {
		GraphDocument {
			nodes: self
				.nodes
				.iter()
				.map(|p| DocumentNode {
					id: p.id.clone(),
					attributes: p.attributes.clone(),
				})
				.collect(),
			edges: self
				.edges
				.iter()
				.map(|e| DocumentEdge {
					id: Some(e.id.clone()),
					source: self.nodes[e.source.0].id.clone(),
					target: self.nodes[e.target.0].id.clone(),
					attributes: e.attributes.clone(),
				})
				.collect(),
		}
	}
}
