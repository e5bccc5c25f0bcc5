//! Per-field trigram indices.
//!
//! Each node's lower-cased field entries are broken into character trigrams
//! once at load time. A query's trigrams narrow the candidate set, and every
//! candidate is then checked with a plain substring test, so results are
//! identical to a full scan. Queries shorter than a trigram scan all nodes.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::field::SearchField;
use crate::graph::{NodeIdx, PaperGraph};

type Trigram = [char; 3];

fn trigrams(text: &str) -> impl Iterator<Item = Trigram> + '_ {
	let chars: Vec<char> = text.chars().collect();
	(0..chars.len().saturating_sub(2))
		.map(move |i| [chars[i], chars[i + 1], chars[i + 2]])
}

/// Substring index over one field of every node.
#[derive(Clone, Debug)]
pub struct FieldIndex {
	entries: Vec<Vec<String>>,
	postings: HashMap<Trigram, Vec<NodeIdx>>,
}

impl FieldIndex {
	pub fn build(graph: &PaperGraph, field: SearchField) -> Self {
		let mut entries = Vec::with_capacity(graph.node_count());
		let mut postings: HashMap<Trigram, Vec<NodeIdx>> = HashMap::new();

		for (idx, paper) in graph.nodes() {
			let lowered: Vec<String> = field
				.value(paper)
				.entries()
				.into_iter()
				.map(str::to_lowercase)
				.collect();
			let grams: HashSet<Trigram> = lowered.iter().flat_map(|e| trigrams(e)).collect();
			for gram in grams {
				postings.entry(gram).or_default().push(idx);
			}
			entries.push(lowered);
		}

		debug!(
			"indexed field {}: {} trigrams",
			field.name(),
			postings.len()
		);
		Self { entries, postings }
	}

	/// Nodes with at least one entry containing `needle`, case-insensitively.
	pub fn matching(&self, needle: &str) -> HashSet<NodeIdx> {
		let needle = needle.to_lowercase();
		let hit = |idx: &NodeIdx| self.entries[idx.0].iter().any(|e| e.contains(&needle));

		match self.candidates(&needle) {
			Some(candidates) => candidates.into_iter().filter(hit).collect(),
			None => (0..self.entries.len()).map(NodeIdx).filter(hit).collect(),
		}
	}

	/// Nodes holding every trigram of `needle`; `None` when it has none.
	fn candidates(&self, needle: &str) -> Option<HashSet<NodeIdx>> {
		let grams: HashSet<Trigram> = trigrams(needle).collect();
		if grams.is_empty() {
			return None;
		}

		let mut lists = Vec::with_capacity(grams.len());
		for gram in &grams {
			match self.postings.get(gram) {
				Some(list) => lists.push(list),
				None => return Some(HashSet::new()),
			}
		}
		lists.sort_by_key(|list| list.len());

		let mut result: HashSet<NodeIdx> = lists[0].iter().copied().collect();
		for list in &lists[1..] {
			let other: HashSet<NodeIdx> = list.iter().copied().collect();
			result.retain(|idx| other.contains(idx));
			if result.is_empty() {
				break;
			}
		}
		Some(result)
	}
}

/// Every field index plus the parsed year and cluster of each node.
#[derive(Clone, Debug)]
pub struct SearchIndex {
	fields: Vec<FieldIndex>,
	years: Vec<Option<i32>>,
	clusters: Vec<Option<String>>,
}

impl SearchIndex {
	pub fn build(graph: &PaperGraph) -> Self {
		Self {
			fields: SearchField::ALL
				.iter()
				.map(|&field| FieldIndex::build(graph, field))
				.collect(),
			years: graph.nodes().map(|(_, p)| p.year()).collect(),
			clusters: graph.nodes().map(|(_, p)| p.cluster.clone()).collect(),
		}
	}

	pub fn field(&self, field: SearchField) -> &FieldIndex {
		let pos = SearchField::ALL
			.iter()
			.position(|f| *f == field)
			.unwrap_or_default();
		&self.fields[pos]
	}

	pub fn years(&self) -> impl Iterator<Item = (NodeIdx, Option<i32>)> + '_ {
		self.years.iter().enumerate().map(|(i, y)| (NodeIdx(i), *y))
	}

	pub fn clusters(&self) -> impl Iterator<Item = (NodeIdx, Option<&str>)> + '_ {
		self.clusters.iter().enumerate().map(|(i, c)| (NodeIdx(i), c.as_deref()))
	}
}
