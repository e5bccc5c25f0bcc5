//! Search state and the coordinator that updates it.
//!
//! Matchers and the aggregator are pure; [`SearchState::apply_edit`] is the
//! single place that writes their result into the state and decides which
//! camera move the renderer should make.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use super::aggregate::intersect;
use super::field::SearchField;
use super::index::SearchIndex;
use super::predicate::{match_cluster, match_field, match_years};
use crate::graph::{NodeIdx, PaperGraph, YearRange};

/// A change coming from one of the search controls.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchEdit {
	Query(SearchField, String),
	Years(YearRange),
	/// Restrict to one cluster, `None` for all clusters.
	Cluster(Option<String>),
	Clear,
}

/// Camera move requested after a search update.
#[derive(Clone, Debug, PartialEq)]
pub enum CameraRequest {
	/// Leave the camera where it is.
	Stay,
	/// Center on one selected node.
	CenterOn(NodeIdx),
	/// Frame the given non-empty node set.
	Fit(HashSet<NodeIdx>),
}

/// Outcome of the selection resolver.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
	/// No filter is active, show everything.
	ShowAll,
	/// Exact label match on a single node.
	Selected(NodeIdx),
	/// Highlight the matching nodes and dim the rest.
	Suggest(HashSet<NodeIdx>),
}

/// Per-session search and hover state.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchState {
	pub hovered_node: Option<NodeIdx>,
	pub hovered_neighbors: Option<HashSet<NodeIdx>>,
	pub selected_node: Option<NodeIdx>,
	/// `None` while no filter is active.
	pub suggestions: Option<HashSet<NodeIdx>>,
	pub field_queries: BTreeMap<SearchField, String>,
	pub year_min: i32,
	pub year_max: i32,
	pub cluster: Option<String>,
	full_years: YearRange,
}

impl SearchState {
	pub fn new(full_years: YearRange) -> Self {
		Self {
			hovered_node: None,
			hovered_neighbors: None,
			selected_node: None,
			suggestions: None,
			field_queries: BTreeMap::new(),
			year_min: full_years.min,
			year_max: full_years.max,
			cluster: None,
			full_years,
		}
	}

	pub fn years(&self) -> YearRange {
		YearRange::new(self.year_min, self.year_max)
	}

	pub fn query(&self, field: SearchField) -> &str {
		self.field_queries.get(&field).map(String::as_str).unwrap_or("")
	}

	/// Match sets of the constraints that are actually in force, each tagged
	/// with the text field it came from (`None` for years and cluster).
	fn active_matches(&self, index: &SearchIndex) -> Vec<(Option<SearchField>, HashSet<NodeIdx>)> {
		let fields = self.field_queries.iter().filter_map(|(field, query)| {
			match_field(index, *field, query).map(|nodes| (Some(*field), nodes))
		});
		let years = match_years(index, self.years(), self.full_years).map(|nodes| (None, nodes));
		let cluster = match_cluster(index, self.cluster.as_deref()).map(|nodes| (None, nodes));
		fields.chain(years).chain(cluster).collect()
	}

	/// Record an edit, re-run every matcher and resolve the outcome.
	pub fn apply_edit(
		&mut self,
		edit: SearchEdit,
		index: &SearchIndex,
		graph: &PaperGraph,
	) -> CameraRequest {
		match edit {
			SearchEdit::Query(field, query) => {
				self.field_queries.insert(field, query);
			}
			SearchEdit::Years(range) => {
				self.year_min = range.min;
				self.year_max = range.max;
			}
			SearchEdit::Cluster(cluster) => {
				self.cluster = cluster;
			}
			SearchEdit::Clear => {
				self.field_queries.clear();
				self.cluster = None;
				self.year_min = self.full_years.min;
				self.year_max = self.full_years.max;
			}
		}

		let active = self.active_matches(index);
		let label_only = matches!(active.as_slice(), [(Some(SearchField::Label), _)]);
		let suggestions = intersect(active.into_iter().map(|(_, nodes)| Some(nodes)));
		let resolution = self.resolve(graph, suggestions, label_only);
		self.apply_resolution(resolution)
	}

	/// Decide between exact selection and suggestion mode.
	///
	/// Exact selection only happens when the label matcher is the sole
	/// constraint in force and its query equals the one matching node's label
	/// verbatim.
	pub fn resolve(
		&self,
		graph: &PaperGraph,
		suggestions: Option<HashSet<NodeIdx>>,
		label_only: bool,
	) -> Resolution {
		let Some(suggestions) = suggestions else {
			return Resolution::ShowAll;
		};

		if label_only && suggestions.len() == 1 {
			if let Some(&only) = suggestions.iter().next() {
				if graph.node(only).label == self.query(SearchField::Label) {
					return Resolution::Selected(only);
				}
			}
		}
		Resolution::Suggest(suggestions)
	}

	fn apply_resolution(&mut self, resolution: Resolution) -> CameraRequest {
		match resolution {
			Resolution::ShowAll => {
				self.selected_node = None;
				self.suggestions = None;
				CameraRequest::Stay
			}
			Resolution::Selected(node) => {
				debug!("exact match selects node {}", node.0);
				self.selected_node = Some(node);
				self.suggestions = None;
				CameraRequest::CenterOn(node)
			}
			Resolution::Suggest(nodes) => {
				debug!("{} suggestions", nodes.len());
				self.selected_node = None;
				self.clear_hover();
				let request = if nodes.is_empty() {
					CameraRequest::Stay
				} else {
					CameraRequest::Fit(nodes.clone())
				};
				self.suggestions = Some(nodes);
				request
			}
		}
	}

	/// Update hover; ignored while a suggestion filter is active.
	///
	/// Returns whether the state changed.
	pub fn set_hovered(&mut self, node: Option<NodeIdx>, graph: &PaperGraph) -> bool {
		if self.suggestions.is_some() || self.hovered_node == node {
			return false;
		}
		match node {
			Some(idx) => {
				self.hovered_node = Some(idx);
				self.hovered_neighbors = Some(graph.neighbors(idx).clone());
			}
			None => self.clear_hover(),
		}
		true
	}

	fn clear_hover(&mut self) {
		self.hovered_node = None;
		self.hovered_neighbors = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphDocument, GraphMetadata};

	struct Fixture {
		graph: PaperGraph,
		index: SearchIndex,
		state: SearchState,
	}

	fn fixture() -> Fixture {
		let doc = GraphDocument::from_json(
			r#"{"nodes": [
				{"id": "A", "label": "Motor learning", "author": ["Smith"], "date": "2001",
				 "journal": "Neuron", "keywords": ["motor", "adaptation"], "cluster": "motor"},
				{"id": "B", "label": "Motor learning and sleep", "author": ["Jones"], "date": "2004",
				 "journal": "J Neurophysiol", "keywords": ["sleep"]},
				{"id": "C", "label": "Visual search", "author": ["Lee"], "date": "2010",
				 "journal": "Neuron", "abstract": "Attention and motor output", "cluster": "vision"},
				{"id": "D", "label": "Undated note", "author": ["Smith", "Lee"]}
			],
			"edges": [{"source": "A", "target": "B"}, {"source": "B", "target": "C"}]}"#,
		)
		.unwrap();
		let graph = PaperGraph::from_document(&doc).unwrap();
		let index = SearchIndex::build(&graph);
		let state = SearchState::new(GraphMetadata::extract(&graph).year_range);
		Fixture { graph, index, state }
	}

	fn set(ids: &[usize]) -> HashSet<NodeIdx> {
		ids.iter().copied().map(NodeIdx).collect()
	}

	impl Fixture {
		fn edit(&mut self, edit: SearchEdit) -> CameraRequest {
			self.state.apply_edit(edit, &self.index, &self.graph)
		}
	}

	#[test]
	fn defaults_show_everything() {
		let mut f = fixture();
		assert_eq!(f.state.years(), YearRange::new(2001, 2010));
		assert_eq!(f.edit(SearchEdit::Query(SearchField::Journal, String::new())), CameraRequest::Stay);
		assert_eq!(f.state.suggestions, None);
		assert_eq!(f.state.selected_node, None);
	}

	#[test]
	fn multi_match_fits_camera() {
		let mut f = fixture();
		let req = f.edit(SearchEdit::Query(SearchField::Label, "motor".into()));
		assert_eq!(req, CameraRequest::Fit(set(&[0, 1])));
		assert_eq!(f.state.suggestions, Some(set(&[0, 1])));
		assert_eq!(f.state.selected_node, None);
	}

	#[test]
	fn exact_label_selects_and_centers() {
		let mut f = fixture();
		let req = f.edit(SearchEdit::Query(SearchField::Label, "Visual search".into()));
		assert_eq!(req, CameraRequest::CenterOn(NodeIdx(2)));
		assert_eq!(f.state.selected_node, Some(NodeIdx(2)));
		assert_eq!(f.state.suggestions, None);
	}

	#[test]
	fn comma_only_query_does_not_block_exact_selection() {
		let mut f = fixture();
		f.edit(SearchEdit::Query(SearchField::Author, ",".into()));
		assert_eq!(f.state.suggestions, None);
		let req = f.edit(SearchEdit::Query(SearchField::Label, "Visual search".into()));
		assert_eq!(req, CameraRequest::CenterOn(NodeIdx(2)));
		assert_eq!(f.state.selected_node, Some(NodeIdx(2)));
	}

	#[test]
	fn single_non_exact_match_stays_a_suggestion() {
		let mut f = fixture();
		let req = f.edit(SearchEdit::Query(SearchField::Label, "visual".into()));
		assert_eq!(req, CameraRequest::Fit(set(&[2])));
		assert_eq!(f.state.selected_node, None);

		// a verbatim label with another field active is not the exact path
		f.edit(SearchEdit::Query(SearchField::Label, "Visual search".into()));
		let req = f.edit(SearchEdit::Query(SearchField::Journal, "neuron".into()));
		assert_eq!(req, CameraRequest::Fit(set(&[2])));
		assert_eq!(f.state.selected_node, None);
	}

	#[test]
	fn fields_intersect_and_empty_result_keeps_camera() {
		let mut f = fixture();
		f.edit(SearchEdit::Query(SearchField::Author, "Smith,Jones".into()));
		assert_eq!(f.state.suggestions, Some(set(&[0, 1, 3])));
		f.edit(SearchEdit::Query(SearchField::Journal, "neuron".into()));
		assert_eq!(f.state.suggestions, Some(set(&[0])));
		let req = f.edit(SearchEdit::Query(SearchField::Keywords, "sleep".into()));
		assert_eq!(req, CameraRequest::Stay);
		assert_eq!(f.state.suggestions, Some(HashSet::new()));
	}

	#[test]
	fn year_range_filters_and_excludes_undated() {
		let mut f = fixture();
		let req = f.edit(SearchEdit::Years(YearRange::new(2001, 2004)));
		assert_eq!(req, CameraRequest::Fit(set(&[0, 1])));
		f.edit(SearchEdit::Years(YearRange::new(2002, 2010)));
		assert_eq!(f.state.suggestions, Some(set(&[1, 2])));
	}

	#[test]
	fn cluster_narrows_other_filters() {
		let mut f = fixture();
		let req = f.edit(SearchEdit::Cluster(Some("motor".into())));
		assert_eq!(req, CameraRequest::Fit(set(&[0])));
		f.edit(SearchEdit::Query(SearchField::Journal, "neuron".into()));
		assert_eq!(f.state.suggestions, Some(set(&[0])));
		f.edit(SearchEdit::Cluster(Some("vision".into())));
		assert_eq!(f.state.suggestions, Some(set(&[2])));
		f.edit(SearchEdit::Cluster(None));
		assert_eq!(f.state.suggestions, Some(set(&[0, 2])));

		// an exact label is not the exact path while a cluster is picked
		f.edit(SearchEdit::Clear);
		f.edit(SearchEdit::Cluster(Some("vision".into())));
		f.edit(SearchEdit::Query(SearchField::Label, "Visual search".into()));
		assert_eq!(f.state.selected_node, None);
		assert_eq!(f.state.suggestions, Some(set(&[2])));
	}

	#[test]
	fn clearing_returns_to_show_all() {
		let mut f = fixture();
		f.edit(SearchEdit::Query(SearchField::Abstract, "motor".into()));
		f.edit(SearchEdit::Years(YearRange::new(2005, 2010)));
		f.edit(SearchEdit::Cluster(Some("vision".into())));
		assert_eq!(f.state.suggestions, Some(set(&[2])));

		assert_eq!(f.edit(SearchEdit::Clear), CameraRequest::Stay);
		assert_eq!(f.state.suggestions, None);
		assert_eq!(f.state.cluster, None);
		assert_eq!(f.state.years(), YearRange::new(2001, 2010));
		assert_eq!(f.state.query(SearchField::Abstract), "");
	}

	#[test]
	fn hover_is_suppressed_during_search() {
		let mut f = fixture();
		assert!(f.state.set_hovered(Some(NodeIdx(1)), &f.graph));
		assert_eq!(f.state.hovered_neighbors, Some(set(&[0, 2])));

		f.edit(SearchEdit::Query(SearchField::Label, "motor".into()));
		assert_eq!(f.state.hovered_node, None);
		assert_eq!(f.state.hovered_neighbors, None);
		assert!(!f.state.set_hovered(Some(NodeIdx(0)), &f.graph));
		assert_eq!(f.state.hovered_node, None);

		f.edit(SearchEdit::Clear);
		assert!(f.state.set_hovered(Some(NodeIdx(0)), &f.graph));
		assert!(f.state.set_hovered(None, &f.graph));
		assert_eq!(f.state.hovered_neighbors, None);
	}
}
