//! Per-field matchers.
//!
//! Each matcher returns `None` when its input leaves the field unconstrained
//! and otherwise the set of matching nodes, possibly empty.

use std::collections::HashSet;

use super::field::{FieldFamily, SearchField};
use super::index::{FieldIndex, SearchIndex};
use crate::graph::{NodeIdx, YearRange};

/// Case-insensitive substring match on a scalar field.
pub fn match_scalar(index: &FieldIndex, query: &str) -> Option<HashSet<NodeIdx>> {
	if query.is_empty() {
		return None;
	}
	Some(index.matching(query))
}

/// Comma-separated alternatives against a list field, unioned.
///
/// Each piece between commas is matched as written, surrounding spaces
/// included. Empty pieces are skipped; a query made only of commas leaves
/// the field unconstrained.
pub fn match_list(index: &FieldIndex, query: &str) -> Option<HashSet<NodeIdx>> {
	let mut subqueries = query.split(',').filter(|q| !q.is_empty()).peekable();
	subqueries.peek()?;
	Some(subqueries.fold(HashSet::new(), |mut acc, sub| {
		acc.extend(index.matching(sub));
		acc
	}))
}

/// Dispatch a text query on the field's family.
pub fn match_field(index: &SearchIndex, field: SearchField, query: &str) -> Option<HashSet<NodeIdx>> {
	let field_index = index.field(field);
	match field.family() {
		FieldFamily::Scalar => match_scalar(field_index, query),
		FieldFamily::List => match_list(field_index, query),
	}
}

/// Exact cluster filter; `None` leaves every cluster in.
pub fn match_cluster(index: &SearchIndex, cluster: Option<&str>) -> Option<HashSet<NodeIdx>> {
	let cluster = cluster?;
	Some(
		index
			.clusters()
			.filter(|(_, c)| *c == Some(cluster))
			.map(|(idx, _)| idx)
			.collect(),
	)
}

/// Inclusive year filter; inactive while `range` spans the whole data range.
///
/// Nodes without a parseable year never match an active range.
pub fn match_years(
	index: &SearchIndex,
	range: YearRange,
	full: YearRange,
) -> Option<HashSet<NodeIdx>> {
	if range == full {
		return None;
	}
	Some(
		index
			.years()
			.filter(|(_, year)| year.is_some_and(|y| range.contains(y)))
			.map(|(idx, _)| idx)
			.collect(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphDocument, PaperGraph};

	fn index(src: &str) -> SearchIndex {
		let doc = GraphDocument::from_json(src).unwrap();
		SearchIndex::build(&PaperGraph::from_document(&doc).unwrap())
	}

	fn set(ids: &[usize]) -> HashSet<NodeIdx> {
		ids.iter().copied().map(NodeIdx).collect()
	}

	#[test]
	fn empty_queries_are_inactive() {
		let idx = index(r#"{"nodes": [{"id": "a", "label": "x"}]}"#);
		for field in SearchField::ALL {
			assert_eq!(match_field(&idx, field, ""), None);
		}
		assert_eq!(match_field(&idx, SearchField::Author, ","), None);
		assert_eq!(match_field(&idx, SearchField::Author, ",,"), None);
	}

	#[test]
	fn scalar_substring_is_case_insensitive() {
		let idx = index(
			r#"{"nodes": [
				{"id": "a", "journal": "Journal of Neurophysiology"},
				{"id": "b", "journal": "Neuron"},
				{"id": "c"}
			]}"#,
		);
		assert_eq!(match_field(&idx, SearchField::Journal, "NEURO"), Some(set(&[0, 1])));
		assert_eq!(match_field(&idx, SearchField::Journal, "physio"), Some(set(&[0])));
		assert_eq!(match_field(&idx, SearchField::Journal, "nature"), Some(set(&[])));
	}

	#[test]
	fn comma_is_or_within_a_field() {
		let idx = index(
			r#"{"nodes": [
				{"id": "A", "author": ["Smith"]},
				{"id": "B", "author": ["Jones"]},
				{"id": "C", "author": ["Lee"]}
			]}"#,
		);
		let smith = match_field(&idx, SearchField::Author, "Smith").unwrap();
		let jones = match_field(&idx, SearchField::Author, "Jones").unwrap();
		let both = match_field(&idx, SearchField::Author, "Smith,Jones").unwrap();
		assert_eq!(both, smith.union(&jones).copied().collect());
		assert_eq!(both, set(&[0, 1]));
		assert_eq!(match_field(&idx, SearchField::Author, "smith,,lee"), Some(set(&[0, 2])));
	}

	#[test]
	fn list_pieces_keep_their_spaces() {
		let idx = index(
			r#"{"nodes": [
				{"id": "A", "author": ["Smith"]},
				{"id": "B", "author": ["Leeds"]},
				{"id": "C", "author": ["Bruce Lee"]}
			]}"#,
		);
		// " lee" only hits an entry with a space before "lee"
		assert_eq!(match_field(&idx, SearchField::Author, "smith, lee"), Some(set(&[0, 2])));
		assert_eq!(match_field(&idx, SearchField::Author, "smith,lee"), Some(set(&[0, 1, 2])));
	}

	#[test]
	fn cluster_filter_is_exact() {
		let idx = index(
			r#"{"nodes": [
				{"id": "a", "cluster": "motor"},
				{"id": "b", "subfield": "motor"},
				{"id": "c", "cluster": "motor control"},
				{"id": "d"}
			]}"#,
		);
		assert_eq!(match_cluster(&idx, None), None);
		assert_eq!(match_cluster(&idx, Some("motor")), Some(set(&[0, 1])));
		assert_eq!(match_cluster(&idx, Some("vision")), Some(set(&[])));
	}

	#[test]
	fn year_range_bounds() {
		let idx = index(
			r#"{"nodes": [
				{"id": "a", "date": "1999"},
				{"id": "b", "date": "2000"},
				{"id": "c", "date": "2005"},
				{"id": "d", "date": "2006"},
				{"id": "e"},
				{"id": "f", "date": "1990"}
			]}"#,
		);
		let full = YearRange::new(1990, 2006);
		assert_eq!(match_years(&idx, full, full), None);
		assert_eq!(
			match_years(&idx, YearRange::new(2000, 2005), full),
			Some(set(&[1, 2]))
		);
		// the sentinel year is excluded as soon as the range is active
		assert_eq!(
			match_years(&idx, YearRange::new(1990, 2005), full),
			Some(set(&[0, 1, 2, 5]))
		);
	}
}
