use std::collections::HashSet;

use crate::graph::NodeIdx;

/// Intersect the active match sets.
///
/// Inactive (`None`) entries are skipped; with nothing active the result is
/// `None`, meaning every node is shown.
pub fn intersect<I>(matches: I) -> Option<HashSet<NodeIdx>>
where
	I: IntoIterator<Item = Option<HashSet<NodeIdx>>>,
{
	let mut active: Vec<HashSet<NodeIdx>> = matches.into_iter().flatten().collect();
	if active.is_empty() {
		return None;
	}
	active.sort_by_key(HashSet::len);

	let mut iter = active.into_iter();
	let mut result = iter.next()?;
	for other in iter {
		result.retain(|idx| other.contains(idx));
	}
	Some(result)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn set(ids: &[usize]) -> HashSet<NodeIdx> {
		ids.iter().copied().map(NodeIdx).collect()
	}

	#[test]
	fn nothing_active_is_none() {
		assert_eq!(intersect(Vec::new()), None);
		assert_eq!(intersect(vec![None, None]), None);
	}

	#[test]
	fn and_across_fields() {
		let out = intersect(vec![Some(set(&[1, 2, 3])), None, Some(set(&[2, 3, 4]))]);
		assert_eq!(out, Some(set(&[2, 3])));
	}

	#[test]
	fn empty_intersection_stays_active() {
		let out = intersect(vec![Some(set(&[1])), Some(set(&[2]))]);
		assert_eq!(out, Some(HashSet::new()));
	}

	#[test]
	fn adding_a_field_never_grows_the_result() {
		let fields = [set(&[0, 1, 2, 3, 4]), set(&[1, 2, 3]), set(&[2, 3, 9]), set(&[3])];
		let mut previous: Option<HashSet<NodeIdx>> = None;
		for n in 1..=fields.len() {
			let current = intersect(fields[..n].iter().cloned().map(Some)).unwrap();
			if let Some(prev) = &previous {
				assert!(current.is_subset(prev));
			}
			previous = Some(current);
		}
	}
}
