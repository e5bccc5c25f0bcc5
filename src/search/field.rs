use serde::{Deserialize, Serialize};

use crate::graph::Paper;

/// Free-text search inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
	Label,
	Author,
	Abstract,
	Journal,
	Keywords,
}

/// How a field's value is stored and matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldFamily {
	/// One string, matched by substring.
	Scalar,
	/// A list of strings, matched when any element contains a sub-query.
	List,
}

/// A field value tagged with its family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue<'a> {
	Scalar(&'a str),
	List(&'a [String]),
}

impl SearchField {
	pub const ALL: [SearchField; 5] = [
		SearchField::Label,
		SearchField::Author,
		SearchField::Abstract,
		SearchField::Journal,
		SearchField::Keywords,
	];

	pub fn family(self) -> FieldFamily {
		match self {
			SearchField::Author | SearchField::Keywords => FieldFamily::List,
			SearchField::Label | SearchField::Abstract | SearchField::Journal => FieldFamily::Scalar,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			SearchField::Label => "label",
			SearchField::Author => "author",
			SearchField::Abstract => "abstract",
			SearchField::Journal => "journal",
			SearchField::Keywords => "keywords",
		}
	}

	pub fn value(self, paper: &Paper) -> FieldValue<'_> {
		match self {
			SearchField::Label => FieldValue::Scalar(&paper.label),
			SearchField::Abstract => FieldValue::Scalar(&paper.abstract_text),
			SearchField::Journal => FieldValue::Scalar(&paper.journal),
			SearchField::Author => FieldValue::List(&paper.author),
			SearchField::Keywords => FieldValue::List(&paper.keywords),
		}
	}
}

impl FieldValue<'_> {
	/// The value as a list of strings; scalars become a single entry.
	pub fn entries(&self) -> Vec<&str> {
		match self {
			FieldValue::Scalar(s) => vec![*s],
			FieldValue::List(items) => items.iter().map(String::as_str).collect(),
		}
	}
}
