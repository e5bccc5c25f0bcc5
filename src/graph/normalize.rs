//! Post-load attribute backfill.
//!
//! After [`normalize`] every node record carries `abstract` as a string,
//! `keywords` and `author` as string lists, and `date`/`year` as either a
//! four character year or the [`UNDEFINED_YEAR`] sentinel. The pass is pure
//! and idempotent.

use serde_json::Value;

use super::document::Attributes;

/// Sentinel stored in `date`/`year` when a node has no usable date.
pub const UNDEFINED_YEAR: &str = "undefined";

/// Return a copy of `raw` with every searchable attribute well-typed.
pub fn normalize(raw: &Attributes) -> Attributes {
	let mut out = raw.clone();

	let abstract_text = match raw.get("abstract") {
		Some(Value::String(s)) => s.clone(),
		_ => String::new(),
	};
	out.insert("abstract".into(), Value::String(abstract_text));

	let keywords = coerce_list(raw.get("keywords"));
	out.insert("keywords".into(), to_value_list(keywords));

	let authors = coerce_list(raw.get("author").or_else(|| raw.get("authors")));
	out.insert("author".into(), to_value_list(authors));

	let year = derive_year(raw.get("date").or_else(|| raw.get("year")));
	out.insert("date".into(), Value::String(year.clone()));
	out.insert("year".into(), Value::String(year));

	out
}

/// Reduce a date-like value to its year.
///
/// Leading-digit strings keep their first four characters (`2019-04-01`),
/// anything else keeps its last four (`April 2019`).
pub fn derive_year(raw: Option<&Value>) -> String {
	let text = match raw {
		Some(Value::String(s)) => s.trim().to_string(),
		Some(Value::Number(n)) => n.to_string(),
		_ => String::new(),
	};
	if text.is_empty() || text == UNDEFINED_YEAR {
		return UNDEFINED_YEAR.to_string();
	}

	let chars: Vec<char> = text.chars().collect();
	let year: String = if chars[0].is_ascii_digit() {
		chars.iter().take(4).collect()
	} else {
		chars[chars.len().saturating_sub(4)..].iter().collect()
	};
	year.trim().to_string()
}

/// Parse the leading integer of a normalized year, if any.
pub fn parse_year(year: &str) -> Option<i32> {
	let digits: String = year.chars().take_while(char::is_ascii_digit).collect();
	digits.parse().ok()
}

/// Coerce a list-like attribute: arrays keep their scalar entries, strings
/// are split on `,` and `;`, everything else is empty.
pub fn coerce_list(raw: Option<&Value>) -> Vec<String> {
	match raw {
		Some(Value::Array(items)) => items
			.iter()
			.filter_map(|item| match item {
				Value::String(s) => Some(s.trim().to_string()),
				Value::Number(n) => Some(n.to_string()),
				_ => None,
			})
			.filter(|s| !s.is_empty())
			.collect(),
		Some(Value::String(s)) => s
			.split([',', ';'])
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(String::from)
			.collect(),
		_ => Vec::new(),
	}
}

fn to_value_list(items: Vec<String>) -> Value {
	Value::Array(items.into_iter().map(Value::String).collect())
}
