use leptos::prelude::*;

use crate::graph::GraphStats;

fn count_or_na(n: usize) -> String {
	if n == 0 { "N/A".to_string() } else { n.to_string() }
}

/// Display rows for the stats table; zero values read as missing.
fn stat_rows(stats: &GraphStats) -> [(&'static str, String); 4] {
	let density = if stats.density > 0.0 {
		format!("{:.4}", stats.density)
	} else {
		"N/A".to_string()
	};
	[
		("Nodes", count_or_na(stats.nodes)),
		("Edges", count_or_na(stats.edges)),
		("Components", count_or_na(stats.components)),
		("Density", density),
	]
}

/// Node, edge and component counts plus density of the loaded graph.
#[component]
pub fn NetworkStats(#[prop(into)] stats: Signal<Option<GraphStats>>) -> impl IntoView {
	move || {
		stats.get().map(|stats| {
			let rows = stat_rows(&stats)
				.into_iter()
				.map(|(name, value)| view! { <dt>{name}</dt><dd>{value}</dd> })
				.collect_view();
			view! { <dl class="network-stats">{rows}</dl> }
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn density_has_four_decimals() {
		let rows = stat_rows(&GraphStats { nodes: 4, edges: 1, components: 3, density: 1.0 / 12.0 });
		let values: Vec<_> = rows.iter().map(|(_, v)| v.as_str()).collect();
		assert_eq!(values, ["4", "1", "3", "0.0833"]);
	}

	#[test]
	fn empty_values_read_na() {
		let rows = stat_rows(&GraphStats { nodes: 1, edges: 0, components: 1, density: 0.0 });
		assert_eq!(rows[1], ("Edges", "N/A".to_string()));
		assert_eq!(rows[3], ("Density", "N/A".to_string()));
		assert_eq!(rows[0].1, "1");
	}
}
