use std::sync::Arc;

use leptos::prelude::*;
use log::{info, warn};
use serde_json::json;

use crate::components::force_graph::{ForceGraphCanvas, PaperDetails};
use crate::components::graph_loader::GraphLoader;
use crate::components::network_stats::NetworkStats;
use crate::components::paper_card::PaperCard;
use crate::components::search_panel::SearchPanel;
use crate::error::Result;
use crate::graph::{Attributes, DocumentEdge, DocumentNode, GraphDocument, LoadedGraph, YearRange};
use crate::search::SearchEdit;
use crate::settings::ExplorerSettings;
use crate::storage;

const SAMPLE_AUTHORS: [&str; 6] = ["Smith", "Jones", "Nakamura", "Okafor", "Lindqvist", "Moreau"];
const SAMPLE_TOPICS: [&str; 5] = ["learning", "memory", "vision", "motor control", "attention"];

/// Generate a sample citation graph (random tree, every paper citing an older one).
fn generate_sample_data(n: usize) -> GraphDocument {
	let nodes = (0..n)
		.map(|i| {
			let topic = SAMPLE_TOPICS[i % SAMPLE_TOPICS.len()];
			let first = SAMPLE_AUTHORS[i % SAMPLE_AUTHORS.len()];
			let second = SAMPLE_AUTHORS[(i * 7 + 3) % SAMPLE_AUTHORS.len()];
			let journal = if i % 2 == 0 { "Journal of Samples" } else { "Sample Letters" };
			let attributes = json!({
				"label": format!("On {topic} ({i})"),
				"authors": format!("{first}, {second}"),
				"abstract": format!("A study of {topic} in a sample population."),
				"keywords": [topic, "sample"],
				"journal": journal,
				"year": 1990 + (rand_simple(i) * 35.0) as i32,
				"cluster": (i % 10).to_string(),
			});
			DocumentNode {
				id: i.to_string(),
				attributes: attributes.as_object().cloned().unwrap_or_default(),
			}
		})
		.collect();

	let edges = (1..n)
		.map(|i| {
			let target = (rand_simple(i) * (i as f64)) as usize;
			DocumentEdge {
				id: None,
				source: i.to_string(),
				target: target.to_string(),
				attributes: Attributes::new(),
			}
		})
		.collect();

	GraphDocument { nodes, edges }
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Last session's graph when one is cached, otherwise the sample graph.
fn initial_graph(settings: &ExplorerSettings) -> Result<LoadedGraph> {
	if let Some(cached) = storage::load() {
		match cached.restore(settings) {
			Ok(loaded) => {
				info!("restored cached graph");
				return Ok(loaded);
			}
			Err(e) => {
				warn!("cached graph unusable: {e}");
				storage::clear();
			}
		}
	}
	LoadedGraph::load(&generate_sample_data(100), settings)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let settings = ExplorerSettings::from_page();
	let loader_settings = settings.clone();
	let (initial, load_error) = match initial_graph(&settings) {
		Ok(loaded) => (Some(Arc::new(loaded)), None),
		Err(e) => (None, Some(e)),
	};

	let graph_data = RwSignal::new(initial);
	let last_edit = RwSignal::new(None::<SearchEdit>);
	let details = RwSignal::new(None::<PaperDetails>);

	let labels = Signal::derive(move || {
		graph_data
			.get()
			.map(|loaded| loaded.graph.nodes().map(|(_, p)| p.label.clone()).collect())
			.unwrap_or_default()
	});
	let authors = Signal::derive(move || {
		graph_data.get().map(|loaded| loaded.metadata.authors.clone()).unwrap_or_default()
	});
	let clusters = Signal::derive(move || {
		graph_data.get().map(|loaded| loaded.metadata.clusters.clone()).unwrap_or_default()
	});
	let stats = Signal::derive(move || graph_data.get().map(|loaded| loaded.metadata.stats.clone()));
	let years = Signal::derive(move || {
		graph_data
			.get()
			.map(|loaded| loaded.metadata.year_range)
			.unwrap_or(YearRange::new(0, 0))
	});

	let on_loaded = move |loaded: Arc<LoadedGraph>| {
		last_edit.set(None);
		details.set(None);
		graph_data.set(Some(loaded));
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{load_error.map(Err::<(), _>)}
			<div class="fullscreen-graph">
				<ForceGraphCanvas
					data=graph_data
					edit=last_edit
					on_select=move |d| details.set(d)
					settings=settings
					fullscreen=true
				/>
				<div class="graph-overlay">
					<h1>"Citation Graph Explorer"</h1>
					<p class="subtitle">
						"Scroll to zoom. Drag to pan. Click a paper for details. Keys + - 0 zoom."
					</p>
					<GraphLoader on_loaded=on_loaded settings=loader_settings />
					<NetworkStats stats=stats />
					<SearchPanel
						labels=labels
						authors=authors
						clusters=clusters
						years=years
						on_edit=move |e| last_edit.set(Some(e))
					/>
				</div>
				<PaperCard details=details on_close=move |_| details.set(None) />
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_graph_is_a_connected_tree() {
		let loaded = LoadedGraph::load(&generate_sample_data(30), &ExplorerSettings::default()).unwrap();
		assert_eq!(loaded.graph.node_count(), 30);
		assert_eq!(loaded.graph.edge_count(), 29);
		assert_eq!(loaded.metadata.stats.components, 1);
		assert!(loaded.metadata.year_range.min >= 1990);
		assert!(loaded.graph.has_positions());
		assert_eq!(loaded.metadata.clusters.len(), 10);
		assert!(loaded.graph.nodes().all(|(_, p)| p.color.as_deref().is_some_and(|c| c.starts_with("hsl("))));
	}
}
