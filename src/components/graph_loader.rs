use std::sync::Arc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{Event, FileReader, HtmlInputElement};

use crate::error::Result;
use crate::graph::{GraphDocument, LoadedGraph, check_upload_name};
use crate::settings::ExplorerSettings;
use crate::storage::{self, CachedGraph};

/// Parse and prepare an uploaded file, then cache it for the next visit.
pub fn load_upload(name: &str, text: &str, settings: &ExplorerSettings) -> Result<LoadedGraph> {
	check_upload_name(name)?;
	let doc = GraphDocument::from_json(text)?;
	let loaded = LoadedGraph::load(&doc, settings)?;
	info!("loaded {name}");
	Ok(loaded)
}

fn cache(loaded: &LoadedGraph) {
	if let Err(e) = storage::save(&CachedGraph::of(loaded)) {
		error!("could not cache graph: {e}");
	}
}

#[component]
pub fn GraphLoader(
	#[prop(into)] on_loaded: Callback<Arc<LoadedGraph>>,
	#[prop(optional)] settings: ExplorerSettings,
) -> impl IntoView {
	let message = RwSignal::new(None::<String>);

	let on_change = move |ev: Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		let name = file.name();
		if let Err(e) = check_upload_name(&name) {
			message.set(Some(e.to_string()));
			return;
		}
		let reader = match FileReader::new() {
			Ok(reader) => reader,
			Err(e) => {
				error!("FileReader unavailable: {e:?}");
				return;
			}
		};

		let reader_done = reader.clone();
		let settings = settings.clone();
		let onload = Closure::once_into_js(move |_: Event| {
			let text = reader_done.result().ok().and_then(|r| r.as_string()).unwrap_or_default();
			match load_upload(&name, &text, &settings) {
				Ok(loaded) => {
					cache(&loaded);
					message.set(None);
					on_loaded.run(Arc::new(loaded));
				}
				Err(e) => {
					error!("upload of {name} rejected: {e}");
					message.set(Some(e.to_string()));
				}
			}
		});
		reader.set_onload(Some(onload.unchecked_ref()));
		if let Err(e) = reader.read_as_text(&file) {
			error!("could not read {}: {e:?}", file.name());
		}
	};

	view! {
		<div class="graph-loader">
			<label>
				"Load graph (.json) "
				<input type="file" accept=".json,application/json" on:change=on_change />
			</label>
			{move || message.get().map(|m| view! { <p class="error">{m}</p> })}
		</div>
	}
}
