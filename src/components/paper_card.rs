use leptos::prelude::*;

use super::force_graph::PaperDetails;

fn joined(items: &[String]) -> String {
	if items.is_empty() {
		"N/A".to_string()
	} else {
		items.join(", ")
	}
}

fn or_na(value: &str) -> String {
	if value.is_empty() {
		"N/A".to_string()
	} else {
		value.to_string()
	}
}

/// Detail card for the clicked paper; hidden while nothing is selected.
#[component]
pub fn PaperCard(
	#[prop(into)] details: Signal<Option<PaperDetails>>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	move || {
		details.get().map(|d| {
			let doi = (!d.doi.is_empty()).then(|| {
				let href = format!("https://doi.org/{}", d.doi);
				view! {
					<p>
						<strong>"DOI: "</strong>
						<a href=href target="_blank" rel="noopener noreferrer">{d.doi.clone()}</a>
					</p>
				}
			});
			view! {
				<aside class="paper-card">
					<button class="close" on:click=move |_| on_close.run(())>"×"</button>
					<h2>{d.title.clone()}</h2>
					<p><strong>"Authors: "</strong>{joined(&d.authors)}</p>
					<p><strong>"Year: "</strong>{d.year.clone()}</p>
					<p><strong>"Journal: "</strong>{or_na(&d.journal)}</p>
					<p><strong>"Citations: "</strong>{d.citation_count}</p>
					<p><strong>"Keywords: "</strong>{joined(&d.keywords)}</p>
					{doi}
					<p class="abstract">{or_na(&d.abstract_text)}</p>
				</aside>
			}
		})
	}
}
