use leptos::prelude::*;

use crate::graph::YearRange;
use crate::search::{SearchEdit, SearchField};

const LABEL_LIST_ID: &str = "paper-labels";
const AUTHOR_LIST_ID: &str = "paper-authors";

/// Cluster select value to filter; the empty value means every cluster.
fn cluster_choice(value: String) -> Option<String> {
	(!value.is_empty()).then_some(value)
}

fn placeholder(field: SearchField) -> &'static str {
	match field {
		SearchField::Label => "Search by title",
		SearchField::Author => "Authors, comma separated",
		SearchField::Abstract => "Search abstracts",
		SearchField::Journal => "Search by journal",
		SearchField::Keywords => "Keywords, comma separated",
	}
}

/// One text box per searchable field, the year bounds, a cluster picker and a
/// reset button.
///
/// Inputs are controlled so that "Clear filters" and a graph reload can put
/// them back to their empty state.
#[component]
pub fn SearchPanel(
	#[prop(into)] labels: Signal<Vec<String>>,
	#[prop(into)] authors: Signal<Vec<String>>,
	#[prop(into)] clusters: Signal<Vec<String>>,
	#[prop(into)] years: Signal<YearRange>,
	#[prop(into)] on_edit: Callback<SearchEdit>,
) -> impl IntoView {
	let queries: Vec<(SearchField, RwSignal<String>)> = SearchField::ALL
		.iter()
		.map(|&field| (field, RwSignal::new(String::new())))
		.collect();
	let year_min = RwSignal::new(years.get_untracked().min);
	let year_max = RwSignal::new(years.get_untracked().max);
	let cluster = RwSignal::new(String::new());

	let reset_inputs = {
		let queries = queries.clone();
		move || {
			for (_, q) in &queries {
				q.set(String::new());
			}
			cluster.set(String::new());
			let full = years.get_untracked();
			year_min.set(full.min);
			year_max.set(full.max);
		}
	};

	// a new graph starts from an empty search
	let reset_on_load = reset_inputs.clone();
	Effect::new(move |_| {
		years.track();
		reset_on_load();
	});

	let send_years = move || {
		let range = YearRange::new(year_min.get_untracked(), year_max.get_untracked());
		on_edit.run(SearchEdit::Years(range));
	};

	let text_inputs = queries
		.into_iter()
		.map(|(field, value)| {
			let list = match field {
				SearchField::Label => Some(LABEL_LIST_ID),
				SearchField::Author => Some(AUTHOR_LIST_ID),
				_ => None,
			};
			view! {
				<label class="search-field">
					<span>{field.name()}</span>
					<input
						type="text"
						list=list
						placeholder=placeholder(field)
						prop:value=move || value.get()
						on:input=move |ev| {
							let text = event_target_value(&ev);
							value.set(text.clone());
							on_edit.run(SearchEdit::Query(field, text));
						}
					/>
				</label>
			}
		})
		.collect_view();

	let on_clear = move |_| {
		reset_inputs();
		on_edit.run(SearchEdit::Clear);
	};

	view! {
		<div class="search-panel">
			{text_inputs}
			<datalist id=LABEL_LIST_ID>
				{move || {
					labels.get().into_iter().map(|label| view! { <option value=label /> }).collect_view()
				}}
			</datalist>
			<datalist id=AUTHOR_LIST_ID>
				{move || {
					authors.get().into_iter().map(|author| view! { <option value=author /> }).collect_view()
				}}
			</datalist>
			<label class="search-field">
				<span>"cluster"</span>
				<select
					prop:value=move || cluster.get()
					on:change=move |ev| {
						let value = event_target_value(&ev);
						cluster.set(value.clone());
						on_edit.run(SearchEdit::Cluster(cluster_choice(value)));
					}
				>
					<option value="">"All"</option>
					{move || {
						clusters
							.get()
							.into_iter()
							.map(|c| view! { <option value=c.clone()>{c.clone()}</option> })
							.collect_view()
					}}
				</select>
			</label>
			<div class="year-range">
				<span>"Years"</span>
				<input
					type="number"
					prop:value=move || year_min.get().to_string()
					on:change=move |ev| {
						if let Ok(y) = event_target_value(&ev).trim().parse() {
							year_min.set(y);
							send_years();
						}
					}
				/>
				<span>"to"</span>
				<input
					type="number"
					prop:value=move || year_max.get().to_string()
					on:change=move |ev| {
						if let Ok(y) = event_target_value(&ev).trim().parse() {
							year_max.set(y);
							send_years();
						}
					}
				/>
			</div>
			<button class="clear-filters" on:click=on_clear>"Clear filters"</button>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn all_option_lifts_the_cluster_filter() {
		assert_eq!(cluster_choice(String::new()), None);
		assert_eq!(cluster_choice("motor".into()), Some("motor".to_string()));
	}
}
