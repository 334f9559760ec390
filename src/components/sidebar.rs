//! Filter controls, artist chooser and the artist detail card.

use std::sync::Arc;

use leptos::prelude::*;

use crate::roster::{ArtistDetail, Facet, FacetIndex, FilterState, NodeKey, NodeKind, Roster};

/// Checkbox list for one facet.
#[component]
pub fn FacetPicker(facet: Facet, options: Vec<String>, filter: RwSignal<FilterState>) -> impl IntoView {
	let empty = options.is_empty();
	view! {
		<fieldset class="facet">
			<legend>{facet.title()}</legend>
			<Show when=move || empty>
				<p class="facet-empty">"Nothing to filter"</p>
			</Show>
			{options
				.into_iter()
				.map(|value| {
					let (checked, toggled) = (value.clone(), value.clone());
					view! {
						<label class="facet-option">
							<input
								type="checkbox"
								prop:checked=move || filter.with(|f| f.is_selected(facet, &checked))
								on:change=move |_| filter.update(|f| f.toggle(facet, &toggled))
							/>
							{value}
						</label>
					}
				})
				.collect_view()}
		</fieldset>
	}
}

/// Drop-down of artist names; choosing one selects its person node.
#[component]
pub fn ArtistChooser(names: Vec<String>, selected: RwSignal<Option<String>>) -> impl IntoView {
	let current = move || {
		selected
			.get()
			.and_then(|id| NodeKey::parse(&id))
			.filter(|key| key.kind == NodeKind::Person)
			.map(|key| key.label)
			.unwrap_or_default()
	};
	let on_change = move |ev: leptos::ev::Event| {
		let name = event_target_value(&ev);
		let id = (!name.is_empty()).then(|| NodeKey::new(NodeKind::Person, &name).id());
		selected.set(id);
	};

	view! {
		<label class="artist-chooser">
			"Choose artist"
			<select on:change=on_change prop:value=current>
				<option value="">""</option>
				{names
					.into_iter()
					.map(|name| {
						let value = name.clone();
						view! { <option value=value>{name}</option> }
					})
					.collect_view()}
			</select>
		</label>
	}
}

/// Details for the selected node, or a neutral note when it is not an artist.
#[component]
pub fn ArtistCard(
	roster: Arc<Roster>,
	selected: RwSignal<Option<String>>,
	default_photo: String,
) -> impl IntoView {
	move || {
		let Some(id) = selected.get() else {
			return view! { <p class="artist-card-empty">"Pick an artist or click a name in the graph."</p> }
				.into_any();
		};
		let Ok(record) = roster.lookup_node(&id) else {
			return view! { <p class="artist-card-empty">"No info available"</p> }.into_any();
		};
		let ArtistDetail {
			name,
			photo,
			location,
			fields,
			roles,
			telegram,
			email,
		} = ArtistDetail::new(record, &default_photo);
		let tags = fields.iter().chain(&roles).cloned().collect::<Vec<_>>().join(" · ");
		let location = (!location.is_empty()).then(|| view! { <p>{location}</p> });

		view! {
			<div class="artist-card">
				<h4>{name.clone()}</h4>
				<img src=photo alt=name width="200" />
				{location}
				<p class="artist-tags">{tags}</p>
				{telegram.map(|t| view! { <p><b>"Telegram: "</b>{t}</p> })}
				{email.map(|e| view! { <p><b>"Email: "</b>{e}</p> })}
			</div>
		}
		.into_any()
	}
}

/// The whole filter column.
#[component]
pub fn Sidebar(
	roster: Arc<Roster>,
	facets: FacetIndex,
	filter: RwSignal<FilterState>,
	selected: RwSignal<Option<String>>,
	#[prop(into)] matches: Signal<usize>,
	default_photo: String,
) -> impl IntoView {
	let names = roster.artist_names().into_iter().map(str::to_string).collect::<Vec<_>>();
	let rejected = roster.rejected();

	view! {
		<aside class="sidebar">
			<h2>"Filters"</h2>
			{Facet::ALL
				.into_iter()
				.map(|facet| {
					view! {
						<FacetPicker
							facet=facet
							options=facets.values(facet).to_vec()
							filter=filter
						/>
					}
				})
				.collect_view()}
			<button class="clear-filters" on:click=move |_| filter.update(FilterState::clear)>
				"Clear filters"
			</button>
			<p class="match-count">{move || format!("{} artists match", matches.get())}</p>
			<Show when=move || rejected != 0>
				<p class="rejected">{format!("{rejected} rows without a name were skipped")}</p>
			</Show>
			<hr />
			<ArtistChooser names=names selected=selected />
			<ArtistCard roster=roster selected=selected default_photo=default_photo />
		</aside>
	}
}
