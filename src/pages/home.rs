use std::sync::Arc;

use leptos::prelude::*;
use log::error;

use crate::components::force_graph::ForceGraphCanvas;
use crate::components::sidebar::Sidebar;
use crate::config::Theme;
use crate::roster::{CsvSource, FacetIndex, FilterState, Roster, build_graph};

const ROSTER_CSV: &str = include_str!("../../data/artists.csv");

/// Loads the bundled roster. A broken file leaves the page usable with an
/// empty roster and the error message.
fn load_roster() -> (Roster, Option<String>) {
	match Roster::load(&CsvSource::new(ROSTER_CSV)) {
		Ok(roster) => (roster, None),
		Err(err) => {
			error!("roster failed to load: {err}");
			(Roster::default(), Some(err.to_string()))
		}
	}
}

/// Artist network page: filters on the left, graph on the right.
#[component]
pub fn Home() -> impl IntoView {
	let theme = use_context::<Theme>().unwrap_or_default();
	let (roster, load_error) = load_roster();
	let roster = Arc::new(roster);
	let facets = FacetIndex::build(roster.records());

	let filter = RwSignal::new(FilterState::new());
	let selected = RwSignal::new(None::<String>);

	let records = roster.clone();
	let graph = Memo::new(move |_| filter.with(|f| build_graph(records.records(), f)));
	let matches = Signal::derive(move || graph.with(|g| g.person_count()));

	let cards = roster.hover_cards();
	let default_photo = theme.default_photo.clone();
	let page_style = format!(
		"background-color: {}; color: {}; --accent: {};",
		theme.page_background, theme.page_text, theme.accent
	);

	view! {
		<div class="artist-network" style=page_style>
			<Sidebar
				roster=roster
				facets=facets
				filter=filter
				selected=selected
				matches=matches
				default_photo=default_photo
			/>
			<main class="graph-pane">
				{load_error.map(|err| view! { <p class="load-error">"Could not load the roster: " {err}</p> })}
				<Show when=move || matches.get() == 0>
					<p class="graph-empty">"No artists match the current filters."</p>
				</Show>
				<ForceGraphCanvas data=graph theme=theme selected=selected cards=cards />
			</main>
		</div>
	}
}
