//! Artist network: a filterable graph of a community roster, linking people
//! to the places, fields and roles they share.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info, warn};

// Modules
mod components;
pub mod config;
mod pages;
pub mod roster;

// Top-Level pages
use crate::config::Theme;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

const THEME_JSON: &str = include_str!("../data/theme.json");

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

fn load_theme() -> Theme {
	Theme::from_json(THEME_JSON).unwrap_or_else(|err| {
		warn!("bad theme.json, using defaults: {err}");
		Theme::default()
	})
}

/// An app router which renders the artist network and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(load_theme());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Artists Mapping" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_theme_parses() {
		assert!(Theme::from_json(THEME_JSON).is_ok());
		assert_eq!(load_theme().person_color, Theme::default().person_color);
	}
}
