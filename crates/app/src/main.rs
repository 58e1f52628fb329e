use app::components::SearchPage;
use app::settings::SearchSettings;
use dioxus::prelude::*;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8787";

fn main() {
    dioxus::launch(App);
}

/// Origin of the edge functions, overridable with `PREPRINT_API_BASE`.
fn search_settings() -> SearchSettings {
    let base = std::env::var("PREPRINT_API_BASE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    SearchSettings::default().with_api_base(base)
}

/// The first CLI argument stands in for the location query, e.g.
/// `app "q=stroke&page=2"`.
fn initial_query() -> String {
    std::env::args()
        .nth(1)
        .map(|q| q.trim_start_matches('?').to_string())
        .unwrap_or_default()
}

#[component]
fn App() -> Element {
    let settings = use_hook(search_settings);
    let query = use_hook(initial_query);

    rsx! {
        main { class: "search-page",
            h1 { "Preprint search" }
            SearchPage { settings, initial_query: query }
        }
    }
}
