use std::sync::Arc;

use dioxus::prelude::*;

use crate::channel_port::{ChannelPort, PortEvent};
use crate::client::HttpSearchClient;
use crate::components::ResultsPanel;
use crate::controller::SearchController;
use crate::form::{Field, FormState};
use crate::settings::SearchSettings;
use crate::view::ResultsView;

/// Subject filter options. The first entry clears the filter.
pub const SUBJECT_OPTIONS: &[(&str, &str)] = &[
    ("", "All subjects"),
    ("cardiology", "Cardiology"),
    ("heart-failure", "Heart Failure"),
    ("electrophysiology", "Electrophysiology"),
    ("interventional-cardiology", "Interventional Cardiology"),
    ("imaging", "Cardiovascular Imaging"),
    ("prevention", "Prevention & Epidemiology"),
    ("vascular-medicine", "Vascular Medicine"),
    ("pediatric-cardiology", "Pediatric Cardiology"),
];

type PageController = SearchController<HttpSearchClient, ChannelPort>;

#[derive(Props, Clone, PartialEq)]
pub struct SearchPageProps {
    pub settings: SearchSettings,
    /// Query string the page was opened with, e.g. `q=stroke&page=2`.
    #[props(default)]
    pub initial_query: String,
}

/// Mirror an edit into the form signal and hand it to the controller.
fn edit(ctrl: &Arc<PageController>, mut form: Signal<FormState>, field: Field, value: String) {
    form.write().set(field, value.clone());
    let ctrl = Arc::clone(ctrl);
    spawn(async move {
        ctrl.on_field_change(field, value).await;
    });
}

/// Search form, results area and pager.
#[component]
pub fn SearchPage(props: SearchPageProps) -> Element {
    let mut form = use_signal(FormState::default);
    let mut view = use_signal(|| ResultsView::Idle);
    let mut location = use_signal(|| props.initial_query.clone());

    let ctrl = use_hook(|| {
        let (port, mut events) = ChannelPort::new(props.initial_query.clone());
        let client = HttpSearchClient::new(&props.settings);
        let ctrl = SearchController::new(client, port, props.settings.clone());

        spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    PortEvent::Show(next) => view.set(next),
                    PortEvent::Prefill(values) => form.set(values),
                    PortEvent::ReplaceLocation(query) => location.set(query),
                }
            }
        });

        let init = Arc::clone(&ctrl);
        spawn(async move {
            init.initialize().await;
        });

        ctrl
    });

    let values = form.read().clone();
    let ctrl_submit = Arc::clone(&ctrl);
    let ctrl_keyword = Arc::clone(&ctrl);
    let ctrl_author = Arc::clone(&ctrl);
    let ctrl_subject = Arc::clone(&ctrl);
    let ctrl_from = Arc::clone(&ctrl);
    let ctrl_to = Arc::clone(&ctrl);
    let ctrl_page = Arc::clone(&ctrl);

    rsx! {
        form {
            class: "search-form",
            onsubmit: move |e: FormEvent| {
                e.prevent_default();
                let ctrl = Arc::clone(&ctrl_submit);
                spawn(async move {
                    ctrl.submit().await;
                });
            },
            input {
                class: "search-input",
                r#type: "search",
                name: "q",
                placeholder: "Search preprints...",
                value: "{values.keyword}",
                oninput: move |e: FormEvent| edit(&ctrl_keyword, form, Field::Keyword, e.value()),
            }
            input {
                class: "search-input",
                r#type: "text",
                name: "author",
                placeholder: "Author",
                value: "{values.author}",
                oninput: move |e: FormEvent| edit(&ctrl_author, form, Field::Author, e.value()),
            }
            select {
                class: "search-select",
                name: "subject",
                value: "{values.subject}",
                onchange: move |e: FormEvent| edit(&ctrl_subject, form, Field::Subject, e.value()),
                for (value, label) in SUBJECT_OPTIONS.iter() {
                    option {
                        value: *value,
                        selected: *value == values.subject.as_str(),
                        "{label}"
                    }
                }
            }
            input {
                class: "search-date",
                r#type: "date",
                name: "from",
                value: "{values.date_from}",
                onchange: move |e: FormEvent| edit(&ctrl_from, form, Field::DateFrom, e.value()),
            }
            input {
                class: "search-date",
                r#type: "date",
                name: "to",
                value: "{values.date_to}",
                onchange: move |e: FormEvent| edit(&ctrl_to, form, Field::DateTo, e.value()),
            }
            button { class: "search-submit", r#type: "submit", "Search" }
        }

        p { class: "search-location", "?{location}" }

        ResultsPanel {
            view: view.read().clone(),
            on_page: move |page: u32| {
                let ctrl = Arc::clone(&ctrl_page);
                spawn(async move {
                    ctrl.go_to_page(page).await;
                });
            },
        }
    }
}
