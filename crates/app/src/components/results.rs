use dioxus::prelude::*;

use crate::components::PagerBar;
use crate::view::{ResultCard, ResultsView};

#[derive(Props, Clone, PartialEq)]
pub struct ResultsPanelProps {
    pub view: ResultsView,
    #[props(default)]
    pub on_page: Option<EventHandler<u32>>,
}

/// Results area: a status line, or the result cards followed by the pager.
///
/// Backend text is only ever placed in text nodes.
#[component]
pub fn ResultsPanel(props: ResultsPanelProps) -> Element {
    let message = props.view.message().unwrap_or_default();
    let status_class = if props.view == ResultsView::Failed {
        "search-status search-status-error"
    } else {
        "search-status"
    };

    match props.view {
        ResultsView::Idle => rsx! {
            section { class: "search-results" }
        },
        ResultsView::Searching | ResultsView::Empty | ResultsView::Failed => rsx! {
            section { class: "search-results",
                p { class: "{status_class}", "{message}" }
            }
        },
        ResultsView::Results { cards, pager } => rsx! {
            section { class: "search-results",
                for card in cards {
                    ResultCardView { key: "{card.id}", card: card.clone() }
                }
            }
            if let Some(handler) = props.on_page {
                PagerBar { pager, on_page: handler }
            } else {
                PagerBar { pager }
            }
        },
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ResultCardViewProps {
    pub card: ResultCard,
}

/// One search hit.
#[component]
pub fn ResultCardView(props: ResultCardViewProps) -> Element {
    let card = props.card;
    let meta = card.meta_line();

    rsx! {
        article { class: "result-card",
            h3 { class: "result-title",
                a { href: "{card.href}", "{card.title}" }
            }
            p { class: "result-authors", "{card.authors}" }
            p { class: "result-meta", "{meta}" }
            p { class: "result-abstract", "{card.preview}" }
        }
    }
}
