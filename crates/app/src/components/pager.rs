use dioxus::prelude::*;

use crate::view::PagerView;

#[derive(Props, Clone, PartialEq)]
pub struct PagerBarProps {
    pub pager: PagerView,
    /// Called with the target page when `Prev` or `Next` is clicked.
    #[props(default)]
    pub on_page: Option<EventHandler<u32>>,
}

/// `Prev`, `Page X / Y`, `Next`. A button with no target is disabled.
#[component]
pub fn PagerBar(props: PagerBarProps) -> Element {
    let prev = props.pager.prev();
    let next = props.pager.next();
    let label = props.pager.label();
    let on_prev = props.on_page.clone();
    let on_next = props.on_page;

    rsx! {
        nav { class: "pager",
            button {
                class: if prev.is_some() { "pager-btn" } else { "pager-btn pager-btn-disabled" },
                disabled: prev.is_none(),
                onclick: move |_| {
                    if let (Some(page), Some(handler)) = (prev, &on_prev) {
                        handler.call(page);
                    }
                },
                "Prev"
            }
            span { class: "pager-info", " {label} " }
            button {
                class: if next.is_some() { "pager-btn" } else { "pager-btn pager-btn-disabled" },
                disabled: next.is_none(),
                onclick: move |_| {
                    if let (Some(page), Some(handler)) = (next, &on_next) {
                        handler.call(page);
                    }
                },
                "Next"
            }
        }
    }
}
