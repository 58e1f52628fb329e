//! Preprint search page: form state, the search controller and the Dioxus
//! components that render it.

pub mod channel_port;
pub mod client;
pub mod components;
pub mod controller;
pub mod debounce;
pub mod form;
pub mod format_helpers;
pub mod port;
pub mod settings;
pub mod view;
