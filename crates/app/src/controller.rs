use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use shared_types::{SearchQuery, SearchResponse};

use crate::debounce::Debouncer;
use crate::form::{build_query, Field, FormState};
use crate::port::{SearchClient, SearchPort};
use crate::settings::SearchSettings;
use crate::view::{results_view, ResultsView};

/// Drives the search page: owns the form values, the current page and the
/// debounce slot, and pushes every state change through the port.
pub struct SearchController<C, P> {
    client: C,
    port: P,
    settings: SearchSettings,
    form: Mutex<FormState>,
    page: AtomicU32,
    /// Bumped by every search; only the newest generation may render.
    generation: AtomicU64,
    debouncer: Debouncer,
}

impl<C, P> SearchController<C, P>
where
    C: SearchClient + 'static,
    P: SearchPort + 'static,
{
    pub fn new(client: C, port: P, settings: SearchSettings) -> Arc<Self> {
        let debouncer = Debouncer::new(settings.debounce);
        Arc::new(Self {
            client,
            port,
            settings,
            form: Mutex::new(FormState::default()),
            page: AtomicU32::new(1),
            generation: AtomicU64::new(0),
            debouncer,
        })
    }

    pub fn form(&self) -> FormState {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_page(&self) -> u32 {
        self.page.load(Ordering::SeqCst)
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Run one search for `page` with the current form values.
    ///
    /// The location and the "searching" view are updated before the request
    /// goes out. Returns the response only if it was rendered.
    pub async fn perform_search(&self, page: u32) -> Option<SearchResponse> {
        let page = page.max(1);
        self.page.store(page, Ordering::SeqCst);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = build_query(&self.form(), page, self.settings.page_size);
        self.port.replace_location_query(&query.to_query_string());
        self.port.show(ResultsView::Searching);

        let outcome = self.client.search(&query).await;

        if !self.is_current(generation) {
            tracing::debug!(generation, "dropping stale search response");
            return None;
        }

        match outcome {
            Ok(response) => {
                tracing::debug!(
                    page,
                    total = response.total,
                    shown = response.results.len(),
                    "search completed"
                );
                self.port
                    .show(results_view(&response, page, &self.settings));
                Some(response)
            }
            Err(e) => {
                tracing::error!(error = %e, page, "search failed");
                self.port.show(ResultsView::Failed);
                None
            }
        }
    }

    /// Prefill the form from the location and run the initial search on the
    /// page it names.
    pub async fn initialize(&self) -> Option<SearchResponse> {
        let query = SearchQuery::from_query_string(&self.port.location_query());
        let form = FormState::from_query(&query);
        *self.form.lock().unwrap_or_else(PoisonError::into_inner) = form.clone();
        self.port.prefill(&form);
        self.perform_search(query.page).await
    }

    /// Record a control edit. Free-text edits search page 1 after the quiet
    /// period; other fields search page 1 right away and cancel any pending
    /// debounced search.
    pub async fn on_field_change(self: &Arc<Self>, field: Field, value: impl Into<String>) {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set(field, value);

        if field.is_free_text() {
            let this = Arc::clone(self);
            self.debouncer.schedule(async move {
                this.perform_search(1).await;
            });
        } else {
            self.debouncer.cancel();
            self.perform_search(1).await;
        }
    }

    /// Explicit form submission.
    pub async fn submit(&self) -> Option<SearchResponse> {
        self.debouncer.cancel();
        self.perform_search(1).await
    }

    /// Pager click.
    pub async fn go_to_page(&self, page: u32) -> Option<SearchResponse> {
        self.perform_search(page).await
    }
}
