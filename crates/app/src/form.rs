use shared_types::SearchQuery;

/// Raw values of the five search controls, exactly as the user left them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub keyword: String,
    pub subject: String,
    pub author: String,
    pub date_from: String,
    pub date_to: String,
}

/// One search control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Keyword,
    Subject,
    Author,
    DateFrom,
    DateTo,
}

impl Field {
    /// Free-text fields are debounced; the others search on change.
    pub fn is_free_text(self) -> bool {
        matches!(self, Field::Keyword | Field::Author)
    }
}

fn filled(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl FormState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Keyword => &self.keyword,
            Field::Subject => &self.subject,
            Field::Author => &self.author,
            Field::DateFrom => &self.date_from,
            Field::DateTo => &self.date_to,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Keyword => self.keyword = value,
            Field::Subject => self.subject = value,
            Field::Author => self.author = value,
            Field::DateFrom => self.date_from = value,
            Field::DateTo => self.date_to = value,
        }
    }

    /// Prefill values for a query decoded from the location.
    pub fn from_query(query: &SearchQuery) -> Self {
        Self {
            keyword: query.keyword.clone(),
            subject: query.subject.clone().unwrap_or_default(),
            author: query.author.clone().unwrap_or_default(),
            date_from: query.date_from.clone().unwrap_or_default(),
            date_to: query.date_to.clone().unwrap_or_default(),
        }
    }
}

/// Build the query for one search action. Free text is trimmed, blank
/// fields are dropped and paging is normalized.
pub fn build_query(form: &FormState, page: u32, page_size: u32) -> SearchQuery {
    SearchQuery {
        keyword: form.keyword.trim().to_string(),
        subject: filled(&form.subject),
        author: filled(form.author.trim()),
        date_from: filled(&form.date_from),
        date_to: filled(&form.date_to),
        page,
        page_size,
    }
    .normalized()
}
