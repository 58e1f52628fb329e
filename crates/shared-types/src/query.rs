use std::borrow::Cow;

/// Results per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size any caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query-string keys, in the order they are serialized.
pub mod keys {
    pub const KEYWORD: &str = "q";
    pub const SUBJECT: &str = "subject";
    pub const AUTHOR: &str = "author";
    pub const FROM: &str = "from";
    pub const TO: &str = "to";
    pub const PAGE: &str = "page";
    pub const PAGE_SIZE: &str = "pageSize";
}

/// Canonical search intent, shared by the search page and the search proxy.
///
/// Built fresh for every search action and never mutated once it has been
/// serialized into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Full-text keywords. Empty means no full-text filter.
    pub keyword: String,
    pub subject: Option<String>,
    pub author: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`. Passed through unvalidated.
    pub date_from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`. Passed through unvalidated.
    pub date_to: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            subject: None,
            author: None,
            date_from: None,
            date_to: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`, treating zero as
/// "use the default".
pub fn normalize_page_size(page_size: u32) -> u32 {
    if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size.min(MAX_PAGE_SIZE)
    }
}

/// Number of pages needed to show `total` results, never less than one.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let size = u64::from(normalize_page_size(page_size));
    let pages = total.div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn trimmed(value: Option<String>) -> Option<String> {
    non_empty(value.map(|v| v.trim().to_string()))
}

impl SearchQuery {
    /// Apply the invariants every serialized query must satisfy: trimmed
    /// free text, no empty filters, `page >= 1`, bounded page size.
    pub fn normalized(self) -> Self {
        Self {
            keyword: self.keyword.trim().to_string(),
            subject: non_empty(self.subject),
            author: trimmed(self.author),
            date_from: non_empty(self.date_from),
            date_to: non_empty(self.date_to),
            page: self.page.max(1),
            page_size: normalize_page_size(self.page_size),
        }
    }

    /// Serialize as `q=..&subject=..&author=..&from=..&to=..&page=..&pageSize=..`,
    /// omitting empty filters.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, Cow<'_, str>)> = Vec::with_capacity(7);
        if !self.keyword.is_empty() {
            pairs.push((keys::KEYWORD, urlencoding::encode(&self.keyword)));
        }
        let optional = [
            (keys::SUBJECT, &self.subject),
            (keys::AUTHOR, &self.author),
            (keys::FROM, &self.date_from),
            (keys::TO, &self.date_to),
        ];
        for (key, value) in optional {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, urlencoding::encode(v)));
            }
        }
        pairs.push((keys::PAGE, Cow::Owned(self.page.to_string())));
        pairs.push((keys::PAGE_SIZE, Cow::Owned(self.page_size.to_string())));

        pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Rebuild a query from a location's query string (leading `?` allowed).
    ///
    /// Unknown keys are ignored; a missing or non-numeric `page`/`pageSize`
    /// falls back to the default.
    pub fn from_query_string(raw: &str) -> Self {
        let mut query = SearchQuery::default();
        for (key, value) in parse_query_pairs(raw) {
            match key.as_str() {
                keys::KEYWORD => query.keyword = value,
                keys::SUBJECT => query.subject = Some(value),
                keys::AUTHOR => query.author = Some(value),
                keys::FROM => query.date_from = Some(value),
                keys::TO => query.date_to = Some(value),
                keys::PAGE => query.page = value.trim().parse().unwrap_or(1),
                keys::PAGE_SIZE => {
                    query.page_size = value.trim().parse().unwrap_or(DEFAULT_PAGE_SIZE)
                }
                _ => {}
            }
        }
        query.normalized()
    }
}

/// Split a form-encoded query string into decoded `(key, value)` pairs.
///
/// `+` decodes to a space. Pairs whose encoding is not valid UTF-8 keep their
/// raw text.
pub fn parse_query_pairs(raw: &str) -> Vec<(String, String)> {
    raw.trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
