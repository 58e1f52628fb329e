use serde::{Deserialize, Deserializer, Serialize};

/// `null` reads as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One preprint row as returned by the `search_preprints` RPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "postedAt")]
    pub posted_at: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
}

/// A page of search results plus the total hit count across all pages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "WireSearchResponse")]
pub struct SearchResponse {
    pub total: u64,
    pub results: Vec<SearchResult>,
}

/// The RPC may answer with `{ total, results }` or with a bare row array.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireSearchResponse {
    Paged {
        #[serde(default)]
        total: Option<u64>,
        #[serde(default)]
        results: Vec<SearchResult>,
    },
    Rows(Vec<SearchResult>),
}

impl From<WireSearchResponse> for SearchResponse {
    fn from(wire: WireSearchResponse) -> Self {
        match wire {
            WireSearchResponse::Paged { total, results } => Self {
                total: total.unwrap_or(results.len() as u64),
                results,
            },
            WireSearchResponse::Rows(results) => Self {
                total: results.len() as u64,
                results,
            },
        }
    }
}

/// Success body of `GET /api/search`: the RPC result plus the effective
/// paging that was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEnvelope<T> {
    pub data: T,
    pub page: u32,
    pub page_size: u32,
}
