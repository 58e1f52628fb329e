use std::fmt;
use std::net::SocketAddr;

use shared_types::{normalize_page_size, DEFAULT_PAGE_SIZE};

/// Default lifetime of a signed PDF URL.
const DEFAULT_SIGN_EXPIRY_SECS: u64 = 3600;

/// Storage bucket holding the preprint PDFs.
const DEFAULT_PDF_BUCKET: &str = "preprints";

const DEFAULT_BIND: &str = "127.0.0.1:8787";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration for the edge functions.
#[derive(Clone)]
pub struct EdgeConfig {
    /// Backend base URL, e.g. `https://xyzcompany.supabase.co` (no trailing slash).
    pub backend_url: String,
    /// Service-role credential. Used server-side only, never echoed back.
    pub service_role: String,
    /// Page size used when a search request carries no `pageSize`.
    pub default_page_size: u32,
    pub sign_expiry_secs: u64,
    pub pdf_bucket: String,
    pub bind_addr: SocketAddr,
}

impl fmt::Debug for EdgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeConfig")
            .field("backend_url", &self.backend_url)
            .field("service_role", &"<redacted>")
            .field("default_page_size", &self.default_page_size)
            .field("sign_expiry_secs", &self.sign_expiry_secs)
            .field("pdf_bucket", &self.pdf_bucket)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl EdgeConfig {
    /// Load configuration from the process environment (after reading `.env`
    /// if one is present).
    ///
    ///   - `SUPABASE_URL`: backend base URL (required)
    ///   - `SUPABASE_SERVICE_ROLE`: service-role key (required)
    ///   - `DEFAULT_PAGE_SIZE`: fallback page size (default 20, max 100)
    ///   - `SIGN_EXPIRY_SECONDS`: signed PDF URL lifetime (default 3600)
    ///   - `PDF_BUCKET`: storage bucket (default `preprints`)
    ///   - `EDGE_BIND`: listen address (default `127.0.0.1:8787`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend_url = get("SUPABASE_URL")
            .ok_or(ConfigError::Missing("SUPABASE_URL"))?
            .trim()
            .trim_end_matches('/')
            .to_string();
        let service_role =
            get("SUPABASE_SERVICE_ROLE").ok_or(ConfigError::Missing("SUPABASE_SERVICE_ROLE"))?;

        let default_page_size = match get("DEFAULT_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .map(normalize_page_size)
                .ok_or(ConfigError::Invalid {
                    key: "DEFAULT_PAGE_SIZE",
                    value: raw,
                })?,
            None => DEFAULT_PAGE_SIZE,
        };

        let sign_expiry_secs = match get("SIGN_EXPIRY_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    key: "SIGN_EXPIRY_SECONDS",
                    value: raw,
                })?,
            None => DEFAULT_SIGN_EXPIRY_SECS,
        };

        let pdf_bucket = get("PDF_BUCKET").unwrap_or_else(|| DEFAULT_PDF_BUCKET.to_string());

        let bind_raw = get("EDGE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key: "EDGE_BIND",
            value: bind_raw.clone(),
        })?;

        Ok(Self {
            backend_url,
            service_role,
            default_page_size,
            sign_expiry_secs,
            pdf_bucket,
            bind_addr,
        })
    }
}
