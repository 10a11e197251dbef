//! Existence check against a search endpoint
//!
//! A probe answers one question per index name: does `HEAD {base}/{name}`
//! come back 200, 404 or something else. Failures never propagate; they
//! become [`IndexStatus::Unknown`].

use super::error::Result;
use super::types::IndexStatus;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Source of existence answers
pub trait IndexProbe {
    fn probe(&self, name: &str) -> IndexStatus;
}

impl<P: IndexProbe + ?Sized> IndexProbe for Box<P> {
    fn probe(&self, name: &str) -> IndexStatus {
        (**self).probe(name)
    }
}

impl<P: IndexProbe + ?Sized> IndexProbe for &P {
    fn probe(&self, name: &str) -> IndexStatus {
        (**self).probe(name)
    }
}

/// HEAD-request probe
pub struct HttpIndexProbe {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpIndexProbe {
    /// Create a probe for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: normalize_base_url(base_url),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

impl IndexProbe for HttpIndexProbe {
    fn probe(&self, name: &str) -> IndexStatus {
        let url = self.url_for(name);
        match self.client.head(&url).send() {
            Ok(response) => {
                let status = IndexStatus::from_http_status(response.status().as_u16());
                debug!(%url, code = response.status().as_u16(), %status, "existence check");
                status
            }
            Err(err) => {
                warn!("Existence check failed for {}: {}", url, err);
                IndexStatus::Unknown
            }
        }
    }
}

/// Trim trailing slashes so `{base}/{name}` never doubles them.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Memoizing wrapper: each distinct name reaches the inner probe once.
pub struct CachedProbe<P> {
    inner: P,
    seen: HashMap<String, IndexStatus>,
    lookups: usize,
}

impl<P: IndexProbe> CachedProbe<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            seen: HashMap::new(),
            lookups: 0,
        }
    }

    /// Cached answer for `name`, probing upstream on first sight.
    pub fn check(&mut self, name: &str) -> IndexStatus {
        if let Some(status) = self.seen.get(name) {
            return *status;
        }
        let status = self.inner.probe(name);
        self.lookups += 1;
        self.seen.insert(name.to_string(), status);
        status
    }

    /// Number of upstream probes performed.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}
