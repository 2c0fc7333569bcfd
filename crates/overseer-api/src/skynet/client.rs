// skynet HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction, status checking,
// and JSON decoding. Endpoint methods live in `lists.rs` and
// `operations.rs` as inherent impls to keep this module about transport.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for the skynet print-farm service.
///
/// Every path is resolved relative to the configured endpoint
/// (e.g. `http://farm.local/skynet/`). Cheap to clone: the inner
/// `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct SkynetClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SkynetClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// A missing trailing slash on `base_url` is added so relative endpoint
    /// paths resolve beneath it rather than replacing its last segment.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    /// The service endpoint all paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve an endpoint path against the base URL.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// Resolve a list endpoint, forcing the JSON renderer with `?format=json`.
    pub(crate) fn list_url(&self, path: &str) -> Result<Url, Error> {
        let mut url = self.endpoint_url(path)?;
        url.query_pairs_mut().append_pair("format", "json");
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a list endpoint and decode the JSON array body.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let url = self.list_url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let resp = check_status(resp, path).await?;
        let body = resp.text().await?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    /// Send a request to an operation endpoint, ignoring the response body.
    ///
    /// The JSON body is attached only when given.
    pub(crate) async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<(), Error> {
        let url = self.endpoint_url(path)?;
        debug!("{} {}", method, url);

        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;
        check_status(resp, path).await?;
        Ok(())
    }
}

/// Turn any non-2xx response into `Error::Status`.
async fn check_status(resp: reqwest::Response, path: &str) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    trace!(%status, path, "response received");

    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(Error::Status {
        status: status.as_u16(),
        path: path.to_owned(),
        body: preview(&body),
    })
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
