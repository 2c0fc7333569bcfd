// skynet operation endpoints
//
// Operator actions live under `operations/<name>/<id>/`. Some are PUTs with
// a JSON body, others are GET triggers; only the status code carries the
// outcome. Which action uses which method, path, and body is decided by
// the caller's command table.

use std::fmt;

use tracing::debug;

use crate::error::Error;
use crate::skynet::client::SkynetClient;

/// HTTP method of an operation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Put => "PUT",
        })
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

impl SkynetClient {
    /// Invoke an operation endpoint.
    ///
    /// `path` is relative to the base URL, e.g.
    /// `operations/cancel_active_task/3/`. Succeeds on any 2xx status.
    pub async fn operation(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<(), Error> {
        debug!(%method, path, "invoking operation");
        self.send(method.into(), path, body).await
    }
}
