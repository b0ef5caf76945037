// shortly REST API HTTP client
//
// Wraps `reqwest::Client` with base-URL handling, per-request Basic auth
// from the credential store, and normalization of non-2xx responses into
// `Error::Http`. Endpoint groups (links, stats, users, login) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::CredentialStore;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::ErrorResponse;

/// Detail used when a non-2xx body carries no readable `detail`.
pub const GENERIC_ERROR_DETAIL: &str = "An error occurred";

/// Characters of an undecodable body kept in the error message.
const PREVIEW_CHARS: usize = 200;

/// The single network-access chokepoint for the shortly API.
///
/// Every call attaches `Authorization: Basic <credential>` if, and only if,
/// the credential store currently holds a credential. Callers never see raw
/// HTTP responses: bodies are deserialized on 2xx and turned into
/// [`Error::Http`] otherwise.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for the API rooted at `base_url` (e.g.
    /// `https://sho.rt/api`), reading credentials from `credentials`.
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialStore>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, credentials)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Parse the base URL and make sure its path ends with `/` so
    /// endpoint segments append below it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The API base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The credential store shared with the session.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments below the base URL. Segments are
    /// percent-encoded; a trailing `""` segment yields a trailing slash.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Start a request with `Content-Type: application/json` already set.
    /// The `Authorization` header is attached later, per request, because
    /// the stored credential can change over the client's lifetime.
    pub(crate) fn json_request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");
        self.execute(self.json_request(Method::GET, url).query(params))
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");
        self.execute(self.json_request(Method::POST, url).json(body))
            .await
    }

    pub(crate) async fn patch<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("PATCH {url}");
        self.execute(self.json_request(Method::PATCH, url)).await
    }

    /// POST without the stored credential (registration).
    pub(crate) async fn post_anonymous<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url} (anonymous)");
        let resp = self
            .json_request(Method::POST, url)
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Attach the stored credential (if any), send, and normalize the response.
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let builder = match self.credentials.get() {
            Some(credential) => builder.header(AUTHORIZATION, credential.authorization()?),
            None => {
                trace!("no stored credential, sending without Authorization");
                builder
            }
        };

        let resp = builder.send().await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = body_preview(&body);
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: body.clone(),
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message())
            .unwrap_or_else(|| GENERIC_ERROR_DETAIL.to_owned());

        debug!(status = status.as_u16(), %detail, "request failed");
        Error::Http {
            status: status.as_u16(),
            detail,
        }
    }
}

/// First 200 characters of a body, cut on a char boundary.
fn body_preview(body: &str) -> &str {
    body.char_indices().nth(PREVIEW_CHARS).map_or(body, |(i, _)| &body[..i])
}
