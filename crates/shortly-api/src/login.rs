// Probe-based login
//
// The API has no dedicated "whoami" endpoint. A credential is verified by
// issuing a cheap, real list request (one item) with the candidate
// credential before it is stored. Only a 2xx answer persists it.

use reqwest::{Method, StatusCode};
use reqwest::header::AUTHORIZATION;
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::auth::StoredCredential;
use crate::client::ApiClient;
use crate::error::Error;
use crate::types::LinkQuery;

impl ApiClient {
    /// Check a candidate credential against the server without storing it.
    ///
    /// - 2xx: the credential is valid
    /// - 401: [`Error::InvalidCredential`]
    /// - 403: [`Error::AccountDisabled`]
    /// - anything else, including transport failure: [`Error::LoginFailed`]
    pub async fn verify_credential(&self, candidate: &StoredCredential) -> Result<(), Error> {
        let url = self.endpoint(&["links", ""])?;
        let probe = LinkQuery::new(1, 1);

        debug!(username = candidate.username(), "probing credential at {url}");

        let resp = self
            .json_request(Method::GET, url)
            .query(&probe.to_params())
            .header(AUTHORIZATION, candidate.authorization()?)
            .send()
            .await
            .map_err(|e| Error::LoginFailed {
                reason: e.to_string(),
            })?;

        match resp.status() {
            status if status.is_success() => {
                debug!("credential accepted");
                Ok(())
            }
            StatusCode::UNAUTHORIZED => Err(Error::InvalidCredential),
            StatusCode::FORBIDDEN => Err(Error::AccountDisabled),
            status => Err(Error::LoginFailed {
                reason: format!("unexpected HTTP {status}"),
            }),
        }
    }

    /// Verify `username`/`password` and, on success, persist the credential.
    ///
    /// Nothing is written to the credential store unless the probe succeeds.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<StoredCredential, Error> {
        let candidate = StoredCredential::from_password(username, password);
        self.verify_credential(&candidate).await?;
        self.credentials().set(&candidate)?;
        debug!(username, "credential stored");
        Ok(candidate)
    }

    /// Forget the stored credential. No network call is made.
    pub fn logout(&self) {
        if let Err(e) = self.credentials().clear() {
            warn!(error = %e, "failed to clear stored credential");
        }
    }

    /// Whether a credential is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.credentials().get().is_some()
    }

    /// Display name stored alongside the credential.
    pub fn username(&self) -> Option<String> {
        self.credentials().get().map(|c| c.username().to_owned())
    }
}
