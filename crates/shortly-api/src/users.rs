// Account registration.

use secrecy::{ExposeSecret, SecretString};

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{RegisterRequest, UserResponse};

impl ApiClient {
    /// `POST /users` -- create an account. Sent without a stored credential.
    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<UserResponse, Error> {
        let url = self.endpoint(&["users"])?;
        let body = RegisterRequest {
            username,
            password: password.expose_secret(),
        };
        self.post_anonymous(url, &body).await
    }
}
