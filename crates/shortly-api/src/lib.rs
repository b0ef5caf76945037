// shortly-api: async client for the shortly link-shortening REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

mod links;
mod login;
mod stats;
mod users;

pub use auth::{CredentialStore, MemoryCredentialStore, StoredCredential};
pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{
    LinkListResponse, LinkQuery, LinkResponse, SortBy, StatsListResponse, StatsResponse,
    UserResponse,
};
