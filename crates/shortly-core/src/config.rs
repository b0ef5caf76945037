// ── Runtime service configuration ──
//
// Describes *where* the shortly API lives and how to talk to it.
// Never touches disk: the CLI (via shortly-config) builds a `ServiceConfig`
// and hands it to `Shortly`.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use shortly_api::transport::{TlsMode, TransportConfig};

use crate::model::TopN;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Links per page for the list controller.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs on a dev server).
    DangerAcceptInvalid,
}

/// Configuration for one shortly deployment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// API base URL, including the `/api` prefix.
    pub api_url: Url,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Fixed page size for `LinkList`.
    pub page_size: u32,
    /// Initial window for `TopStats`.
    pub stats_top: TopN,
}

impl ServiceConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
            stats_top: TopN::default(),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
