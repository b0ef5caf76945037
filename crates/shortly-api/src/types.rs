// Wire types for the shortly REST API.
//
// Field names mirror the JSON the server sends. Timestamps stay as raw
// strings here; `shortly-core` parses them into `chrono` types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ── Links ───────────────────────────────────────────────────────────

/// A short link as returned by `POST /links/`, `GET /links/`, and
/// `PATCH /links/{short_id}/deactivate`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub orig_url: String,
    pub short_id: String,
    pub short_url: String,
    #[serde(default, alias = "owner_id")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub expire_at: Option<String>,
    pub is_active: bool,
}

/// One page of `GET /links/`.
///
/// The server labels the current page `page`; `current_page` is accepted too.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkListResponse {
    #[serde(default)]
    pub items: Vec<LinkResponse>,
    pub total_items: u64,
    pub total_pages: u32,
    #[serde(alias = "page")]
    pub current_page: u32,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Body of `POST /links/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateLinkRequest<'a> {
    pub orig_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_seconds: Option<u64>,
}

/// Query of `GET /links/`.
///
/// `None` filters are omitted from the query string entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkQuery {
    pub page: u32,
    pub page_size: u32,
    pub is_valid: Option<bool>,
    pub is_active: Option<bool>,
}

impl LinkQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            is_valid: None,
            is_active: None,
        }
    }

    /// Query parameters in wire order: `page, page_size, [is_valid], [is_active]`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(valid) = self.is_valid {
            params.push(("is_valid", valid.to_string()));
        }
        if let Some(active) = self.is_active {
            params.push(("is_active", active.to_string()));
        }
        params
    }
}

// ── Stats ───────────────────────────────────────────────────────────

/// Ranking key for `GET /stats/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Hour,
    Day,
    #[default]
    All,
}

/// Click counters for one link.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub short_id: Option<String>,
    #[serde(default)]
    pub short_url: Option<String>,
    pub orig_url: String,
    #[serde(default)]
    pub last_hour_clicks: u64,
    #[serde(default)]
    pub last_day_clicks: u64,
    #[serde(default)]
    pub all_clicks: u64,
}

/// Body of `GET /stats/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsListResponse {
    #[serde(default)]
    pub items: Vec<StatsResponse>,
}

// ── Users ───────────────────────────────────────────────────────────

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// A registered account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// ── Errors ──────────────────────────────────────────────────────────

/// Non-2xx body shape. `detail` is usually a string, but request
/// validation failures send a list of `{loc, msg, type}` objects.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Flatten `detail` into one human-readable line.
    pub(crate) fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Array(entries) => {
                let msgs: Vec<&str> = entries
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(serde_json::Value::as_str))
                    .collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            _ => None,
        }
    }
}
