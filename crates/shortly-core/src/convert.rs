// ── API-to-domain type conversions ──
//
// Bridges raw `shortly_api` response types into `shortly_core::model`.
// Timestamps are parsed leniently: unparseable values become `None`
// rather than failing the whole page.

use chrono::{DateTime, NaiveDateTime, Utc};

use shortly_api::{LinkListResponse, LinkResponse, StatsResponse, UserResponse};

use crate::model::{Link, Page, StatsRecord, User};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one taken as UTC.
fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Last non-empty path segment of a short URL.
fn key_from_short_url(short_url: &str) -> Option<String> {
    short_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
        .map(str::to_owned)
}

// ── Links ──────────────────────────────────────────────────────────

impl From<LinkResponse> for Link {
    fn from(raw: LinkResponse) -> Self {
        Self {
            created_at: parse_datetime(raw.created_at.as_deref()),
            expire_at: parse_datetime(raw.expire_at.as_deref()),
            id: raw.id,
            short_id: raw.short_id,
            short_url: raw.short_url,
            orig_url: raw.orig_url,
            is_active: raw.is_active,
            owner_id: raw.user_id,
        }
    }
}

impl From<LinkListResponse> for Page<Link> {
    fn from(raw: LinkListResponse) -> Self {
        Self {
            items: raw.items.into_iter().map(Link::from).collect(),
            total_items: raw.total_items,
            total_pages: raw.total_pages.max(1),
            current_page: raw.current_page.max(1),
        }
    }
}

// ── Stats ──────────────────────────────────────────────────────────

impl From<StatsResponse> for StatsRecord {
    fn from(raw: StatsResponse) -> Self {
        let short_id = raw
            .short_id
            .filter(|id| !id.is_empty())
            .or_else(|| raw.short_url.as_deref().and_then(key_from_short_url))
            .unwrap_or_default();
        Self {
            short_id,
            short_url: raw.short_url,
            orig_url: raw.orig_url,
            last_hour_clicks: raw.last_hour_clicks,
            last_day_clicks: raw.last_day_clicks,
            all_clicks: raw.all_clicks,
        }
    }
}

// ── Users ──────────────────────────────────────────────────────────

impl From<UserResponse> for User {
    fn from(raw: UserResponse) -> Self {
        Self {
            id: raw.id,
            username: raw.username,
            is_active: raw.is_active,
        }
    }
}
