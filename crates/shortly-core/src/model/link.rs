use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A short link owned by the logged-in user.
///
/// `is_active` only ever moves from `true` to `false` (via deactivate).
/// `expire_at` is fixed at creation; expiry itself is derived at
/// evaluation time, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub short_id: String,
    pub short_url: String,
    pub orig_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub expire_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub owner_id: Option<i64>,
}

/// Display status of a link. Inactive wins over expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Active,
    Expired,
    Inactive,
}

impl Link {
    /// A link with no expiry never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at.is_some_and(|at| at <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> LinkStatus {
        if !self.is_active {
            LinkStatus::Inactive
        } else if self.is_expired_at(now) {
            LinkStatus::Expired
        } else {
            LinkStatus::Active
        }
    }

    pub fn status(&self) -> LinkStatus {
        self.status_at(Utc::now())
    }
}

/// Lifetime presets offered when creating a link.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExpiryPreset {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl ExpiryPreset {
    /// Lifetime in seconds, as sent in `expire_seconds`.
    pub fn seconds(self) -> u64 {
        match self {
            Self::Hour => 3_600,
            Self::Day => 86_400,
            Self::Week => 604_800,
            Self::Month => 2_592_000,
            Self::Year => 31_536_000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hour => "1 hour",
            Self::Day => "1 day",
            Self::Week => "1 week",
            Self::Month => "30 days",
            Self::Year => "1 year",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(expire_at: Option<DateTime<Utc>>, is_active: bool) -> Link {
        Link {
            id: 1,
            short_id: "abc123".into(),
            short_url: "http://localhost:8000/abc123".into(),
            orig_url: "https://example.com".into(),
            created_at: None,
            expire_at,
            is_active,
            owner_id: Some(7),
        }
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let l = link(Some(now), true);
        assert!(l.is_expired_at(now));
        assert!(!l.is_valid_at(now));
        assert!(!l.is_expired_at(now - Duration::seconds(1)));
    }

    #[test]
    fn missing_expiry_never_expires() {
        let l = link(None, true);
        assert!(l.is_valid());
        assert_eq!(l.status(), LinkStatus::Active);
    }

    #[test]
    fn inactive_takes_precedence_over_expired() {
        let now = Utc::now();
        let l = link(Some(now - Duration::days(1)), false);
        assert_eq!(l.status_at(now), LinkStatus::Inactive);
        let l = link(Some(now - Duration::days(1)), true);
        assert_eq!(l.status_at(now), LinkStatus::Expired);
    }

    #[test]
    fn presets_match_expected_lifetimes() {
        assert_eq!(ExpiryPreset::default(), ExpiryPreset::Day);
        assert_eq!(ExpiryPreset::Week.seconds(), 604_800);
        assert_eq!("month".parse::<ExpiryPreset>().unwrap().seconds(), 2_592_000);
        assert_eq!(ExpiryPreset::Year.label(), "1 year");
    }
}
