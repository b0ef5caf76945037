use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::CoreError;

pub use shortly_api::SortBy;

/// Click counters for one link. Replaced wholesale on every refetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// `short_id` when the server sends one, else the last path segment
    /// of `short_url`.
    pub short_id: String,
    pub short_url: Option<String>,
    pub orig_url: String,
    pub last_hour_clicks: u64,
    pub last_day_clicks: u64,
    pub all_clicks: u64,
}

/// Click totals over the loaded record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub hour: u64,
    pub day: u64,
    pub all: u64,
}

impl StatsSummary {
    pub fn from_records(records: &[StatsRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, r| Self {
            hour: acc.hour.saturating_add(r.last_hour_clicks),
            day: acc.day.saturating_add(r.last_day_clicks),
            all: acc.all.saturating_add(r.all_clicks),
        })
    }
}

/// Size of the top-N statistics window.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum TopN {
    #[default]
    #[strum(to_string = "10")]
    Ten,
    #[strum(to_string = "25")]
    TwentyFive,
    #[strum(to_string = "50")]
    Fifty,
    #[strum(to_string = "100")]
    Hundred,
}

impl TopN {
    pub fn count(self) -> u32 {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl TryFrom<u32> for TopN {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(Self::Ten),
            25 => Ok(Self::TwentyFive),
            50 => Ok(Self::Fifty),
            100 => Ok(Self::Hundred),
            other => Err(CoreError::validation(
                "top",
                format!("{other} is not one of 10, 25, 50, 100"),
            )),
        }
    }
}

impl From<TopN> for u32 {
    fn from(top: TopN) -> Self {
        top.count()
    }
}
