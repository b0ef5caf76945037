use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use shortly_api::LinkQuery;

/// One filter axis: no constraint, or constrained to `true`/`false`.
///
/// `Unset` is never sent to the server.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    #[default]
    #[strum(to_string = "any", serialize = "unset")]
    Unset,
    True,
    False,
}

impl TriState {
    pub fn as_option(self) -> Option<bool> {
        match self {
            Self::Unset => None,
            Self::True => Some(true),
            Self::False => Some(false),
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unset,
            Some(true) => Self::True,
            Some(false) => Self::False,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        Some(value).into()
    }
}

/// Link list filters. The two axes are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkFilter {
    pub is_active: TriState,
    pub is_valid: TriState,
}

impl LinkFilter {
    pub fn query(&self, page: u32, page_size: u32) -> LinkQuery {
        LinkQuery {
            is_valid: self.is_valid.as_option(),
            is_active: self.is_active.as_option(),
            ..LinkQuery::new(page, page_size)
        }
    }
}
