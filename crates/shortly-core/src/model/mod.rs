// ── Domain model ──
//
// Canonical types consumers work with. Built from `shortly_api` wire
// types by the `From` impls in `crate::convert`.

pub mod filter;
pub mod link;
pub mod page;
pub mod stats;
pub mod user;

pub use filter::{LinkFilter, TriState};
pub use link::{ExpiryPreset, Link, LinkStatus};
pub use page::{Page, expected_total_pages};
pub use stats::{SortBy, StatsRecord, StatsSummary, TopN};
pub use user::User;
