// shortly-core: session and resource-synchronization layer between
// shortly-api and consumers (CLI, GUIs).

pub mod app;
pub mod config;
pub mod convert;
pub mod detail;
pub mod error;
pub mod links;
pub mod model;
pub mod notice;
pub mod session;
pub mod top_stats;

mod generation;

// ── Primary re-exports ──────────────────────────────────────────────
pub use app::Shortly;
pub use config::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE, ServiceConfig, TlsVerification};
pub use detail::{DetailState, LinkDetail};
pub use error::{AuthFailure, CoreError};
pub use links::{FetchOutcome, LinkList, LinkListState};
pub use notice::{Notice, NoticeLevel, Notifier};
pub use session::{Session, SessionPhase, SessionState};
pub use top_stats::{TopStats, TopStatsState};

pub use model::{
    ExpiryPreset, Link, LinkFilter, LinkStatus, Page, SortBy, StatsRecord, StatsSummary, TopN,
    TriState, User,
};
