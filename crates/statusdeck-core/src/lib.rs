//! Resource sync layer between `statusdeck-api` and UI consumers (CLI / TUI).
//!
//! - **[`SyncClient`]**: the fire-and-refresh facade. Every mutation
//!   issues one remote call and then re-fetches the affected view (and the
//!   request counter) in full. Failures are logged and swallowed; callers
//!   get an [`Outcome`] instead of an error.
//!
//! - **Views** ([`store`]): one per remote collection plus one for the
//!   counter. A view is replaced wholesale on each refresh and published
//!   over a `tokio::sync::watch` channel. A per-view request ticket makes
//!   the most recently *issued* refresh win, not the most recently
//!   *arrived* response.
//!
//! - **[`ViewStream`]**: subscription handle with `current()` /
//!   `latest()` / `changed()` for reactive rendering in the TUI.
//!
//! - **Domain model** ([`model`]): [`Server`], [`StatusCheck`] and
//!   [`RequestCount`] with typed ids. Their `Display` impls are the
//!   canonical one-line renderings.

pub mod convert;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use model::{RequestCount, Server, ServerId, StatusCheck, StatusId};
pub use store::{Snapshot, ViewStore};
pub use stream::ViewStream;
pub use sync::{Outcome, SyncClient, non_blank};

pub use statusdeck_api::{ApiClient, TransportConfig};
