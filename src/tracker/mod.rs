//! Issue tracker integration.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ Commit Transform │
//! └────────┬─────────┘
//!          │ key
//!          ▼
//! ┌─────────────────┐      hit
//! │  IssueFetcher   │ ───────────► IssueCache (per run)
//! └────────┬────────┘
//!          │ miss
//!          ▼
//! ┌─────────────────┐
//! │   IssueSource   │  ← JiraClient (HTTP), fakes in tests
//! └─────────────────┘
//! ```

pub mod cache;
pub mod fetcher;
pub mod jira;
pub mod source;

pub use cache::IssueCache;
pub use fetcher::IssueFetcher;
pub use jira::JiraClient;
pub use source::IssueSource;
