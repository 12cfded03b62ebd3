//! Data models for the changelog preset.
//!
//! - Issue (tracker metadata)
//! - CommitRecord (parsed commit)
//! - WriterContext (template context)

pub mod commit;
pub mod context;
pub mod issue;

pub use commit::{CommitRecord, Note, Reference, Revert};
pub use context::{CommitGroup, NoteGroup, ReleaseMeta, WriterContext};
pub use issue::{priority_symbol, Issue};
