//! The changelog preset.
//!
//! A [`Preset`] bundles the commit parser options, the writer options and
//! the issue fetcher. One release is produced in a straight line:
//!
//! ```text
//! raw commits ─► parse ─► transform (per commit, resolves tickets into the cache)
//!                              │
//!                              ▼
//!                     build_context (group/sort commits, notes)
//!                              │
//!                              ▼
//!                     finalize (issues by type, cache drained) ─► render
//! ```
//!
//! The [`IssueCache`] is owned by the caller and threaded through the
//! transform and finalize steps, so nothing leaks between releases.

pub mod finalize;
pub mod parser;
pub mod templates;
pub mod transform;
pub mod writer;

use serde::Serialize;

use crate::error::Result;
use crate::model::{CommitRecord, Issue, ReleaseMeta, WriterContext};
use crate::tracker::{IssueCache, IssueFetcher, IssueSource};

pub use finalize::finalize_context;
pub use parser::{CommitParser, ParserOptions, ISSUE_PREFIX};
pub use templates::Templates;
pub use transform::{shorten_hash, ticket_key, BREAKING_CHANGES_TITLE};
pub use writer::{build_context, CommitField, GroupSort, NoteSort, WriterOptions};

pub struct Preset<S> {
    parser: CommitParser,
    writer: WriterOptions,
    fetcher: IssueFetcher<S>,
    issue_prefix: String,
}

/// Serializable view of a preset's options.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetOptions<'a> {
    pub parser_opts: &'a ParserOptions,
    pub writer_opts: &'a WriterOptions,
}

impl<S: IssueSource> Preset<S> {
    /// Preset with the built-in parser options and templates.
    pub fn new(source: S) -> Self {
        Self {
            parser: CommitParser::default(),
            writer: WriterOptions::default(),
            fetcher: IssueFetcher::new(source),
            issue_prefix: ISSUE_PREFIX.to_string(),
        }
    }

    /// Replace the writer options (typically to use loaded templates).
    #[must_use]
    pub fn with_writer(mut self, writer: WriterOptions) -> Self {
        self.writer = writer;
        self
    }

    pub fn parser(&self) -> &CommitParser {
        &self.parser
    }

    #[must_use]
    pub fn options(&self) -> PresetOptions<'_> {
        PresetOptions {
            parser_opts: self.parser.options(),
            writer_opts: &self.writer,
        }
    }

    /// Transform every commit in order, then build and finalize the context.
    ///
    /// Lookups run one at a time; each uncached key costs one request.
    pub async fn enrich(
        &self,
        cache: &mut IssueCache,
        commits: Vec<CommitRecord>,
        meta: ReleaseMeta,
    ) -> WriterContext<Issue> {
        let mut transformed = Vec::with_capacity(commits.len());
        for commit in commits {
            transformed.push(self.transform(cache, commit).await);
        }

        let context = build_context(transformed, &self.writer, meta);
        finalize_context(cache, context)
    }

    /// Produce the rendered release notes for `commits`.
    pub async fn generate(
        &self,
        cache: &mut IssueCache,
        commits: Vec<CommitRecord>,
        meta: ReleaseMeta,
    ) -> Result<String> {
        let context = self.enrich(cache, commits, meta).await;
        self.writer.templates.render(&context)
    }
}
