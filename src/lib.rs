//! Changelog preset with Jira issue enrichment.
//!
//! This crate provides the core functionality for the `cob-changelog` CLI.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Issue, CommitRecord, WriterContext)
//! - [`preset`] - Parser options, commit transform, context finalizer, templates
//! - [`tracker`] - Issue sources (Jira), memoizing fetcher, per-run cache
//! - [`git`] - Reading commits from `git log`
//! - [`config`] - Tracker configuration (flags, env, config file)
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod model;
pub mod preset;
pub mod tracker;

pub use error::{Error, Result};
pub use model::{CommitRecord, Issue, WriterContext};
pub use preset::Preset;
pub use tracker::{IssueCache, IssueSource, JiraClient};
