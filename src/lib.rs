//! manifest-merge: YAML manifest aggregation
//!
//! Collects the YAML files found below a root directory, grouped by the directory
//! that holds them, and re-serializes every non-null document into one
//! multi-document stream in a deterministic order.

pub mod collector;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod merger;
pub mod tooling;

pub use collector::{Collector, CollectorConfig, DirectoryBuckets};
pub use document::Document;
pub use error::{DocumentError, MergeError};
pub use merger::{merge, resolve_output_path, MergeOptions, MergeReport, Merger};
