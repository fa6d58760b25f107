//! PersianBlocker Core Library
//!
//! This crate turns raw domain-like lines collected from several sources into
//! a cleaned, sorted and classified set of domain names.
//!
//! # Architecture
//!
//! The pipeline is a chain of total per-entry functions (see [`domain`]) applied
//! over the union of all inputs, followed by a suffix partition. It performs no
//! I/O: readers live in `pb-sources`, writers in `pb-compiler`.
//!
//! # Modules
//!
//! - `domain`: per-entry stages (host extraction, validity, IP and script filters)
//! - `pipeline`: union, clean, sort and classify
//! - `types`: shared type definitions

pub mod domain;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use domain::{extract_domain, has_local_suffix, strip_invisible};
pub use pipeline::{classify, collect_and_clean, collect_and_clean_with_stats, run_pipeline};
pub use types::{ClassifiedDomains, ClassifyOptions, CleanStats, PipelineOutput, DEFAULT_LOCAL_TLD};
