//! PersianBlocker Source Readers
//!
//! Each reader yields the raw, possibly malformed, lines of one origin: the
//! remote export table, local line files, a pre-sorted local list, or the
//! curated in-memory list. Readers run sequentially and the first failure
//! aborts the whole collection.

pub mod curated;
pub mod error;
pub mod file;
pub mod remote;

pub use curated::{CuratedLists, CuratedSource};
pub use error::SourceError;
pub use file::{LineFileSource, SortedFileSource};
pub use remote::{extract_first_column, RemoteConfig, RemoteTableSource};

/// A producer of raw domain-like lines.
pub trait DomainSource {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Read every line of the source.
    fn read(&self) -> Result<Vec<String>, SourceError>;
}

/// Read every source in order. Errors propagate unmodified and no partial
/// result is returned.
pub fn collect_sources(sources: &[Box<dyn DomainSource>]) -> Result<Vec<Vec<String>>, SourceError> {
    let mut collected = Vec::with_capacity(sources.len());

    for source in sources {
        let entries = source.read()?;
        log::info!("source '{}': {} entries", source.name(), entries.len());
        collected.push(entries);
    }

    Ok(collected)
}
