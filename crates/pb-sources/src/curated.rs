use serde::Deserialize;

use crate::{DomainSource, SourceError};

/// Hand-maintained domain lists passed in from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CuratedLists {
    /// Domains reached directly; merged into the pipeline.
    #[serde(default)]
    pub direct: Vec<String>,
    /// Domains that must go through a proxy; published as a separate list.
    #[serde(default)]
    pub proxy: Vec<String>,
}

/// In-memory list returned verbatim, in order.
#[derive(Debug, Clone)]
pub struct CuratedSource {
    name: String,
    domains: Vec<String>,
}

impl CuratedSource {
    pub fn new(name: impl Into<String>, domains: Vec<String>) -> Self {
        Self {
            name: name.into(),
            domains,
        }
    }

    /// Source over the `direct` list.
    pub fn direct(lists: &CuratedLists) -> Self {
        Self::new("curated:direct", lists.direct.clone())
    }
}

impl DomainSource for CuratedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.domains.clone())
    }
}
