//! Core type definitions for PersianBlocker
//!
//! These types carry the result of one pipeline run from the cleaning stages
//! to the output writers.

/// Country-code top-level domain treated as local by default.
pub const DEFAULT_LOCAL_TLD: &str = "ir";

// =============================================================================
// Classification
// =============================================================================

/// Options for the suffix partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Designated top-level domain, without the leading dot (e.g. "ir").
    pub local_tld: String,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            local_tld: DEFAULT_LOCAL_TLD.to_string(),
        }
    }
}

impl ClassifyOptions {
    pub fn new(local_tld: impl Into<String>) -> Self {
        let local_tld = local_tld.into();
        Self {
            local_tld: local_tld.trim().trim_start_matches('.').to_ascii_lowercase(),
        }
    }
}

/// Cleaned domains split by suffix. Both lists are sorted and disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedDomains {
    /// Domains under the local top-level domain.
    pub local: Vec<String>,
    /// Every other domain.
    pub other: Vec<String>,
}

impl ClassifiedDomains {
    /// Total number of domains across both partitions.
    pub fn total(&self) -> usize {
        self.local.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.other.is_empty()
    }
}

// =============================================================================
// Stats
// =============================================================================

/// Entry counts after each cleaning stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Lines received from all sources, duplicates included.
    pub raw: usize,
    /// Distinct lines after the case-sensitive union.
    pub unique: usize,
    /// Entries that yielded a non-empty host.
    pub extracted: usize,
    /// Hosts that look like a domain name.
    pub domain_like: usize,
    /// Domain-like hosts that are not IP literals.
    pub non_ip: usize,
    /// Distinct domains that passed the script filter.
    pub accepted: usize,
}

/// Full result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Every cleaned domain, sorted by code point.
    pub all: Vec<String>,
    pub classified: ClassifiedDomains,
    pub stats: CleanStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_options_normalizes_tld() {
        assert_eq!(ClassifyOptions::new(".IR ").local_tld, "ir");
        assert_eq!(ClassifyOptions::default().local_tld, DEFAULT_LOCAL_TLD);
    }

    #[test]
    fn test_classified_totals() {
        let classified = ClassifiedDomains {
            local: vec!["a.ir".to_string()],
            other: vec!["a.com".to_string(), "b.com".to_string()],
        };
        assert_eq!(classified.total(), 3);
        assert!(!classified.is_empty());
        assert!(ClassifiedDomains::default().is_empty());
    }
}
