use std::collections::{BTreeSet, HashSet};

use crate::domain::{
    convert_encoding, extract_domain, has_local_suffix, is_ip_literal, looks_like_domain,
    passes_script_filter, strip_invisible,
};
use crate::types::{ClassifiedDomains, ClassifyOptions, CleanStats, PipelineOutput};

/// Merge every source, clean the entries and return them sorted and unique.
pub fn collect_and_clean<I, S, T>(sources: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = T>,
    T: Into<String>,
{
    collect_and_clean_with_stats(sources).0
}

/// Same as [`collect_and_clean`], also reporting counts after each stage.
pub fn collect_and_clean_with_stats<I, S, T>(sources: I) -> (Vec<String>, CleanStats)
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut stats = CleanStats::default();

    let mut union: HashSet<String> = HashSet::new();
    for source in sources {
        for entry in source {
            stats.raw += 1;
            union.insert(entry.into());
        }
    }
    stats.unique = union.len();

    let hosts: Vec<String> = union
        .into_iter()
        .map(|entry| strip_invisible(&entry.to_lowercase()))
        .map(|entry| extract_domain(&entry))
        .filter(|host| !host.is_empty())
        .collect();
    stats.extracted = hosts.len();

    let hosts: Vec<String> = hosts.into_iter().filter(|h| looks_like_domain(h)).collect();
    stats.domain_like = hosts.len();

    let hosts: Vec<String> = hosts.into_iter().filter(|h| !is_ip_literal(h)).collect();
    stats.non_ip = hosts.len();

    // Uniqueness is re-established here, after lowercasing and extraction.
    let cleaned: BTreeSet<String> = hosts
        .iter()
        .map(|h| convert_encoding(h))
        .filter(|h| passes_script_filter(h))
        .collect();
    stats.accepted = cleaned.len();

    log::debug!(
        "clean: raw={} unique={} extracted={} domain_like={} non_ip={} accepted={}",
        stats.raw,
        stats.unique,
        stats.extracted,
        stats.domain_like,
        stats.non_ip,
        stats.accepted
    );

    (cleaned.into_iter().collect(), stats)
}

/// Partition sorted domains by the local suffix. Relative order is kept.
pub fn classify(domains: &[String], options: &ClassifyOptions) -> ClassifiedDomains {
    let (local, other): (Vec<String>, Vec<String>) = domains
        .iter()
        .cloned()
        .partition(|domain| has_local_suffix(domain, &options.local_tld));

    ClassifiedDomains { local, other }
}

/// Clean every source and classify the result.
pub fn run_pipeline<I, S, T>(sources: I, options: &ClassifyOptions) -> PipelineOutput
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = T>,
    T: Into<String>,
{
    let (all, stats) = collect_and_clean_with_stats(sources);
    let classified = classify(&all, options);

    log::info!(
        "classified {} domains: {} local (.{}), {} other",
        all.len(),
        classified.local.len(),
        options.local_tld,
        classified.other.len()
    );

    PipelineOutput {
        all,
        classified,
        stats,
    }
}
