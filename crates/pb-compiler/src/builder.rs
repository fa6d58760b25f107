use std::collections::BTreeSet;

use pb_core::PipelineOutput;

use crate::parser::parse_adblock_hosts;

/// Loopback address every hosts entry is pointed at.
pub const DEFAULT_HOSTS_ADDRESS: &str = "127.0.0.1";

pub const OTHER_DOMAINS_FILE: &str = "other_domains.txt";
pub const ALL_DOMAINS_FILE: &str = "all_domains.txt";

/// A named text file ready to be written into the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, contents: String) -> Self {
        Self {
            file_name: file_name.into(),
            contents,
        }
    }
}

/// Build the three domain-list files of a pipeline run: local, other and all.
pub fn build_domain_lists(output: &PipelineOutput, local_tld: &str) -> Vec<Artifact> {
    vec![
        Artifact::new(
            format!("{}_domains.txt", local_tld),
            render_domain_list(&output.classified.local),
        ),
        Artifact::new(OTHER_DOMAINS_FILE, render_domain_list(&output.classified.other)),
        Artifact::new(ALL_DOMAINS_FILE, render_domain_list(&output.all)),
    ]
}

/// Render `<address> <entry>` lines, newline-joined without a trailing newline.
pub fn render_hosts<S: AsRef<str>>(entries: &[S], address: &str) -> String {
    entries
        .iter()
        .map(|entry| format!("{} {}", address, entry.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one domain per line, newline-joined without a trailing newline.
pub fn render_domain_list<S: AsRef<str>>(domains: &[S]) -> String {
    domains
        .iter()
        .map(|domain| domain.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse an ad-block style host file and render it in hosts format.
pub fn compile_hosts(text: &str, address: &str) -> String {
    let entries = parse_adblock_hosts(text);
    render_hosts(&entries, address)
}

/// Trim, drop blanks, dedupe and sort a hand-maintained list.
pub fn sorted_unique<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
