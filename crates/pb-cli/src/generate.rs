use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use pb_compiler::{build_domain_lists, compile_hosts, render_domain_list, sorted_unique, Artifact};
use pb_core::{run_pipeline, ClassifyOptions, PipelineOutput};
use pb_sources::{
    collect_sources, CuratedSource, DomainSource, LineFileSource, RemoteTableSource, SortedFileSource,
};

use crate::config::AppConfig;

pub const PROXY_DOMAINS_FILE: &str = "proxy_domains.txt";
pub const AD_DOMAINS_FILE: &str = "ad_domains.txt";
pub const HOSTS_FILE: &str = "hosts";

pub struct GenerateOptions {
    pub config: AppConfig,
    pub output_dir: PathBuf,
    pub no_remote: bool,
    pub report: Option<PathBuf>,
}

/// Counts of one `generate` run, written as JSON with `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub sources: usize,
    pub raw_entries: usize,
    pub unique_entries: usize,
    pub extracted: usize,
    pub domain_like: usize,
    pub non_ip: usize,
    pub accepted: usize,
    pub local_tld: String,
    pub local_domains: usize,
    pub other_domains: usize,
    pub all_domains: usize,
    pub proxy_domains: usize,
    pub ad_domains: usize,
    pub total_ms: f64,
}

pub struct HostsOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub address: String,
}

/// Build the reader list in a fixed order: remote, line files, curated.
pub fn build_sources(config: &AppConfig, no_remote: bool) -> Result<Vec<Box<dyn DomainSource>>, String> {
    let mut sources: Vec<Box<dyn DomainSource>> = Vec::new();

    match (&config.remote, no_remote) {
        (Some(remote), false) => {
            let source = RemoteTableSource::new(remote.clone()).map_err(|e| e.to_string())?;
            sources.push(Box::new(source));
        }
        (Some(_), true) => log::info!("remote source skipped (--no-remote)"),
        (None, _) => log::debug!("no remote source configured"),
    }

    for path in &config.sources.line_files {
        sources.push(Box::new(LineFileSource::new(path)));
    }

    sources.push(Box::new(CuratedSource::direct(&config.curated)));

    Ok(sources)
}

/// Read every source, clean and classify, then write all output lists.
pub fn run_generate(opts: GenerateOptions) -> Result<GenerateReport, String> {
    let start = Instant::now();
    let config = &opts.config;

    let sources = build_sources(config, opts.no_remote)?;
    let collected = collect_sources(&sources).map_err(|e| e.to_string())?;

    let ad_domains = match &config.sources.ad_domains {
        Some(path) => SortedFileSource::new(path).read().map_err(|e| e.to_string())?,
        None => Vec::new(),
    };
    let ad_domains = sorted_unique(ad_domains);
    let proxy_domains = sorted_unique(&config.curated.proxy);

    let hosts = match &config.sources.adblock_hosts {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
            Some(compile_hosts(&content, &config.output.hosts_address))
        }
        None => None,
    };

    let options = ClassifyOptions::new(config.classify.local_tld.as_str());
    let output = run_pipeline(collected, &options);

    let mut artifacts = build_domain_lists(&output, &options.local_tld);
    artifacts.push(Artifact::new(PROXY_DOMAINS_FILE, render_domain_list(&proxy_domains)));
    artifacts.push(Artifact::new(AD_DOMAINS_FILE, render_domain_list(&ad_domains)));
    if let Some(hosts) = hosts {
        artifacts.push(Artifact::new(HOSTS_FILE, hosts));
    }

    write_artifacts(&opts.output_dir, &artifacts)?;

    let report = build_report(
        &output,
        &options,
        sources.len(),
        proxy_domains.len(),
        ad_domains.len(),
        start.elapsed().as_secs_f64() * 1000.0,
    );

    if let Some(path) = &opts.report {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        write_file(path, &json)?;
    }

    Ok(report)
}

fn build_report(
    output: &PipelineOutput,
    options: &ClassifyOptions,
    sources: usize,
    proxy_domains: usize,
    ad_domains: usize,
    total_ms: f64,
) -> GenerateReport {
    GenerateReport {
        sources,
        raw_entries: output.stats.raw,
        unique_entries: output.stats.unique,
        extracted: output.stats.extracted,
        domain_like: output.stats.domain_like,
        non_ip: output.stats.non_ip,
        accepted: output.stats.accepted,
        local_tld: options.local_tld.clone(),
        local_domains: output.classified.local.len(),
        other_domains: output.classified.other.len(),
        all_domains: output.all.len(),
        proxy_domains,
        ad_domains,
        total_ms,
    }
}

/// Turn an ad-block style file into a hosts file. Returns the entry count.
pub fn run_hosts(opts: &HostsOptions) -> Result<usize, String> {
    let content = fs::read_to_string(&opts.input)
        .map_err(|e| format!("Failed to read '{}': {}", opts.input.display(), e))?;

    let hosts = compile_hosts(&content, &opts.address);
    write_file(&opts.output, &hosts)?;

    Ok(if hosts.is_empty() { 0 } else { hosts.lines().count() })
}

pub fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create '{}': {}", dir.display(), e))?;

    for artifact in artifacts {
        let path = dir.join(&artifact.file_name);
        fs::write(&path, &artifact.contents)
            .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
        log::debug!("wrote {}", path.display());
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
        }
    }
    fs::write(path, contents).map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}
