//! Run configuration.
//!
//! Loaded from `persian-blocker.toml`. Every section is optional; CLI flags
//! override file values, which override defaults. Relative paths are resolved
//! against the directory holding the config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use pb_compiler::DEFAULT_HOSTS_ADDRESS;
use pb_core::DEFAULT_LOCAL_TLD;
use pb_sources::{CuratedLists, RemoteConfig};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "persian-blocker.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote export endpoint. Absent means the remote source is disabled.
    #[serde(default)]
    pub remote: Option<RemoteConfig>,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub curated: CuratedLists,

    #[serde(default)]
    pub classify: ClassifyConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// `[sources]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    /// Unsorted local files, one raw entry per line.
    #[serde(default)]
    pub line_files: Vec<PathBuf>,

    /// Pre-sorted ad domain list, published alongside the cleaned lists.
    #[serde(default)]
    pub ad_domains: Option<PathBuf>,

    /// Ad-block style host list compiled into the `hosts` file.
    #[serde(default)]
    pub adblock_hosts: Option<PathBuf>,
}

/// `[classify]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyConfig {
    #[serde(default = "default_local_tld")]
    pub local_tld: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            local_tld: default_local_tld(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_hosts_address")]
    pub hosts_address: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            hosts_address: default_hosts_address(),
        }
    }
}

fn default_local_tld() -> String {
    DEFAULT_LOCAL_TLD.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_hosts_address() -> String {
    DEFAULT_HOSTS_ADDRESS.to_string()
}

/// Parse config text without touching the filesystem.
pub fn parse_config(text: &str) -> Result<AppConfig, String> {
    toml::from_str(text).map_err(|e| format!("Invalid config: {}", e))
}

/// Load the config.
///
/// An explicit path must exist. Without one, a missing default file yields
/// the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                log::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(AppConfig::default());
            }
            path
        }
    };

    let text = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let mut config = parse_config(&text).map_err(|e| format!("{} ({})", e, path.display()))?;

    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }

    log::info!("loaded config from '{}'", path.display());
    Ok(config)
}

impl AppConfig {
    /// Make relative source and output paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for file in &mut self.sources.line_files {
            *file = resolve(base, file);
        }
        for file in [&mut self.sources.ad_domains, &mut self.sources.adblock_hosts]
            .into_iter()
            .flatten()
        {
            *file = resolve(base, file);
        }
        self.output.dir = resolve(base, &self.output.dir);
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").expect("empty config is valid");
        assert!(config.remote.is_none());
        assert!(config.sources.line_files.is_empty());
        assert!(config.curated.direct.is_empty());
        assert_eq!(config.classify.local_tld, "ir");
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert_eq!(config.output.hosts_address, "127.0.0.1");
    }

    #[test]
    fn parses_full_config() {
        let text = r#"
            [remote]
            url = "https://registry.example/export"
            body = "ExportExcel=true"
            accept_invalid_certs = true
            retries = 0

            [remote.headers]
            "X-Requested-With" = "XMLHttpRequest"

            [sources]
            line_files = ["data/adsl.txt"]
            ad_domains = "data/ads.txt"

            [curated]
            direct = ["a.ir"]
            proxy = ["p.com"]

            [classify]
            local_tld = "ir"

            [output]
            dir = "out"
        "#;
        let config = parse_config(text).expect("valid config");

        let remote = config.remote.expect("remote section");
        assert_eq!(remote.url, "https://registry.example/export");
        assert!(remote.accept_invalid_certs);
        assert_eq!(remote.retries, 0);
        assert_eq!(remote.timeout_secs, 30);
        assert_eq!(remote.headers.get("X-Requested-With").map(String::as_str), Some("XMLHttpRequest"));
        assert_eq!(config.sources.line_files, vec![PathBuf::from("data/adsl.txt")]);
        assert_eq!(config.curated.proxy, vec!["p.com".to_string()]);
        assert_eq!(config.output.dir, PathBuf::from("out"));
    }

    #[test]
    fn remote_verification_is_on_by_default() {
        let config = parse_config("[remote]\nurl = \"https://registry.example\"").expect("valid");
        assert!(!config.remote.expect("remote").accept_invalid_certs);
    }

    #[test]
    fn rejects_malformed_config() {
        assert!(parse_config("[sources]\nline_files = 3").is_err());
    }

    #[test]
    fn resolves_relative_paths_against_config_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[sources]\nline_files = [\"adsl.txt\", \"/abs/list.txt\"]\n").expect("write config");

        let config = load_config(Some(&path)).expect("config loads");
        assert_eq!(config.sources.line_files[0], dir.path().join("adsl.txt"));
        assert_eq!(config.sources.line_files[1], PathBuf::from("/abs/list.txt"));
        assert_eq!(config.output.dir, dir.path().join("output"));
    }

    #[test]
    fn missing_explicit_config_is_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(load_config(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
