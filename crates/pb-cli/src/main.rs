//! PersianBlocker CLI
//!
//! CLI tool for collecting domain lists and generating the published
//! hosts file and domain lists.

mod config;
mod generate;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use pb_compiler::DEFAULT_HOSTS_ADDRESS;
use pb_core::{run_pipeline, ClassifiedDomains, ClassifyOptions};
use pb_sources::{collect_sources, DomainSource, LineFileSource};

use generate::{run_generate, run_hosts, GenerateOptions, HostsOptions};

#[derive(Parser)]
#[command(name = "pb-cli")]
#[command(about = "PersianBlocker domain list and hosts file generator")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect every source and write the classified domain lists
    Generate {
        /// Config file (defaults to ./persian-blocker.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory, overrides the config file
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Skip the remote export source
        #[arg(long)]
        no_remote: bool,

        /// Write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Convert an ad-block style host list into a hosts file
    Hosts {
        /// Ad-block style input file
        #[arg(short, long)]
        input: PathBuf,

        /// Hosts file to write
        #[arg(short, long, default_value = "hosts")]
        output: PathBuf,

        /// Address every entry points at
        #[arg(short, long, default_value = DEFAULT_HOSTS_ADDRESS)]
        address: String,
    },

    /// Clean and classify local line files, printing the result
    Classify {
        /// Input files, one raw entry per line
        #[arg(short, long, required = true)]
        input: Vec<PathBuf>,

        /// Local top-level domain
        #[arg(long, default_value = pb_core::DEFAULT_LOCAL_TLD)]
        tld: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            config,
            output_dir,
            no_remote,
            report,
        } => cmd_generate(config, output_dir, no_remote, report),
        Commands::Hosts {
            input,
            output,
            address,
        } => cmd_hosts(input, output, address),
        Commands::Classify { input, tld } => cmd_classify(&input, &tld),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let default_filter = format!(
        "warn,pb_cli={0},pb_core={0},pb_sources={0},pb_compiler={0}",
        level
    );

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_generate(
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    no_remote: bool,
    report: Option<PathBuf>,
) -> Result<(), String> {
    let config = config::load_config(config_path.as_deref())?;
    let output_dir = output_dir.unwrap_or_else(|| config.output.dir.clone());

    let stats = run_generate(GenerateOptions {
        config,
        output_dir: output_dir.clone(),
        no_remote,
        report,
    })?;

    println!("Generated domain lists in '{}'", output_dir.display());
    println!("  Sources:  {}", stats.sources);
    println!("  Entries:  {} ({} unique)", stats.raw_entries, stats.unique_entries);
    println!(
        "  Domains:  {} (.{}: {}, other: {})",
        stats.all_domains, stats.local_tld, stats.local_domains, stats.other_domains
    );
    println!("  Proxy:    {}", stats.proxy_domains);
    println!("  Ads:      {}", stats.ad_domains);
    println!("  Time:     {:.1}ms", stats.total_ms);

    Ok(())
}

fn cmd_hosts(input: PathBuf, output: PathBuf, address: String) -> Result<(), String> {
    let opts = HostsOptions {
        input,
        output,
        address,
    };
    let count = run_hosts(&opts)?;

    println!("Processed hosts file saved as '{}'", opts.output.display());
    println!("  Entries:  {}", count);

    Ok(())
}

fn cmd_classify(inputs: &[PathBuf], tld: &str) -> Result<(), String> {
    if inputs.is_empty() {
        return Err("No input files specified".to_string());
    }

    let sources: Vec<Box<dyn DomainSource>> = inputs
        .iter()
        .map(|path| Box::new(LineFileSource::new(path)) as Box<dyn DomainSource>)
        .collect();
    let collected = collect_sources(&sources).map_err(|e| e.to_string())?;

    let options = ClassifyOptions::new(tld);
    let output = run_pipeline(collected, &options);

    print!("{}", render_classified(&output.classified, &options));

    Ok(())
}

/// Listing printed by `classify`: a header and the domains of each partition.
fn render_classified(classified: &ClassifiedDomains, options: &ClassifyOptions) -> String {
    let mut out = format!("# local (.{}): {}\n", options.local_tld, classified.local.len());
    for domain in &classified.local {
        out.push_str(domain);
        out.push('\n');
    }
    out.push_str(&format!("# other: {}\n", classified.other.len()));
    for domain in &classified.other {
        out.push_str(domain);
        out.push('\n');
    }
    out
}
