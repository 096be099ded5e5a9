use anyhow::{Context, Result};
use clap::Parser;
use hostfacts::{Config, Facter, LocalHost};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hostfacts", about = "Collect normalized host facts as JSON", version)]
struct Cli {
    /// Config file (default: ~/.config/hostfacts/hostfacts.toml, then /etc/hostfacts/hostfacts.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print only the mounted disk list
    #[arg(long)]
    mounts: bool,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Wrap the facts with a collection timestamp
    #[arg(long)]
    envelope: bool,

    /// Increase log verbosity (-v debug, -vv trace); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let host = LocalHost::with_lookup_timeout(config.network.interface_dump_timeout);
    let facter = Facter::new(host, config);

    let body: Value = if cli.mounts {
        serde_json::to_value(facter.osdisks())?
    } else {
        serde_json::to_value(facter.facter_info())?
    };

    let out = if cli.envelope {
        json!({
            "collected_at": chrono::Local::now().to_rfc3339(),
            "facts":        body,
        })
    } else {
        body
    };

    if cli.compact {
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hostfacts={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
