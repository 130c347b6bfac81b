//! logmeta inspection CLI.
//!
//! Prints the metadata the library would attach to a log record on this
//! host, so deployments can check what `caller`, `client_ip` and `local_ip`
//! resolve to.

use std::path::PathBuf;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use clap::{Parser, Subcommand};

use logmeta::caller::{format_location, Frame};
use logmeta::config::{load_config, validate_log_level, MetaConfig, ValidationError};
use logmeta::net::{resolve_local_ip, ClientIpPolicy};
use logmeta::observability::{init_logging, LogFields};

#[derive(Parser)]
#[command(name = "logmeta")]
#[command(about = "Inspect caller and client metadata for log records", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the first non-loopback IPv4 address of this host
    LocalIp,
    /// Resolve a client IP from a transport address and request headers
    ClientIp {
        /// Transport peer as host:port
        #[arg(short, long)]
        remote_addr: String,
        /// Request header as "Name: value" (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
    /// Format a source path and line as a caller location
    Caller {
        path: String,
        #[arg(default_value_t = 0)]
        line: u32,
    },
    /// Print the full set of log fields as JSON
    Fields {
        /// Transport peer as host:port
        #[arg(short, long)]
        remote_addr: Option<String>,
        /// Request header as "Name: value" (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MetaConfig::default(),
    };
    apply_log_level(&mut config, cli.log_level)?;
    init_logging(&config.logging)?;

    let policy = ClientIpPolicy::from_config(&config.client_ip);

    match cli.command {
        Commands::LocalIp => {
            let ip = resolve_local_ip();
            if ip.is_empty() {
                tracing::warn!("No non-loopback IPv4 address found");
            }
            println!("{ip}");
        }
        Commands::ClientIp {
            remote_addr,
            headers,
        } => {
            let headers = parse_headers(&headers)?;
            println!("{}", policy.resolve(&remote_addr, &headers));
        }
        Commands::Caller { path, line } => {
            let (location, line) = format_location(&Frame::new(path, line));
            if location.is_empty() {
                tracing::warn!("Path has no parent directory component");
            }
            println!("{location}:{line}");
        }
        Commands::Fields {
            remote_addr,
            headers,
        } => {
            let mut fields = LogFields::collect(0);
            if let Some(remote_addr) = remote_addr {
                let headers = parse_headers(&headers)?;
                fields = fields.with_request(&policy, &remote_addr, &headers);
            }
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
    }

    Ok(())
}

/// Apply a `--log-level` override, rejecting unknown levels.
fn apply_log_level(config: &mut MetaConfig, level: Option<String>) -> Result<(), ValidationError> {
    if let Some(level) = level {
        validate_log_level(&level)?;
        config.logging.level = level;
    }
    Ok(())
}

/// Parse repeated `"Name: value"` arguments into a header map.
fn parse_headers(raw: &[String]) -> Result<HeaderMap, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    for entry in raw {
        let (name, value) = entry
            .split_once(':')
            .ok_or_else(|| format!("header {entry:?} is not in \"Name: value\" form"))?;
        let name = HeaderName::from_bytes(name.trim().as_bytes())?;
        let value = HeaderValue::from_str(value.trim())?;
        headers.append(name, value);
    }
    Ok(headers)
}
