use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use holepunch::nat_traversal::{
    RetryPolicy, ServerSelection, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_SOURCE_IP, DEFAULT_SOURCE_PORT,
    DEFAULT_STUN_PORT, DEFAULT_TIMEOUT,
};
use holepunch::{discover, discover_via_stream, DiscoveryConfig, DiscoveryResult};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// holepunch - external address discovery and NAT type detection
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log verbosity (-v = debug, -vv = trace), ignored when RUST_LOG is set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the NAT using UDP binding tests
    Udp {
        /// STUN server host (defaults to trying the built-in list)
        #[arg(short, long, env = "STUN_SERVER")]
        server: Option<String>,

        /// STUN server port
        #[arg(short, long, env = "STUN_PORT", default_value_t = DEFAULT_STUN_PORT)]
        port: u16,

        /// Local address to bind
        #[arg(long, env = "SOURCE_IP", default_value_t = DEFAULT_SOURCE_IP)]
        source_ip: Ipv4Addr,

        /// Local port to bind
        #[arg(long, env = "SOURCE_PORT", default_value_t = DEFAULT_SOURCE_PORT)]
        source_port: u16,

        /// Overall deadline in milliseconds
        ///
        /// Each silent server costs four attempts, so searching the built-in
        /// list needs a longer deadline than the default to end in "Blocked"
        /// rather than a timeout error.
        #[arg(long, env = "STUN_TIMEOUT_MS", default_value_t = millis(DEFAULT_TIMEOUT))]
        timeout_ms: u64,

        /// Per-attempt receive timeout in milliseconds
        #[arg(long, default_value_t = millis(DEFAULT_ATTEMPT_TIMEOUT))]
        attempt_timeout_ms: u64,
    },

    /// Ask a TCP endpoint for our external address
    Tcp {
        /// Server host
        #[arg(short, long, env = "STUN_SERVER")]
        server: String,

        /// Server port
        #[arg(short, long, env = "STUN_PORT", default_value_t = DEFAULT_STUN_PORT)]
        port: u16,

        /// Deadline in milliseconds
        #[arg(long, env = "STUN_TIMEOUT_MS", default_value_t = millis(DEFAULT_TIMEOUT))]
        timeout_ms: u64,
    },
}

const fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    match args.command {
        Command::Udp {
            server,
            port,
            source_ip,
            source_port,
            timeout_ms,
            attempt_timeout_ms,
        } => {
            let config = DiscoveryConfig {
                source_ip,
                source_port,
                server: server.map(ServerSelection::Host).unwrap_or_default(),
                server_port: port,
                timeout: Duration::from_millis(timeout_ms),
                retry: RetryPolicy {
                    attempt_timeout: Duration::from_millis(attempt_timeout_ms),
                    ..RetryPolicy::default()
                },
            };

            let result = runtime
                .block_on(discover(&config))
                .context("NAT discovery failed")?;
            print_discovery(&result, args.json)?;
        }
        Command::Tcp {
            server,
            port,
            timeout_ms,
        } => {
            let (ip, port) = runtime
                .block_on(discover_via_stream(
                    &server,
                    port,
                    Duration::from_millis(timeout_ms),
                ))
                .with_context(|| format!("TCP lookup against {}:{} failed", server, port))?;
            print_endpoint(ip, port, args.json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_discovery(result: &DiscoveryResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("NAT Type      : {}", result.nat_type);
    match (result.external_ip, result.external_port) {
        (Some(ip), Some(port)) => {
            println!("External IP   : {}", ip);
            println!("External Port : {}", port);
        }
        _ => println!("External IP   : unknown"),
    }
    if let Some(server) = &result.server {
        println!("STUN Server   : {}", server);
    }
    Ok(())
}

fn print_endpoint(ip: IpAddr, port: u16, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({ "external_ip": ip, "external_port": port });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("External IP   : {}", ip);
        println!("External Port : {}", port);
    }
    Ok(())
}
