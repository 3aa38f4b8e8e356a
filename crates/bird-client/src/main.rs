//! birdq - query the BIRD control socket from the command line.

use anyhow::Context;
use bird_client::{BirdClient, ClientConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Query the BIRD routing daemon control socket
#[derive(Parser, Debug)]
#[command(name = "birdq")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the control socket (overrides the config file)
    #[arg(short = 's', long)]
    socket: Option<PathBuf>,

    /// Configuration file
    #[arg(short = 'c', long, default_value = bird_client::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a raw command and print the reply lines
    Exec {
        /// Command words, joined with spaces
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Print protocol details as JSON
    Protocols {
        /// Only this protocol
        name: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = ClientConfig::load_or_default(&args.config)?;
    if let Some(socket) = args.socket {
        config.socket_path = socket;
    }
    debug!(socket = %config.socket_path.display(), "Using control socket");

    let mut client = BirdClient::with_config(&config)?;

    match args.command {
        Command::Exec { words } => {
            for line in client.execute(&words.join(" "))? {
                println!("{} {}", line.code, line.payload);
            }
        }
        Command::Protocols { name } => {
            let protocols = client.get_protocol(name.as_deref())?;
            let json = serde_json::to_string_pretty(&protocols)
                .context("Failed to serialize protocols")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "birdq failed");
            eprintln!("birdq: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
